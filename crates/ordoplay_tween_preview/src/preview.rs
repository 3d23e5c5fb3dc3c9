// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless tween preview.
//!
//! Builds a scene and its tweeners from a RON description, then ticks them on
//! a fixed-rate virtual clock and reports what happened.

use ordoplay_tween::config;
use ordoplay_tween::{
    ConfigurationError, Scene, SceneEntity, SceneObject, StepEvent, TweenRunner, TweenerConfig,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Built-in preview used when no file is given
pub const DEFAULT_PREVIEW: &str = include_str!("../preview.ron");

/// Error while preparing a preview
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// Scene or tweener setup failed
    #[error(transparent)]
    Config(#[from] ConfigurationError),

    /// Frame rate is not a positive finite number
    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(f32),

    /// Duration is negative or not finite
    #[error("Invalid duration: {0}")]
    InvalidDuration(f32),
}

/// Preview description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Simulated frames per second
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f32,
    /// Simulated seconds to run
    #[serde(default = "default_duration")]
    pub duration: f32,
    /// Scene objects
    #[serde(default)]
    pub entities: Vec<SceneEntity>,
    /// Tweeners attached to the objects
    #[serde(default)]
    pub tweeners: Vec<TweenerConfig>,
}

fn default_frame_rate() -> f32 {
    60.0
}

fn default_duration() -> f32 {
    10.0
}

impl PreviewConfig {
    /// Load a preview from a RON file
    pub fn load(path: &Path) -> Result<Self, PreviewError> {
        Ok(config::load_ron(path)?)
    }

    /// Parse a preview from RON text
    pub fn parse(source: &str) -> Result<Self, PreviewError> {
        Ok(config::from_ron_str(source)?)
    }

    /// Number of frames the preview runs for
    pub fn frame_count(&self) -> u64 {
        (self.duration * self.frame_rate).round() as u64
    }
}

/// Summary of a finished preview
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSummary {
    /// Frames ticked
    pub frames: u64,
    /// Simulated seconds
    pub elapsed: f64,
    /// Steps completed across all tweeners
    pub steps_completed: usize,
    /// Loops completed across all tweeners
    pub loops_completed: usize,
}

/// A scene with its tweeners, ready to run
pub struct Preview {
    scene: Scene,
    runner: TweenRunner,
    frame_time: f32,
    frames: u64,
}

impl Preview {
    /// Build the scene and start every tweener
    pub fn from_config(config: &PreviewConfig) -> Result<Self, PreviewError> {
        if !config.frame_rate.is_finite() || config.frame_rate <= 0.0 {
            return Err(PreviewError::InvalidFrameRate(config.frame_rate));
        }
        if !config.duration.is_finite() || config.duration < 0.0 {
            return Err(PreviewError::InvalidDuration(config.duration));
        }

        let mut scene = Scene::new();
        for entity in &config.entities {
            scene.add_entity(entity.clone());
        }

        let mut runner = TweenRunner::new();
        runner.spawn_all(&scene, &config.tweeners)?;

        Ok(Self {
            scene,
            runner,
            frame_time: 1.0 / config.frame_rate,
            frames: config.frame_count(),
        })
    }

    /// The scene being animated
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The runner driving the tweeners
    pub fn runner(&self) -> &TweenRunner {
        &self.runner
    }

    /// Tick every frame and log step boundaries
    pub fn run(&mut self) -> PreviewSummary {
        let mut steps_completed = 0;
        let mut loops_completed = 0;

        for _ in 0..self.frames {
            for event in self.runner.tick(&mut self.scene, self.frame_time) {
                let name = self
                    .scene
                    .get(event.target)
                    .map_or("<removed>", |entity| entity.name());
                match event.event {
                    StepEvent::LoopCompleted => {
                        loops_completed += 1;
                        tracing::info!(
                            "[frame {}] '{}' completed loop {}",
                            self.runner.frame_count,
                            name,
                            event.loops_completed
                        );
                    }
                    StepEvent::StepCompleted => {
                        steps_completed += 1;
                        tracing::debug!("[frame {}] '{}' completed a step", self.runner.frame_count, name);
                    }
                    StepEvent::InProgress => {}
                }
            }

            for (_, entity) in self.scene.entities() {
                tracing::trace!(
                    "[frame {}] {}: position {:?} scale {:?} color {:?}",
                    self.runner.frame_count,
                    entity.name,
                    entity.transform.position.to_array(),
                    entity.transform.scale.to_array(),
                    entity.color.map(|c| c.to_array())
                );
            }
        }

        PreviewSummary {
            frames: self.runner.frame_count,
            elapsed: self.runner.elapsed_time,
            steps_completed,
            loops_completed,
        }
    }
}
