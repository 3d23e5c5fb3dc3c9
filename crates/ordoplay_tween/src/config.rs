// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tweener configuration.
//!
//! Tweeners are described in RON:
//!
//! ```ron
//! (
//!     target: "Cube",
//!     timing: (step_duration: 1.5, pause_between_loops: 0.5),
//!     property: Color(steps: [(r: 1.0, g: 0.0, b: 0.0), (r: 0.0, g: 0.0, b: 1.0)]),
//! )
//! ```

use crate::adapter::{ColorSteps, PingPongScale, PositionSteps, PropertyTweener, Tweener, DEFAULT_SCALE_MULTIPLIER};
use crate::binding::{PropertyKind, SceneObject};
use crate::error::ConfigurationError;
use crate::lerp::{Color, Vec3};
use crate::sequencer::StepTiming;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Property animation of a tweener
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyConfig {
    /// Loop through renderer colors
    Color {
        /// Ordered color steps
        steps: Vec<Color>,
    },
    /// Loop through world positions
    Position {
        /// Ordered position steps
        steps: Vec<Vec3>,
    },
    /// Ping-pong the scale between its current value and a multiple of it
    PingPongScale {
        /// Scale factor at the peak of the ping
        #[serde(default = "default_scale_multiplier")]
        scale_multiplier: f32,
    },
}

fn default_scale_multiplier() -> f32 {
    DEFAULT_SCALE_MULTIPLIER
}

impl PropertyConfig {
    /// Property animated by this config
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Color { .. } => PropertyKind::Color,
            Self::Position { .. } => PropertyKind::Position,
            Self::PingPongScale { .. } => PropertyKind::Scale,
        }
    }

    /// Build and start a tweener reading its initial value from `object`
    pub fn build(
        &self,
        object: &dyn SceneObject,
        timing: StepTiming,
    ) -> Result<Box<dyn PropertyTweener>, ConfigurationError> {
        let tweener: Box<dyn PropertyTweener> = match self {
            Self::Color { steps } => {
                Box::new(Tweener::start(ColorSteps::new(steps.clone()), object, timing)?)
            }
            Self::Position { steps } => {
                Box::new(Tweener::start(PositionSteps::new(steps.clone()), object, timing)?)
            }
            Self::PingPongScale { scale_multiplier } => {
                Box::new(Tweener::start(PingPongScale::new(*scale_multiplier), object, timing)?)
            }
        };
        Ok(tweener)
    }
}

/// One tweener attached to a named scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweenerConfig {
    /// Name of the target object
    pub target: String,
    /// Step timing
    #[serde(default)]
    pub timing: StepTiming,
    /// Animated property
    pub property: PropertyConfig,
}

impl TweenerConfig {
    /// Create a config with default timing
    pub fn new(target: impl Into<String>, property: PropertyConfig) -> Self {
        Self {
            target: target.into(),
            timing: StepTiming::default(),
            property,
        }
    }

    /// Set the timing
    pub fn with_timing(mut self, timing: StepTiming) -> Self {
        self.timing = timing;
        self
    }
}

/// Parse a RON document
pub fn from_ron_str<T: DeserializeOwned>(source: &str) -> Result<T, ConfigurationError> {
    Ok(ron::from_str(source)?)
}

/// Read and parse a RON file
pub fn load_ron<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigurationError> {
    let source = std::fs::read_to_string(path)?;
    from_ron_str(&source)
}
