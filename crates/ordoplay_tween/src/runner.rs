// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-frame driver for all tweeners in a scene.
//!
//! The host calls [`TweenRunner::tick`] once per rendered frame. Every tweener
//! is advanced exactly once, in the order it was added. A paused tweener only
//! skips its own emission; the others keep running. A tweener whose target
//! object has left the scene is torn down on the next tick.

use crate::adapter::PropertyTweener;
use crate::binding::{EntityId, PropertyKind, SceneGraph};
use crate::config::TweenerConfig;
use crate::error::ConfigurationError;
use crate::sequencer::StepEvent;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a scheduled tweener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TweenerId(pub Uuid);

impl TweenerId {
    /// Create a new random tweener ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TweenerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Step boundary reported by the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweenEvent {
    /// Tweener that reached the boundary
    pub tweener: TweenerId,
    /// Object being animated
    pub target: EntityId,
    /// Step or loop completion
    pub event: StepEvent,
    /// Loops completed after this event
    pub loops_completed: u64,
}

/// A tweener bound to its target object
pub struct ScheduledTweener {
    /// Object being animated
    pub target: EntityId,
    tweener: Box<dyn PropertyTweener>,
}

impl ScheduledTweener {
    /// Animated property
    pub fn property(&self) -> PropertyKind {
        self.tweener.property()
    }

    /// The tweener itself
    pub fn tweener(&self) -> &dyn PropertyTweener {
        self.tweener.as_ref()
    }
}

/// Drives every tweener once per frame
#[derive(Default)]
pub struct TweenRunner {
    tweeners: IndexMap<TweenerId, ScheduledTweener>,
    /// Frames ticked so far
    pub frame_count: u64,
    /// Simulated seconds ticked so far
    pub elapsed_time: f64,
}

impl TweenRunner {
    /// Create an empty runner
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a started tweener against `target`
    pub fn add(&mut self, target: EntityId, tweener: Box<dyn PropertyTweener>) -> TweenerId {
        let id = TweenerId::new();
        self.tweeners.insert(id, ScheduledTweener { target, tweener });
        id
    }

    /// Build a tweener from config, reading its initial value from the scene
    pub fn spawn(
        &mut self,
        scene: &dyn SceneGraph,
        config: &TweenerConfig,
    ) -> Result<TweenerId, ConfigurationError> {
        let target = scene
            .find(&config.target)
            .ok_or_else(|| ConfigurationError::EntityNotFound(config.target.clone()))?;
        let object = scene
            .object(target)
            .ok_or_else(|| ConfigurationError::EntityNotFound(config.target.clone()))?;

        let tweener = config.property.build(object, config.timing)?;
        let id = self.add(target, tweener);
        tracing::info!(
            "Spawned {} tweener on '{}' (step {}s, pause {}s)",
            config.property.kind(),
            config.target,
            config.timing.step_duration,
            config.timing.pause_between_loops
        );
        Ok(id)
    }

    /// Spawn every config, stopping at the first failure
    pub fn spawn_all<'a>(
        &mut self,
        scene: &dyn SceneGraph,
        configs: impl IntoIterator<Item = &'a TweenerConfig>,
    ) -> Result<Vec<TweenerId>, ConfigurationError> {
        configs
            .into_iter()
            .map(|config| self.spawn(scene, config))
            .collect()
    }

    /// Remove a tweener
    pub fn remove(&mut self, id: TweenerId) -> Option<ScheduledTweener> {
        self.tweeners.shift_remove(&id)
    }

    /// Get a tweener
    pub fn get(&self, id: TweenerId) -> Option<&ScheduledTweener> {
        self.tweeners.get(&id)
    }

    /// Iterate over tweeners in scheduling order
    pub fn iter(&self) -> impl Iterator<Item = (TweenerId, &ScheduledTweener)> {
        self.tweeners.iter().map(|(id, t)| (*id, t))
    }

    /// Number of scheduled tweeners
    pub fn len(&self) -> usize {
        self.tweeners.len()
    }

    /// Whether nothing is scheduled
    pub fn is_empty(&self) -> bool {
        self.tweeners.is_empty()
    }

    /// Advance every tweener by `delta_time` and collect step boundaries
    pub fn tick(&mut self, scene: &mut dyn SceneGraph, delta_time: f32) -> Vec<TweenEvent> {
        let mut events = Vec::new();
        let mut orphaned = Vec::new();

        for (id, scheduled) in &mut self.tweeners {
            let Some(object) = scene.object_mut(scheduled.target) else {
                orphaned.push(*id);
                continue;
            };

            match scheduled.tweener.tick(object, delta_time) {
                Some(StepEvent::InProgress) | None => {}
                Some(event) => {
                    let loops_completed = scheduled.tweener.loops_completed();
                    tracing::debug!(
                        "{:?} on {} tweener {:?} (loops: {})",
                        event,
                        scheduled.property(),
                        id,
                        loops_completed
                    );
                    events.push(TweenEvent {
                        tweener: *id,
                        target: scheduled.target,
                        event,
                        loops_completed,
                    });
                }
            }
        }

        for id in orphaned {
            self.tweeners.shift_remove(&id);
            tracing::warn!("Dropped tweener {:?}: target no longer in scene", id);
        }

        self.frame_count += 1;
        self.elapsed_time += f64::from(delta_time.max(0.0));
        events
    }
}
