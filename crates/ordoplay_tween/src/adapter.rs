// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property adapters and the tweener that drives them.
//!
//! An adapter is a thin binding between a [`StepSequencer`] and one property
//! of a scene object: it supplies the initial value and step list at setup and
//! writes each emitted value back. All sequencing lives in the sequencer.

use crate::binding::{PropertyKind, SceneObject, Sink, ValueProvider};
use crate::error::ConfigurationError;
use crate::lerp::{Color, Interpolable, Vec3};
use crate::sequencer::{SequencerPhase, StepEvent, StepSequencer, StepTiming};

/// Default ping-pong scale multiplier
pub const DEFAULT_SCALE_MULTIPLIER: f32 = 1.5;

/// Loops through a list of renderer colors
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSteps {
    /// Ordered color steps
    pub steps: Vec<Color>,
}

impl ColorSteps {
    /// Create a color adapter
    pub fn new(steps: impl Into<Vec<Color>>) -> Self {
        Self { steps: steps.into() }
    }
}

impl ValueProvider<Color> for ColorSteps {
    fn property(&self) -> PropertyKind {
        PropertyKind::Color
    }

    fn initial_value(&self, object: &dyn SceneObject) -> Result<Color, ConfigurationError> {
        object.color().ok_or_else(|| ConfigurationError::MissingProperty {
            object: object.name().to_string(),
            property: PropertyKind::Color,
        })
    }

    fn steps(&self, _object: &dyn SceneObject) -> Result<Vec<Color>, ConfigurationError> {
        Ok(self.steps.clone())
    }
}

impl Sink<Color> for ColorSteps {
    fn apply(&self, object: &mut dyn SceneObject, value: &Color) {
        object.set_color(*value);
    }
}

/// Loops through a list of world positions
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSteps {
    /// Ordered position steps
    pub steps: Vec<Vec3>,
}

impl PositionSteps {
    /// Create a position adapter
    pub fn new(steps: impl Into<Vec<Vec3>>) -> Self {
        Self { steps: steps.into() }
    }
}

impl ValueProvider<Vec3> for PositionSteps {
    fn property(&self) -> PropertyKind {
        PropertyKind::Position
    }

    fn initial_value(&self, object: &dyn SceneObject) -> Result<Vec3, ConfigurationError> {
        Ok(object.position())
    }

    fn steps(&self, _object: &dyn SceneObject) -> Result<Vec<Vec3>, ConfigurationError> {
        Ok(self.steps.clone())
    }
}

impl Sink<Vec3> for PositionSteps {
    fn apply(&self, object: &mut dyn SceneObject, value: &Vec3) {
        object.set_position(*value);
    }
}

/// Grows the object's scale by a multiplier and back, forever
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PingPongScale {
    /// Scale factor at the peak of the ping
    pub scale_multiplier: f32,
}

impl PingPongScale {
    /// Create a ping-pong adapter
    pub fn new(scale_multiplier: f32) -> Self {
        Self { scale_multiplier }
    }
}

impl Default for PingPongScale {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE_MULTIPLIER)
    }
}

impl ValueProvider<Vec3> for PingPongScale {
    fn property(&self) -> PropertyKind {
        PropertyKind::Scale
    }

    fn initial_value(&self, object: &dyn SceneObject) -> Result<Vec3, ConfigurationError> {
        Ok(object.scale())
    }

    // Derived once from the scale at setup, not per loop
    fn steps(&self, object: &dyn SceneObject) -> Result<Vec<Vec3>, ConfigurationError> {
        if !self.scale_multiplier.is_finite() {
            return Err(ConfigurationError::InvalidScaleMultiplier(self.scale_multiplier));
        }
        let scale = object.scale();
        Ok(vec![scale * self.scale_multiplier, scale])
    }
}

impl Sink<Vec3> for PingPongScale {
    fn apply(&self, object: &mut dyn SceneObject, value: &Vec3) {
        object.set_scale(*value);
    }
}

/// A sequencer bound to one property adapter
#[derive(Debug, Clone)]
pub struct Tweener<V, A> {
    adapter: A,
    sequencer: StepSequencer<V>,
}

impl<V, A> Tweener<V, A>
where
    V: Interpolable,
    A: ValueProvider<V> + Sink<V>,
{
    /// Read the initial value and steps from `object` and start sequencing
    pub fn start(adapter: A, object: &dyn SceneObject, timing: StepTiming) -> Result<Self, ConfigurationError> {
        let initial = adapter.initial_value(object)?;
        let steps = adapter.steps(object)?;
        let sequencer = StepSequencer::start(initial, steps, timing)?;
        Ok(Self { adapter, sequencer })
    }

    /// Advance one frame and write the emitted value, if any, onto `object`
    pub fn tick(&mut self, object: &mut dyn SceneObject, delta_time: f32) -> Option<StepEvent> {
        let step = self.sequencer.tick(delta_time)?;
        self.adapter.apply(object, &step.value);
        Some(step.event)
    }

    /// The bound adapter
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// The underlying sequencer
    pub fn sequencer(&self) -> &StepSequencer<V> {
        &self.sequencer
    }

    /// Number of loops completed since start
    pub fn loops(&self) -> u64 {
        self.sequencer.loops_completed()
    }
}

/// Type-erased tweener so different value types can share one runner
pub trait PropertyTweener {
    /// Animated property
    fn property(&self) -> PropertyKind;

    /// Advance one frame against `object`
    fn tick(&mut self, object: &mut dyn SceneObject, delta_time: f32) -> Option<StepEvent>;

    /// Number of loops completed since start
    fn loops_completed(&self) -> u64;

    /// Current sequencer phase
    fn phase(&self) -> SequencerPhase;
}

impl<V, A> PropertyTweener for Tweener<V, A>
where
    V: Interpolable,
    A: ValueProvider<V> + Sink<V>,
{
    fn property(&self) -> PropertyKind {
        self.adapter.property()
    }

    fn tick(&mut self, object: &mut dyn SceneObject, delta_time: f32) -> Option<StepEvent> {
        Tweener::tick(self, object, delta_time)
    }

    fn loops_completed(&self) -> u64 {
        self.loops()
    }

    fn phase(&self) -> SequencerPhase {
        self.sequencer.phase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneEntity;

    #[test]
    fn test_color_tweener_writes_color() {
        let mut cube = SceneEntity::new("Cube").with_color(Color::BLACK);
        let adapter = ColorSteps::new([Color::WHITE, Color::RED]);
        let mut tweener = Tweener::start(adapter, &cube, StepTiming::new(1.0)).unwrap();

        assert_eq!(tweener.tick(&mut cube, 0.5), Some(StepEvent::InProgress));
        assert_eq!(cube.color, Some(Color::rgb(0.5, 0.5, 0.5)));

        assert_eq!(tweener.tick(&mut cube, 0.5), Some(StepEvent::StepCompleted));
        assert_eq!(cube.color, Some(Color::WHITE));

        tweener.tick(&mut cube, 0.5);
        assert_eq!(cube.color, Some(Color::rgb(1.0, 0.5, 0.5)));
    }

    #[test]
    fn test_color_requires_renderer() {
        let cube = SceneEntity::new("Cube");
        let result = Tweener::start(ColorSteps::new([Color::RED]), &cube, StepTiming::default());
        match result {
            Err(ConfigurationError::MissingProperty { object, property }) => {
                assert_eq!(object, "Cube");
                assert_eq!(property, PropertyKind::Color);
            }
            other => panic!("expected missing property, got {other:?}"),
        }
    }

    #[test]
    fn test_position_tweener_loops() {
        let mut sphere = SceneEntity::new("Sphere").with_position(Vec3::new(0.0, 0.0, 0.0));
        let adapter = PositionSteps::new([Vec3::new(4.0, 0.0, 0.0), Vec3::new(4.0, 4.0, 0.0)]);
        let mut tweener = Tweener::start(adapter, &sphere, StepTiming::new(2.0)).unwrap();

        tweener.tick(&mut sphere, 1.0);
        assert_eq!(sphere.transform.position, Vec3::new(2.0, 0.0, 0.0));
        tweener.tick(&mut sphere, 1.0);
        tweener.tick(&mut sphere, 1.0);
        assert_eq!(sphere.transform.position, Vec3::new(4.0, 2.0, 0.0));
        assert_eq!(tweener.tick(&mut sphere, 1.0), Some(StepEvent::LoopCompleted));
        assert_eq!(tweener.loops(), 1);

        // Second loop starts from the last step, not the initial position
        tweener.tick(&mut sphere, 1.0);
        assert_eq!(sphere.transform.position, Vec3::new(4.0, 2.0, 0.0));
    }

    #[test]
    fn test_empty_position_steps_fail() {
        let sphere = SceneEntity::new("Sphere");
        let result = Tweener::start(PositionSteps::new(Vec::new()), &sphere, StepTiming::default());
        assert!(matches!(result, Err(ConfigurationError::EmptySteps)));
    }

    #[test]
    fn test_ping_pong_starts_from_scale() {
        let mut ball = SceneEntity::new("Ball")
            .with_position(Vec3::new(9.0, 9.0, 9.0))
            .with_scale(Vec3::new(2.0, 2.0, 2.0));
        let mut tweener = Tweener::start(PingPongScale::default(), &ball, StepTiming::new(1.0)).unwrap();

        let sequencer = tweener.sequencer();
        assert_eq!(*sequencer.initial_value(), Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(sequencer.steps(), &[Vec3::new(3.0, 3.0, 3.0), Vec3::new(2.0, 2.0, 2.0)]);

        tweener.tick(&mut ball, 0.5);
        assert_eq!(ball.transform.scale, Vec3::new(2.5, 2.5, 2.5));
        assert_eq!(ball.transform.position, Vec3::new(9.0, 9.0, 9.0));

        tweener.tick(&mut ball, 0.5);
        assert_eq!(ball.transform.scale, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(tweener.tick(&mut ball, 1.0), Some(StepEvent::LoopCompleted));
        assert_eq!(ball.transform.scale, Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_ping_pong_rejects_bad_multiplier() {
        let ball = SceneEntity::new("Ball");
        let result = Tweener::start(PingPongScale::new(f32::NAN), &ball, StepTiming::default());
        assert!(matches!(result, Err(ConfigurationError::InvalidScaleMultiplier(_))));
    }

    #[test]
    fn test_paused_tweener_leaves_object_alone() {
        let mut ball = SceneEntity::new("Ball");
        let timing = StepTiming::new(1.0).with_pause(2.0);
        let mut tweener = Tweener::start(PingPongScale::new(2.0), &ball, timing).unwrap();

        tweener.tick(&mut ball, 1.0);
        tweener.tick(&mut ball, 1.0);
        assert_eq!(tweener.loops(), 1);
        assert!(tweener.sequencer().is_paused());

        ball.transform.scale = Vec3::new(7.0, 7.0, 7.0);
        assert_eq!(tweener.tick(&mut ball, 1.0), None);
        assert_eq!(ball.transform.scale, Vec3::new(7.0, 7.0, 7.0));

        // The resuming tick carries a full step of time
        assert_eq!(tweener.tick(&mut ball, 1.0), Some(StepEvent::StepCompleted));
        assert_eq!(ball.transform.scale, Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_adapters_share_sequencing() {
        let mut object = SceneEntity::new("Both").with_color(Color::BLACK);
        let timing = StepTiming::new(0.5).with_pause(0.25);
        let mut tweeners: Vec<Box<dyn PropertyTweener>> = vec![
            Box::new(Tweener::start(ColorSteps::new([Color::RED, Color::BLUE]), &object, timing).unwrap()),
            Box::new(
                Tweener::start(
                    PositionSteps::new([Vec3::ONE, Vec3::ZERO]),
                    &object,
                    timing,
                )
                .unwrap(),
            ),
            Box::new(Tweener::start(PingPongScale::default(), &object, timing).unwrap()),
        ];

        for frame in 0..50 {
            let delta = if frame % 4 == 0 { 0.25 } else { 0.125 };
            let events: Vec<_> = tweeners
                .iter_mut()
                .map(|t| t.tick(&mut object, delta))
                .collect();
            assert!(events.windows(2).all(|w| w[0] == w[1]));
        }
        assert!(tweeners.iter().all(|t| t.loops_completed() == tweeners[0].loops_completed()));
        assert!(tweeners[0].loops_completed() > 0);
    }
}
