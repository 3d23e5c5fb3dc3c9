// SPDX-License-Identifier: MIT OR Apache-2.0
//! Step sequencer driving looping linear tweens.
//!
//! A [`StepSequencer`] walks an ordered list of values, interpolating from one
//! value to the next over a fixed step duration. After the last value it wraps
//! back to the first and counts a completed loop, optionally pausing before the
//! next loop starts.
//!
//! The very first step starts from an externally supplied initial value (the
//! live property value at setup), every later step starts from the previous
//! step value.

use crate::error::ConfigurationError;
use crate::lerp::Interpolable;
use serde::{Deserialize, Serialize};

/// Default duration of each step (seconds)
pub const DEFAULT_STEP_DURATION: f32 = 2.0;

/// Timing parameters shared by every step of a sequencer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepTiming {
    /// Duration of each step in seconds (0 snaps to the end value every tick)
    pub step_duration: f32,
    /// Pause between loops in seconds
    pub pause_between_loops: f32,
}

impl StepTiming {
    /// Create timing with no pause between loops
    pub fn new(step_duration: f32) -> Self {
        Self {
            step_duration,
            pause_between_loops: 0.0,
        }
    }

    /// Set the pause between loops
    pub fn with_pause(mut self, pause_between_loops: f32) -> Self {
        self.pause_between_loops = pause_between_loops;
        self
    }

    /// Check that both durations are finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.step_duration.is_finite() || self.step_duration < 0.0 {
            return Err(ConfigurationError::InvalidStepDuration(self.step_duration));
        }
        if !self.pause_between_loops.is_finite() || self.pause_between_loops < 0.0 {
            return Err(ConfigurationError::InvalidPause(self.pause_between_loops));
        }
        Ok(())
    }
}

impl Default for StepTiming {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_DURATION)
    }
}

/// Phase of a running sequencer
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SequencerPhase {
    /// Started, not advanced yet
    #[default]
    Initializing,
    /// Interpolating the current step
    Stepping,
    /// Waiting between loops
    Paused {
        /// Pause time left in seconds
        remaining: f32,
    },
}

/// What happened on an advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepEvent {
    /// Still inside the current step
    InProgress,
    /// A step reached its end value
    StepCompleted,
    /// The last step reached its end value and the sequence wrapped
    LoopCompleted,
}

/// Output of one advance
#[derive(Debug, Clone, PartialEq)]
pub struct Step<V> {
    /// Interpolated value to apply this tick
    pub value: V,
    /// Ratio the value was computed with
    pub ratio: f32,
    /// Boundary reached by this advance
    pub event: StepEvent,
}

/// Looping step sequencer over an interpolable value type
#[derive(Debug, Clone)]
pub struct StepSequencer<V> {
    initial: V,
    steps: Vec<V>,
    timing: StepTiming,
    loops_completed: u64,
    current_index: usize,
    step_elapsed: f32,
    is_first_step: bool,
    phase: SequencerPhase,
}

impl<V: Interpolable> StepSequencer<V> {
    /// Start a sequencer from `initial` through `steps`.
    ///
    /// Fails if `steps` is empty or `timing` is invalid.
    pub fn start(initial: V, steps: Vec<V>, timing: StepTiming) -> Result<Self, ConfigurationError> {
        if steps.is_empty() {
            return Err(ConfigurationError::EmptySteps);
        }
        timing.validate()?;

        Ok(Self {
            initial,
            steps,
            timing,
            loops_completed: 0,
            current_index: 0,
            step_elapsed: 0.0,
            is_first_step: true,
            phase: SequencerPhase::Initializing,
        })
    }

    /// Scheduler entry point.
    ///
    /// Counts down an active pause and emits nothing until it has elapsed.
    /// The tick that ends the pause resumes stepping with its own delta.
    pub fn tick(&mut self, delta_time: f32) -> Option<Step<V>> {
        let delta_time = sanitize_delta(delta_time);

        if let SequencerPhase::Paused { remaining } = self.phase {
            let remaining = remaining - delta_time;
            if remaining > 0.0 {
                self.phase = SequencerPhase::Paused { remaining };
                return None;
            }
            self.phase = SequencerPhase::Stepping;
        }

        Some(self.advance(delta_time))
    }

    /// Advance the current step by `delta_time` and emit its value.
    ///
    /// Time past the end of a step is dropped, the next step starts from zero.
    /// An active pause is not consulted here; schedulers call [`Self::tick`].
    pub fn advance(&mut self, delta_time: f32) -> Step<V> {
        if self.phase == SequencerPhase::Initializing {
            self.phase = SequencerPhase::Stepping;
        }

        self.step_elapsed += sanitize_delta(delta_time);

        let ratio = self.ratio();
        let (start, end) = self.segment();
        let value = start.lerp(end, ratio);

        let event = if self.step_elapsed >= self.timing.step_duration {
            self.complete_step()
        } else {
            StepEvent::InProgress
        };

        Step { value, ratio, event }
    }

    fn complete_step(&mut self) -> StepEvent {
        self.step_elapsed = 0.0;
        self.is_first_step = false;
        self.current_index += 1;

        if self.current_index < self.steps.len() {
            return StepEvent::StepCompleted;
        }

        self.current_index = 0;
        self.loops_completed += 1;
        if self.timing.pause_between_loops > 0.0 {
            self.phase = SequencerPhase::Paused {
                remaining: self.timing.pause_between_loops,
            };
        }
        StepEvent::LoopCompleted
    }

    /// Progress within the current step, in [0, 1]
    pub fn ratio(&self) -> f32 {
        if self.timing.step_duration <= 0.0 {
            return 1.0;
        }
        (self.step_elapsed / self.timing.step_duration).clamp(0.0, 1.0)
    }

    /// Start and end values of the current step
    pub fn segment(&self) -> (&V, &V) {
        let end = &self.steps[self.current_index];
        if self.is_first_step {
            return (&self.initial, end);
        }
        let previous = (self.current_index + self.steps.len() - 1) % self.steps.len();
        (&self.steps[previous], end)
    }
}

impl<V> StepSequencer<V> {
    /// Number of full traversals of the step list
    pub fn loops_completed(&self) -> u64 {
        self.loops_completed
    }

    /// Index of the value the current step moves toward
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Time accumulated in the current step
    pub fn step_elapsed(&self) -> f32 {
        self.step_elapsed
    }

    /// Whether the current step starts from the initial value
    pub fn is_first_step(&self) -> bool {
        self.is_first_step
    }

    /// Current phase
    pub fn phase(&self) -> SequencerPhase {
        self.phase
    }

    /// Whether the sequencer is waiting between loops
    pub fn is_paused(&self) -> bool {
        matches!(self.phase, SequencerPhase::Paused { .. })
    }

    /// Number of steps per loop
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Step values in traversal order
    pub fn steps(&self) -> &[V] {
        &self.steps
    }

    /// Initial value the first step starts from
    pub fn initial_value(&self) -> &V {
        &self.initial
    }

    /// Timing parameters
    pub fn timing(&self) -> StepTiming {
        self.timing
    }
}

// Clock sources are trusted to be non-negative; anything else is a no-op tick.
fn sanitize_delta(delta_time: f32) -> f32 {
    if delta_time.is_finite() {
        delta_time.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: f32 = 0.0;
    const A: f32 = 10.0;
    const B: f32 = 20.0;
    const C: f32 = 30.0;

    fn abc(timing: StepTiming) -> StepSequencer<f32> {
        StepSequencer::start(X, vec![A, B, C], timing).unwrap()
    }

    #[test]
    fn test_rejects_invalid_setup() {
        assert!(matches!(
            StepSequencer::<f32>::start(X, Vec::new(), StepTiming::default()),
            Err(ConfigurationError::EmptySteps)
        ));
        assert!(matches!(
            StepSequencer::start(X, vec![A], StepTiming::new(-1.0)),
            Err(ConfigurationError::InvalidStepDuration(_))
        ));
        assert!(matches!(
            StepSequencer::start(X, vec![A], StepTiming::new(f32::NAN)),
            Err(ConfigurationError::InvalidStepDuration(_))
        ));
        assert!(matches!(
            StepSequencer::start(X, vec![A], StepTiming::new(f32::INFINITY)),
            Err(ConfigurationError::InvalidStepDuration(_))
        ));
        assert!(matches!(
            StepSequencer::start(X, vec![A], StepTiming::new(1.0).with_pause(-0.5)),
            Err(ConfigurationError::InvalidPause(_))
        ));
    }

    #[test]
    fn test_starts_initializing() {
        let mut seq = abc(StepTiming::new(2.0));
        assert_eq!(seq.phase(), SequencerPhase::Initializing);
        assert!(seq.is_first_step());
        assert_eq!(seq.segment(), (&X, &A));

        seq.advance(0.5);
        assert_eq!(seq.phase(), SequencerPhase::Stepping);
    }

    #[test]
    fn test_first_steps_scenario() {
        let mut seq = abc(StepTiming::new(2.0));

        let outputs: Vec<_> = (0..5).map(|_| seq.advance(1.0)).collect();
        let values: Vec<f32> = outputs.iter().map(|s| s.value).collect();
        let events: Vec<StepEvent> = outputs.iter().map(|s| s.event).collect();

        assert_eq!(values, vec![5.0, A, 15.0, B, 25.0]);
        assert_eq!(
            events,
            vec![
                StepEvent::InProgress,
                StepEvent::StepCompleted,
                StepEvent::InProgress,
                StepEvent::StepCompleted,
                StepEvent::InProgress,
            ]
        );
        assert_eq!(seq.loops_completed(), 0);
        assert_eq!(seq.current_index(), 2);
    }

    #[test]
    fn test_loop_completion_scenario() {
        let mut seq = abc(StepTiming::new(2.0));
        for _ in 0..5 {
            seq.advance(1.0);
        }

        let step = seq.advance(1.0);
        assert_eq!(step.value, C);
        assert_eq!(step.event, StepEvent::LoopCompleted);
        assert_eq!(seq.loops_completed(), 1);
        assert_eq!(seq.current_index(), 0);
        assert_eq!(seq.segment(), (&C, &A));

        let step = seq.advance(1.0);
        assert_eq!(step.value, 20.0);
        assert_eq!(step.event, StepEvent::InProgress);
    }

    #[test]
    fn test_full_steps_complete_one_loop() {
        for count in 1..=5 {
            let steps: Vec<f32> = (0..count).map(|i| i as f32).collect();
            let mut seq = StepSequencer::start(-1.0, steps, StepTiming::new(0.25)).unwrap();
            let start_index = seq.current_index();

            for _ in 0..count {
                seq.advance(0.25);
            }
            assert_eq!(seq.loops_completed(), 1);
            assert_eq!(seq.current_index(), start_index);

            for _ in 0..count {
                seq.advance(0.25);
            }
            assert_eq!(seq.loops_completed(), 2);
            assert_eq!(seq.current_index(), start_index);
        }
    }

    #[test]
    fn test_single_step_loops_every_step() {
        let mut seq = StepSequencer::start(X, vec![A], StepTiming::new(1.0)).unwrap();
        assert_eq!(seq.advance(1.0).event, StepEvent::LoopCompleted);
        assert_eq!(seq.segment(), (&A, &A));
        assert_eq!(seq.advance(0.5).value, A);
        assert_eq!(seq.advance(0.5).event, StepEvent::LoopCompleted);
        assert_eq!(seq.loops_completed(), 2);
    }

    #[test]
    fn test_zero_delta_is_idempotent() {
        let mut seq = abc(StepTiming::new(2.0));
        seq.advance(1.0);
        let first = seq.advance(0.0);

        for _ in 0..10 {
            let step = seq.advance(0.0);
            assert_eq!(step.value, first.value);
            assert_eq!(step.event, StepEvent::InProgress);
            assert_eq!(seq.loops_completed(), 0);
            assert_eq!(seq.current_index(), 0);
        }
        assert_eq!(first.value, 5.0);
    }

    #[test]
    fn test_zero_delta_before_first_advance() {
        let mut seq = abc(StepTiming::new(2.0));
        let step = seq.advance(0.0);
        assert_eq!(step.value, X);
        assert_eq!(step.ratio, 0.0);
        assert!(seq.is_first_step());
    }

    #[test]
    fn test_loops_are_monotonic() {
        let mut seq = abc(StepTiming::new(0.3));
        let deltas = [0.1, 0.0, 0.7, 0.05, 0.3, 1.0, 0.2, 0.0, 0.31];
        let mut last = 0;
        for &delta in deltas.iter().cycle().take(200) {
            seq.advance(delta);
            assert!(seq.loops_completed() >= last);
            last = seq.loops_completed();
        }
        assert!(last > 0);
    }

    #[test]
    fn test_overshoot_is_clamped_and_discarded() {
        let mut seq = abc(StepTiming::new(2.0));

        let step = seq.advance(3.5);
        assert_eq!(step.ratio, 1.0);
        assert_eq!(step.value, A);
        assert_eq!(step.event, StepEvent::StepCompleted);
        assert_eq!(seq.step_elapsed(), 0.0);

        // The extra 1.5s does not carry into A -> B
        let step = seq.advance(1.0);
        assert_eq!(step.value, 15.0);
    }

    #[test]
    fn test_zero_duration_snaps() {
        let mut seq = abc(StepTiming::new(0.0));

        let step = seq.advance(0.016);
        assert_eq!((step.value, step.ratio, step.event), (A, 1.0, StepEvent::StepCompleted));
        let step = seq.advance(0.016);
        assert_eq!((step.value, step.event), (B, StepEvent::StepCompleted));
        let step = seq.advance(0.016);
        assert_eq!((step.value, step.event), (C, StepEvent::LoopCompleted));
        let step = seq.advance(0.016);
        assert_eq!((step.value, step.event), (A, StepEvent::StepCompleted));
        assert_eq!(seq.loops_completed(), 1);
    }

    #[test]
    fn test_pause_between_loops() {
        let mut seq = abc(StepTiming::new(2.0).with_pause(3.0));

        for _ in 0..5 {
            assert!(seq.tick(1.0).is_some());
        }
        let step = seq.tick(1.0).unwrap();
        assert_eq!(step.event, StepEvent::LoopCompleted);
        assert!(seq.is_paused());

        // Ticks summing to less than the pause emit nothing
        assert!(seq.tick(1.0).is_none());
        assert!(seq.tick(1.5).is_none());
        assert!(seq.tick(0.0).is_none());
        assert_eq!(seq.phase(), SequencerPhase::Paused { remaining: 0.5 });
        assert_eq!(seq.loops_completed(), 1);
        assert_eq!(seq.step_elapsed(), 0.0);

        // Pause elapses, stepping resumes from C toward A
        let step = seq.tick(0.5).unwrap();
        assert_eq!(seq.phase(), SequencerPhase::Stepping);
        assert_eq!(step.value, 25.0);
        assert_eq!(step.event, StepEvent::InProgress);
    }

    #[test]
    fn test_no_pause_when_zero() {
        let mut seq = abc(StepTiming::new(1.0));
        for _ in 0..3 {
            seq.tick(1.0);
        }
        assert_eq!(seq.loops_completed(), 1);
        assert!(!seq.is_paused());
        assert!(seq.tick(0.5).is_some());
    }

    #[test]
    fn test_tick_matches_advance_without_pause() {
        let mut ticked = abc(StepTiming::new(0.5));
        let mut advanced = abc(StepTiming::new(0.5));
        for i in 0..40 {
            let delta = 0.1 + (i % 3) as f32 * 0.05;
            assert_eq!(ticked.tick(delta), Some(advanced.advance(delta)));
        }
    }

    #[test]
    fn test_bad_delta_is_ignored() {
        let mut seq = abc(StepTiming::new(2.0));
        seq.advance(1.0);
        assert_eq!(seq.advance(-5.0).value, 5.0);
        assert_eq!(seq.advance(f32::NAN).value, 5.0);
        assert_eq!(seq.advance(f32::INFINITY).value, 5.0);
        assert_eq!(seq.step_elapsed(), 1.0);
    }

    #[test]
    fn test_timing_deserializes_with_defaults() {
        let timing: StepTiming = ron::from_str("(pause_between_loops: 1.5)").unwrap();
        assert_eq!(timing.step_duration, DEFAULT_STEP_DURATION);
        assert_eq!(timing.pause_between_loops, 1.5);
    }
}
