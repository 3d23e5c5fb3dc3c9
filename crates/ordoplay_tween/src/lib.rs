// SPDX-License-Identifier: MIT OR Apache-2.0
//! Step tweening for OrdoPlay scene objects.
//!
//! This crate animates visual properties frame by frame:
//! - Renderer color through a list of color steps
//! - Position through a list of position steps
//! - Scale ping-pong around the object's own scale
//!
//! ## Architecture
//!
//! The tweening is built on:
//! - A generic looping step sequencer with linear interpolation
//! - Value providers and sinks binding a sequencer to one property
//! - A per-frame runner ticking every tweener in a scene
//! - RON configuration for tweeners

pub mod adapter;
pub mod binding;
pub mod config;
pub mod error;
pub mod lerp;
pub mod runner;
pub mod scene;
pub mod sequencer;

pub use adapter::{ColorSteps, PingPongScale, PositionSteps, PropertyTweener, Tweener};
pub use binding::{EntityId, PropertyKind, SceneGraph, SceneObject, Sink, ValueProvider};
pub use config::{PropertyConfig, TweenerConfig};
pub use error::ConfigurationError;
pub use lerp::{Color, Interpolable, Vec3};
pub use runner::{ScheduledTweener, TweenEvent, TweenRunner, TweenerId};
pub use scene::{Scene, SceneEntity, Transform};
pub use sequencer::{SequencerPhase, Step, StepEvent, StepSequencer, StepTiming};
