// SPDX-License-Identifier: MIT OR Apache-2.0
//! Setup errors for tweeners.

use crate::binding::PropertyKind;

/// Error raised while setting up a tweener.
///
/// Every variant is fatal: a tweener that fails to start never ticks.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// The step list has no values
    #[error("Step sequence is empty")]
    EmptySteps,

    /// Step duration is negative or not finite
    #[error("Invalid step duration: {0}")]
    InvalidStepDuration(f32),

    /// Pause between loops is negative or not finite
    #[error("Invalid pause between loops: {0}")]
    InvalidPause(f32),

    /// Ping-pong scale multiplier is not finite
    #[error("Invalid scale multiplier: {0}")]
    InvalidScaleMultiplier(f32),

    /// The target object does not expose the animated property
    #[error("Object '{object}' has no {property} property")]
    MissingProperty {
        /// Name of the scene object
        object: String,
        /// Property the tweener needs
        property: PropertyKind,
    },

    /// No scene object matches the configured target
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid RON
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
