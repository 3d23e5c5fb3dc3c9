// SPDX-License-Identifier: MIT OR Apache-2.0
//! Binding of tweeners to scene objects.
//!
//! The engine owns the scene graph. Tweeners only see it through
//! [`SceneObject`] (property access on one object) and [`SceneGraph`]
//! (object lookup), read once at setup and written once per emitted value.

use crate::error::ConfigurationError;
use crate::lerp::{Color, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Entity ID for binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Animatable property of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    /// Renderer material color
    Color,
    /// World position
    Position,
    /// Local scale
    Scale,
}

impl PropertyKind {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Position => "position",
            Self::Scale => "scale",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Property access on a live scene object
pub trait SceneObject {
    /// Object name, used in errors and logs
    fn name(&self) -> &str;

    /// Material color, `None` if the object has no renderer
    fn color(&self) -> Option<Color>;

    /// Write the material color
    fn set_color(&mut self, color: Color);

    /// World position
    fn position(&self) -> Vec3;

    /// Write the world position
    fn set_position(&mut self, position: Vec3);

    /// Local scale
    fn scale(&self) -> Vec3;

    /// Write the local scale
    fn set_scale(&mut self, scale: Vec3);
}

/// Object lookup in the host scene
pub trait SceneGraph {
    /// Get an object by ID
    fn object(&self, id: EntityId) -> Option<&dyn SceneObject>;

    /// Get a mutable object by ID
    fn object_mut(&mut self, id: EntityId) -> Option<&mut dyn SceneObject>;

    /// Find an object ID by name
    fn find(&self, name: &str) -> Option<EntityId>;
}

/// Supplies the initial value and step list of a tweener
pub trait ValueProvider<V> {
    /// Property this provider reads
    fn property(&self) -> PropertyKind;

    /// Live value the first step starts from
    fn initial_value(&self, object: &dyn SceneObject) -> Result<V, ConfigurationError>;

    /// Ordered step values, read once at setup
    fn steps(&self, object: &dyn SceneObject) -> Result<Vec<V>, ConfigurationError>;
}

/// Receives every emitted value
pub trait Sink<V> {
    /// Write `value` onto the object
    fn apply(&self, object: &mut dyn SceneObject, value: &V);
}
