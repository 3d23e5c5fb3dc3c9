// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory scene implementing the binding traits.
//!
//! Used by the headless preview and by tests. A real engine integration
//! implements [`SceneObject`] and [`SceneGraph`] on its own types instead.

use crate::binding::{EntityId, SceneGraph, SceneObject};
use crate::lerp::{Color, Vec3};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Transform component data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// Position (x, y, z)
    pub position: Vec3,
    /// Scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Entity data stored in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEntity {
    /// Entity name
    pub name: String,
    /// Transform component
    #[serde(default)]
    pub transform: Transform,
    /// Renderer color, `None` without a renderer
    #[serde(default)]
    pub color: Option<Color>,
}

impl SceneEntity {
    /// Create a new entity with the given name and no renderer
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            color: None,
        }
    }

    /// Set the position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Set the scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    /// Attach a renderer with the given color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl SceneObject for SceneEntity {
    fn name(&self) -> &str {
        &self.name
    }

    fn color(&self) -> Option<Color> {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        if let Some(current) = self.color.as_mut() {
            *current = color;
        }
    }

    fn position(&self) -> Vec3 {
        self.transform.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    fn scale(&self) -> Vec3 {
        self.transform.scale
    }

    fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
    }
}

/// Scene containing all entities
#[derive(Debug, Clone, Default)]
pub struct Scene {
    entities: IndexMap<EntityId, SceneEntity>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity to the scene
    pub fn add_entity(&mut self, entity: SceneEntity) -> EntityId {
        let id = EntityId::new();
        self.entities.insert(id, entity);
        id
    }

    /// Get an entity by ID
    pub fn get(&self, id: EntityId) -> Option<&SceneEntity> {
        self.entities.get(&id)
    }

    /// Get a mutable entity by ID
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SceneEntity> {
        self.entities.get_mut(&id)
    }

    /// Remove an entity from the scene
    pub fn remove(&mut self, id: EntityId) -> Option<SceneEntity> {
        self.entities.shift_remove(&id)
    }

    /// Iterate over entities in insertion order
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &SceneEntity)> {
        self.entities.iter().map(|(id, entity)| (*id, entity))
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene has no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl SceneGraph for Scene {
    fn object(&self, id: EntityId) -> Option<&dyn SceneObject> {
        self.entities.get(&id).map(|e| e as &dyn SceneObject)
    }

    fn object_mut(&mut self, id: EntityId) -> Option<&mut dyn SceneObject> {
        self.entities.get_mut(&id).map(|e| e as &mut dyn SceneObject)
    }

    fn find(&self, name: &str) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|(_, entity)| entity.name == name)
            .map(|(id, _)| *id)
    }
}
