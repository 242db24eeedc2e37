//! Entity-component scene graph, its components and its file format

pub mod camera;
pub mod component_registry;
pub mod components;
#[allow(clippy::module_inception)]
mod scene;
pub mod serializer;

pub use camera::{ProjectionType, SceneCamera};
pub use component_registry::{
    component_registry, is_component_registered, register_component, ComponentEntry,
    ComponentRegistry,
};
pub use components::*;
pub use scene::Scene;
pub use serializer::{SceneDocument, SceneSerializer};

pub use hecs::Entity;

use crate::core::Uuid;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use cobra_derive::Component;

/// Data that can be attached to a scene entity and stored in scene files
pub trait Component: hecs::Component + Clone + Serialize + DeserializeOwned {
    /// Key used for this component in scene files
    fn component_name() -> &'static str;

    /// Called when the component is attached through the scene API
    fn on_added(&mut self, _viewport: ViewportSize) {}
}

/// Viewport dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Errors that can occur during scene operations
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("component '{name}' on entity {entity} is malformed: {source}")]
    Component {
        name: String,
        entity: Uuid,
        #[source]
        source: serde_json::Error,
    },
    #[error("entity does not exist")]
    NoSuchEntity,
    #[error("parent entity {0} not found")]
    UnknownParent(Uuid),
    #[error("parenting {child} under {parent} would create a cycle")]
    HierarchyCycle { child: Uuid, parent: Uuid },
    #[error("component '{0}' is mandatory and cannot be removed")]
    MandatoryComponent(&'static str),
    #[error("entity already has component '{0}'")]
    DuplicateComponent(&'static str),
    #[error("entity has no component '{0}'")]
    MissingComponent(&'static str),
}
