//! Name-keyed table of component operations
//!
//! Serialization, scene copy and entity duplication all walk this table, so
//! registering a component here is all it takes for it to round-trip
//! through scene files and survive copies. The built-in components are
//! registered up front; game code adds its own with [`register_component`].

use super::components::*;
use super::{Component, SceneError, ViewportSize};
use crate::core::Uuid;
use hecs::{Entity, World};
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};
use tracing::debug;

/// Type-erased operations for one registered component type
#[derive(Clone, Copy)]
pub struct ComponentEntry {
    pub name: &'static str,
    /// Serialized form of the component on `entity`, if present
    pub serialize: fn(&World, Entity) -> Result<Option<serde_json::Value>, serde_json::Error>,
    /// Parse and attach the component, running its `on_added` hook
    pub deserialize: fn(&mut World, Entity, &serde_json::Value, ViewportSize) -> Result<(), DeserializeError>,
    /// Copy every instance from one world into another through a UUID map
    pub copy_across: fn(&World, &mut World, &HashMap<Uuid, Entity>),
    /// Copy the component from one entity to another in the same world
    pub copy_within: fn(&mut World, Entity, Entity),
    pub has: fn(&World, Entity) -> bool,
}

/// Failure while attaching a deserialized component
#[derive(Debug)]
pub enum DeserializeError {
    Json(serde_json::Error),
    NoSuchEntity,
}

impl std::fmt::Debug for ComponentEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentEntry").field("name", &self.name).finish()
    }
}

#[derive(Debug, Default, Clone)]
pub struct ComponentRegistry {
    entries: Vec<ComponentEntry>,
    by_name: HashMap<&'static str, usize>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component type; re-registering a name replaces it
    pub fn register<T: Component>(&mut self) {
        let entry = ComponentEntry {
            name: T::component_name(),
            serialize: serialize_component::<T>,
            deserialize: deserialize_component::<T>,
            copy_across: copy_across::<T>,
            copy_within: copy_within::<T>,
            has: has_component::<T>,
        };
        match self.by_name.get(entry.name) {
            Some(&index) => self.entries[index] = entry,
            None => {
                self.by_name.insert(entry.name, self.entries.len());
                self.entries.push(entry);
            }
        }
        debug!(component = T::component_name(), "Registered component");
    }

    pub fn get(&self, name: &str) -> Option<&ComponentEntry> {
        self.by_name.get(name).map(|&index| &self.entries[index])
    }

    /// Entries in registration order
    pub fn entries(&self) -> &[ComponentEntry] {
        &self.entries
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every component except `IdComponent`, which is keyed separately
    pub fn with_default_components() -> Self {
        let mut registry = Self::new();
        registry.register::<TagComponent>();
        registry.register::<RelationshipComponent>();
        registry.register::<TransformComponent>();
        registry.register::<CameraComponent>();
        registry.register::<ScriptComponent>();
        registry.register::<SpriteRendererComponent>();
        registry.register::<CircleRendererComponent>();
        registry.register::<Rigidbody2DComponent>();
        registry.register::<BoxCollider2DComponent>();
        registry.register::<CircleCollider2DComponent>();
        registry.register::<TextComponent>();
        registry
    }
}

fn global_registry() -> &'static RwLock<ComponentRegistry> {
    static REGISTRY: OnceLock<RwLock<ComponentRegistry>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(ComponentRegistry::with_default_components()))
}

/// Snapshot of the process-wide registry; no lock is held once it returns
pub fn component_registry() -> ComponentRegistry {
    global_registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Add a component type to the process-wide registry so scene copies,
/// duplication and scene files carry it
pub fn register_component<T: Component>() {
    global_registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register::<T>();
}

/// Whether `T` is handled by copies and scene files
pub fn is_component_registered<T: Component>() -> bool {
    global_registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_registered(T::component_name())
}

impl DeserializeError {
    pub(crate) fn into_scene_error(self, name: &str, entity: Uuid) -> SceneError {
        match self {
            DeserializeError::Json(source) => SceneError::Component {
                name: name.to_string(),
                entity,
                source,
            },
            DeserializeError::NoSuchEntity => SceneError::NoSuchEntity,
        }
    }
}

fn serialize_component<T: Component>(
    world: &World,
    entity: Entity,
) -> Result<Option<serde_json::Value>, serde_json::Error> {
    match world.get::<&T>(entity) {
        Ok(component) => serde_json::to_value(&*component).map(Some),
        Err(_) => Ok(None),
    }
}

fn deserialize_component<T: Component>(
    world: &mut World,
    entity: Entity,
    value: &serde_json::Value,
    viewport: ViewportSize,
) -> Result<(), DeserializeError> {
    let mut component: T =
        serde_json::from_value(value.clone()).map_err(DeserializeError::Json)?;
    component.on_added(viewport);
    world
        .insert_one(entity, component)
        .map_err(|_| DeserializeError::NoSuchEntity)
}

fn copy_across<T: Component>(src: &World, dst: &mut World, entity_map: &HashMap<Uuid, Entity>) {
    let mut query = src.query::<(&IdComponent, &T)>();
    for (_, (id, component)) in query.iter() {
        if let Some(&dst_entity) = entity_map.get(&id.id) {
            let _ = dst.insert_one(dst_entity, component.clone());
        }
    }
}

fn copy_within<T: Component>(world: &mut World, src: Entity, dst: Entity) {
    let component = world.get::<&T>(src).ok().map(|c| (*c).clone());
    if let Some(component) = component {
        let _ = world.insert_one(dst, component);
    }
}

fn has_component<T: Component>(world: &World, entity: Entity) -> bool {
    world
        .entity(entity)
        .map(|entity| entity.has::<T>())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_contents() {
        let registry = ComponentRegistry::with_default_components();
        assert_eq!(registry.len(), 11);
        assert!(registry.is_registered("TransformComponent"));
        assert!(registry.is_registered("TextComponent"));
        assert!(!registry.is_registered("IdComponent"));
        assert_eq!(registry.entries()[0].name, "TagComponent");
    }

    #[test]
    fn test_reregister_replaces_entry() {
        let mut registry = ComponentRegistry::new();
        registry.register::<TagComponent>();
        registry.register::<TagComponent>();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_serialize_absent_component() {
        let mut world = World::new();
        let entity = world.spawn((TagComponent::new("a"),));
        let registry = component_registry();
        let tag = (registry.get("TagComponent").unwrap().serialize)(&world, entity).unwrap();
        assert_eq!(tag, Some(serde_json::json!({"Tag": "a"})));
        let sprite = (registry.get("SpriteRendererComponent").unwrap().serialize)(&world, entity)
            .unwrap();
        assert!(sprite.is_none());
    }
}
