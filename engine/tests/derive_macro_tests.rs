//! Integration tests for the Component derive macro

use cobra_engine::scene::{
    component_registry, is_component_registered, register_component, Component,
    ComponentRegistry, Scene, SceneSerializer, ViewportSize,
};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Component)]
#[component(name = "Health")]
struct HealthComponent {
    value: i32,
    label: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Component)]
#[component(on_added = "ViewportRecorder::record")]
struct ViewportRecorder {
    seen: Option<(u32, u32)>,
}

impl ViewportRecorder {
    fn record(&mut self, viewport: ViewportSize) {
        self.seen = Some((viewport.width, viewport.height));
    }
}

#[test]
fn test_component_name_override() {
    assert_eq!(HealthComponent::component_name(), "Health");
    assert_eq!(ViewportRecorder::component_name(), "ViewportRecorder");
}

#[test]
fn test_on_added_hook_sees_viewport() {
    let mut scene = Scene::new("Viewport");
    scene.on_viewport_resize(800, 600);
    let entity = scene.create_entity("Recorder");
    scene.add_component(entity, ViewportRecorder::default()).unwrap();

    let recorder = scene.get_component::<ViewportRecorder>(entity).unwrap();
    assert_eq!(recorder.seen, Some((800, 600)));
}

#[test]
fn test_derived_component_registration() {
    let mut registry = ComponentRegistry::new();
    registry.register::<HealthComponent>();

    assert!(registry.is_registered("Health"));
    assert!(!registry.is_registered("HealthComponent"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_registry_entry_round_trip() {
    let mut registry = ComponentRegistry::new();
    registry.register::<HealthComponent>();
    let entry = registry.get("Health").unwrap();

    let mut scene = Scene::new("Source");
    let entity = scene.create_entity("Knight");
    scene
        .add_component(
            entity,
            HealthComponent {
                value: 42,
                label: "Hero".to_string(),
            },
        )
        .unwrap();

    let value = (entry.serialize)(scene.registry(), entity).unwrap().unwrap();
    assert_eq!(value["value"], 42);

    let mut target = Scene::new("Target");
    let copy = target.create_entity("Knight");
    assert!(!(entry.has)(target.registry(), copy));
    let viewport = target.viewport();
    (entry.deserialize)(target.registry_mut(), copy, &value, viewport).unwrap();
    assert_eq!(
        *target.get_component::<HealthComponent>(copy).unwrap(),
        HealthComponent {
            value: 42,
            label: "Hero".to_string(),
        }
    );
}

#[test]
fn test_serialize_missing_component_is_none() {
    let mut registry = ComponentRegistry::new();
    registry.register::<HealthComponent>();
    let entry = registry.get("Health").unwrap();

    let mut scene = Scene::new("Empty");
    let entity = scene.create_entity("Nobody");
    assert!((entry.serialize)(scene.registry(), entity).unwrap().is_none());
}

#[test]
fn test_registered_component_survives_copy_duplicate_and_save() {
    register_component::<HealthComponent>();
    assert!(is_component_registered::<HealthComponent>());
    assert!(component_registry().is_registered("Health"));

    let health = HealthComponent {
        value: 42,
        label: "Hero".to_string(),
    };
    let mut scene = Scene::new("Keep");
    let knight = scene.create_entity("Knight");
    scene.add_component(knight, health.clone()).unwrap();
    let uuid = scene.uuid_of(knight).unwrap();

    let copy = Scene::copy(&scene);
    let copied = copy.get_entity_by_uuid(uuid).unwrap();
    assert_eq!(*copy.get_component::<HealthComponent>(copied).unwrap(), health);

    let duplicate = scene.duplicate_entity(knight).unwrap();
    assert_eq!(*scene.get_component::<HealthComponent>(duplicate).unwrap(), health);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Keep.cobra");
    SceneSerializer::serialize(&scene, &path).unwrap();
    let loaded = SceneSerializer::deserialize(&path).unwrap();
    let reloaded = loaded.get_entity_by_uuid(uuid).unwrap();
    assert_eq!(*loaded.get_component::<HealthComponent>(reloaded).unwrap(), health);
}

#[test]
fn test_unregistered_component_is_reported() {
    assert!(!is_component_registered::<ViewportRecorder>());
    assert!(!component_registry().is_registered("ViewportRecorder"));
}
