use super::component_registry::{component_registry, is_component_registered};
use super::components::*;
use super::{Component, SceneError, ViewportSize};
use crate::config::PhysicsSettings;
use crate::core::Uuid;
use crate::graphics::Renderer2D;
use crate::physics::PhysicsWorld2D;
use crate::scripting::ScriptHost;
use glam::Mat4;
use hecs::{Entity, World};
use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// A collection of entities plus the runtime state of a playing scene.
///
/// Entities are addressed by `hecs::Entity` within one scene and by their
/// [`Uuid`] across copies and files.
pub struct Scene {
    name: String,
    registry: World,
    entity_map: HashMap<Uuid, Entity>,
    viewport: ViewportSize,
    physics_world: Option<PhysicsWorld2D>,
    physics_settings: PhysicsSettings,
    is_running: bool,
    is_paused: bool,
    step_frames: u32,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry: World::new(),
            entity_map: HashMap::new(),
            viewport: ViewportSize::default(),
            physics_world: None,
            physics_settings: PhysicsSettings::default(),
            is_running: false,
            is_paused: false,
            step_frames: 0,
        }
    }

    /// Deep copy of the editable state of `other`.
    ///
    /// UUIDs are preserved, entity handles are not. Runtime state (physics
    /// world, running and pause flags) starts fresh.
    pub fn copy(other: &Scene) -> Scene {
        let mut scene = Scene::new(other.name.clone());
        scene.viewport = other.viewport;
        scene.physics_settings = other.physics_settings;

        let mut entity_map = HashMap::with_capacity(other.entity_map.len());
        for (_, (id, tag)) in other.registry.query::<(&IdComponent, &TagComponent)>().iter() {
            let entity = scene.create_entity_with_uuid(id.id, &tag.tag);
            entity_map.insert(id.id, entity);
        }

        for entry in component_registry().entries() {
            (entry.copy_across)(&other.registry, &mut scene.registry, &entity_map);
        }

        debug!(scene = %scene.name, entities = entity_map.len(), "Copied scene");
        scene
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Underlying entity storage
    pub fn registry(&self) -> &World {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut World {
        &mut self.registry
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn physics_world(&self) -> Option<&PhysicsWorld2D> {
        self.physics_world.as_ref()
    }

    pub fn physics_settings(&self) -> &PhysicsSettings {
        &self.physics_settings
    }

    pub fn set_physics_settings(&mut self, settings: PhysicsSettings) {
        self.physics_settings = settings;
    }

    // Entities

    pub fn create_entity(&mut self, name: &str) -> Entity {
        self.create_entity_with_uuid(Uuid::new(), name)
    }

    /// Spawn an entity with the mandatory components.
    ///
    /// An empty name becomes `"Entity"`. A UUID already in use is remapped
    /// to the new entity.
    pub fn create_entity_with_uuid(&mut self, uuid: Uuid, name: &str) -> Entity {
        let tag = if name.is_empty() { "Entity" } else { name };
        let entity = self.registry.spawn((
            IdComponent { id: uuid },
            RelationshipComponent::default(),
            TransformComponent::default(),
            TagComponent::new(tag),
        ));
        if self.entity_map.insert(uuid, entity).is_some() {
            warn!(uuid = %uuid, "Entity UUID reused; previous entity unmapped");
        }
        entity
    }

    /// Remove an entity. Its children keep a parent UUID that no longer resolves.
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<(), SceneError> {
        let uuid = self.uuid_of(entity)?;
        if self.entity_map.get(&uuid) == Some(&entity) {
            self.entity_map.remove(&uuid);
        }
        if let Some(physics) = &mut self.physics_world {
            physics.remove_body(uuid);
        }
        self.registry
            .despawn(entity)
            .map_err(|_| SceneError::NoSuchEntity)
    }

    /// New entity with a fresh UUID and copies of every component but the id
    pub fn duplicate_entity(&mut self, entity: Entity) -> Result<Entity, SceneError> {
        let tag = self
            .get_component::<TagComponent>(entity)
            .map(|tag| tag.tag.clone())
            .ok_or(SceneError::NoSuchEntity)?;
        let duplicate = self.create_entity(&tag);
        for entry in component_registry().entries() {
            (entry.copy_within)(&mut self.registry, entity, duplicate);
        }
        Ok(duplicate)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.registry.contains(entity)
    }

    pub fn uuid_of(&self, entity: Entity) -> Result<Uuid, SceneError> {
        self.registry
            .get::<&IdComponent>(entity)
            .map(|id| id.id)
            .map_err(|_| SceneError::NoSuchEntity)
    }

    pub fn get_entity_by_uuid(&self, uuid: Uuid) -> Option<Entity> {
        self.entity_map
            .get(&uuid)
            .copied()
            .filter(|&entity| self.registry.contains(entity))
    }

    pub fn find_entity_by_name(&self, name: &str) -> Option<Entity> {
        self.registry
            .query::<&TagComponent>()
            .iter()
            .find(|(_, tag)| tag.tag == name)
            .map(|(entity, _)| entity)
    }

    pub fn primary_camera_entity(&self) -> Option<Entity> {
        self.registry
            .query::<&CameraComponent>()
            .iter()
            .find(|(_, camera)| camera.primary)
            .map(|(entity, _)| entity)
    }

    pub fn entity_count(&self) -> usize {
        self.entity_map.len()
    }

    /// UUIDs of all entities, sorted
    pub fn entities(&self) -> Vec<Uuid> {
        let mut uuids: Vec<Uuid> = self.entity_map.keys().copied().collect();
        uuids.sort();
        uuids
    }

    // Components

    /// Attach a component the entity does not have yet
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<(), SceneError> {
        if !self.registry.contains(entity) {
            return Err(SceneError::NoSuchEntity);
        }
        if self.has_component::<T>(entity) {
            return Err(SceneError::DuplicateComponent(T::component_name()));
        }
        self.add_or_replace_component(entity, component)
    }

    pub fn add_or_replace_component<T: Component>(
        &mut self,
        entity: Entity,
        mut component: T,
    ) -> Result<(), SceneError> {
        if !Self::is_mandatory::<T>() && !is_component_registered::<T>() {
            warn!(
                component = T::component_name(),
                "Component is not registered; copies and scene files will skip it"
            );
        }
        component.on_added(self.viewport);
        self.registry
            .insert_one(entity, component)
            .map_err(|_| SceneError::NoSuchEntity)
    }

    pub fn get_component<T: hecs::Component>(&self, entity: Entity) -> Option<hecs::Ref<'_, T>> {
        self.registry.get::<&T>(entity).ok()
    }

    pub fn get_component_mut<T: hecs::Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.registry.query_one_mut::<&mut T>(entity).ok()
    }

    pub fn has_component<T: hecs::Component>(&self, entity: Entity) -> bool {
        self.registry
            .entity(entity)
            .map(|entity| entity.has::<T>())
            .unwrap_or(false)
    }

    /// Detach and return a component. The four mandatory components are refused.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T, SceneError> {
        if Self::is_mandatory::<T>() {
            return Err(SceneError::MandatoryComponent(T::component_name()));
        }
        self.registry.remove_one::<T>(entity).map_err(|e| match e {
            hecs::ComponentError::NoSuchEntity => SceneError::NoSuchEntity,
            hecs::ComponentError::MissingComponent(_) => {
                SceneError::MissingComponent(T::component_name())
            }
        })
    }

    fn is_mandatory<T: 'static>() -> bool {
        let id = TypeId::of::<T>();
        id == TypeId::of::<IdComponent>()
            || id == TypeId::of::<TagComponent>()
            || id == TypeId::of::<RelationshipComponent>()
            || id == TypeId::of::<TransformComponent>()
    }

    // Hierarchy

    /// Reparent `child`, or detach it with `None`.
    ///
    /// Parenting an entity under itself or under one of its descendants is
    /// rejected.
    pub fn set_parent(&mut self, child: Entity, parent: Option<Entity>) -> Result<(), SceneError> {
        let child_uuid = self.uuid_of(child)?;
        let parent_uuid = match parent {
            Some(parent) => {
                let parent_uuid = self.uuid_of(parent)?;
                if parent_uuid == child_uuid || self.is_ancestor(child_uuid, parent_uuid) {
                    return Err(SceneError::HierarchyCycle {
                        child: child_uuid,
                        parent: parent_uuid,
                    });
                }
                Some(parent_uuid)
            }
            None => None,
        };

        let relationship = self
            .get_component_mut::<RelationshipComponent>(child)
            .ok_or(SceneError::NoSuchEntity)?;
        relationship.parent = parent_uuid;
        Ok(())
    }

    /// Resolved parent of an entity; an unknown parent UUID reads as none
    pub fn parent_of(&self, entity: Entity) -> Option<Entity> {
        let parent = self.get_component::<RelationshipComponent>(entity)?.parent?;
        self.get_entity_by_uuid(parent)
    }

    /// Direct children of `uuid`, sorted by UUID
    pub fn children_of(&self, uuid: Uuid) -> Vec<Uuid> {
        let mut children: Vec<Uuid> = self
            .registry
            .query::<(&IdComponent, &RelationshipComponent)>()
            .iter()
            .filter(|(_, (_, relationship))| relationship.parent == Some(uuid))
            .map(|(_, (id, _))| id.id)
            .collect();
        children.sort();
        children
    }

    /// Whether `ancestor` appears on the parent chain above `uuid`
    fn is_ancestor(&self, ancestor: Uuid, uuid: Uuid) -> bool {
        let mut visited = HashSet::new();
        let mut current = self.parent_uuid(uuid);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            if !visited.insert(parent) {
                return false;
            }
            current = self.parent_uuid(parent);
        }
        false
    }

    fn parent_uuid(&self, uuid: Uuid) -> Option<Uuid> {
        let entity = self.get_entity_by_uuid(uuid)?;
        self.get_component::<RelationshipComponent>(entity)?.parent
    }

    /// Local transform composed with every resolvable ancestor
    pub fn world_space_transform(&self, entity: Entity) -> Option<Mat4> {
        let mut matrix = self.get_component::<TransformComponent>(entity)?.transform();
        let mut visited = HashSet::new();
        visited.insert(self.uuid_of(entity).ok()?);

        let mut current = self.get_component::<RelationshipComponent>(entity)?.parent;
        while let Some(parent_uuid) = current {
            if !visited.insert(parent_uuid) {
                warn!(entity = %parent_uuid, "Parent cycle in scene hierarchy, treating as root");
                break;
            }
            let Some(parent) = self.get_entity_by_uuid(parent_uuid) else {
                break;
            };
            let Some(transform) = self.get_component::<TransformComponent>(parent) else {
                break;
            };
            matrix = transform.transform() * matrix;
            current = self
                .get_component::<RelationshipComponent>(parent)
                .and_then(|relationship| relationship.parent);
        }
        Some(matrix)
    }

    // Runtime

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }

    /// Advance `frames` frames even while paused
    pub fn step(&mut self, frames: u32) {
        self.step_frames = frames;
    }

    pub fn step_frames(&self) -> u32 {
        self.step_frames
    }

    pub fn on_runtime_start(&mut self, scripts: &mut dyn ScriptHost) {
        info!(scene = %self.name, "Runtime start");
        self.is_running = true;
        self.on_physics_2d_start();

        scripts.on_runtime_start();
        for (uuid, class_name) in self.script_entities() {
            scripts.on_create_entity(uuid, &class_name);
        }
    }

    pub fn on_runtime_stop(&mut self, scripts: &mut dyn ScriptHost) {
        info!(scene = %self.name, "Runtime stop");
        self.is_running = false;
        self.on_physics_2d_stop();
        scripts.on_runtime_stop();
    }

    pub fn on_simulation_start(&mut self) {
        info!(scene = %self.name, "Simulation start");
        self.on_physics_2d_start();
    }

    pub fn on_simulation_stop(&mut self) {
        info!(scene = %self.name, "Simulation stop");
        self.on_physics_2d_stop();
    }

    pub fn on_update_runtime(
        &mut self,
        ts: f32,
        scripts: &mut dyn ScriptHost,
        renderer: &mut dyn Renderer2D,
    ) {
        if self.should_advance() {
            for (uuid, class_name) in self.script_entities() {
                scripts.on_update_entity(uuid, &class_name, ts);
            }
            self.step_physics(ts);
            self.consume_step_frame();
        }

        let Some(view_projection) = self.primary_camera_view_projection() else {
            return;
        };
        self.render_scene(view_projection, renderer);
    }

    pub fn on_update_simulation(
        &mut self,
        ts: f32,
        view_projection: Mat4,
        renderer: &mut dyn Renderer2D,
    ) {
        if self.should_advance() {
            self.step_physics(ts);
            self.consume_step_frame();
        }
        self.render_scene(view_projection, renderer);
    }

    pub fn on_update_editor(&self, view_projection: Mat4, renderer: &mut dyn Renderer2D) {
        self.render_scene(view_projection, renderer);
    }

    /// Store the new size and refit every camera without a fixed aspect ratio
    pub fn on_viewport_resize(&mut self, width: u32, height: u32) {
        let viewport = ViewportSize::new(width, height);
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;

        for (_, camera) in self.registry.query_mut::<&mut CameraComponent>() {
            if !camera.fixed_aspect_ratio {
                camera.camera.set_viewport_size(viewport);
            }
        }
    }

    pub(crate) fn set_viewport(&mut self, viewport: ViewportSize) {
        self.viewport = viewport;
    }

    fn should_advance(&self) -> bool {
        !self.is_paused || self.step_frames > 0
    }

    fn consume_step_frame(&mut self) {
        self.step_frames = self.step_frames.saturating_sub(1);
    }

    fn script_entities(&self) -> Vec<(Uuid, String)> {
        let mut scripts: Vec<(Uuid, String)> = self
            .registry
            .query::<(&IdComponent, &ScriptComponent)>()
            .iter()
            .map(|(_, (id, script))| (id.id, script.class_name.clone()))
            .collect();
        scripts.sort_by_key(|(uuid, _)| *uuid);
        scripts
    }

    fn on_physics_2d_start(&mut self) {
        let mut physics = PhysicsWorld2D::new(&self.physics_settings);

        let bodies: Vec<_> = self
            .registry
            .query::<(&IdComponent, &TransformComponent, &Rigidbody2DComponent)>()
            .iter()
            .map(|(entity, (id, transform, rigidbody))| (entity, id.id, *transform, *rigidbody))
            .collect();

        for (entity, uuid, transform, rigidbody) in bodies {
            let box_collider = self.get_component::<BoxCollider2DComponent>(entity).map(|c| *c);
            let circle_collider = self
                .get_component::<CircleCollider2DComponent>(entity)
                .map(|c| *c);
            physics.add_body(
                uuid,
                &transform,
                &rigidbody,
                box_collider.as_ref(),
                circle_collider.as_ref(),
            );
        }

        debug!(bodies = physics.body_count(), "Built physics world");
        self.physics_world = Some(physics);
    }

    fn on_physics_2d_stop(&mut self) {
        self.physics_world = None;
    }

    fn step_physics(&mut self, ts: f32) {
        let Some(physics) = &mut self.physics_world else {
            return;
        };
        physics.step(ts);

        for pose in physics.body_poses() {
            let Some(&entity) = self.entity_map.get(&pose.entity) else {
                continue;
            };
            if let Ok(transform) = self.registry.query_one_mut::<&mut TransformComponent>(entity) {
                transform.translation.x = pose.position.x;
                transform.translation.y = pose.position.y;
                transform.rotation.z = pose.angle;
            }
        }
    }

    /// Projection times inverse camera transform of the primary camera
    pub fn primary_camera_view_projection(&self) -> Option<Mat4> {
        self.registry
            .query::<(&TransformComponent, &CameraComponent)>()
            .iter()
            .find(|(_, (_, camera))| camera.primary)
            .map(|(_, (transform, camera))| {
                camera.camera.projection() * transform.transform().inverse()
            })
    }

    fn render_scene(&self, view_projection: Mat4, renderer: &mut dyn Renderer2D) {
        renderer.begin_scene(view_projection);

        let sprites: Vec<_> = self
            .registry
            .query::<&SpriteRendererComponent>()
            .iter()
            .map(|(entity, sprite)| (entity, *sprite))
            .collect();
        for (entity, sprite) in sprites {
            if let Some(transform) = self.world_space_transform(entity) {
                renderer.draw_sprite(transform, &sprite, entity.id() as i32);
            }
        }

        let circles: Vec<_> = self
            .registry
            .query::<&CircleRendererComponent>()
            .iter()
            .map(|(entity, circle)| (entity, *circle))
            .collect();
        for (entity, circle) in circles {
            if let Some(transform) = self.world_space_transform(entity) {
                renderer.draw_circle(
                    transform,
                    circle.color,
                    circle.thickness,
                    circle.fade,
                    entity.id() as i32,
                );
            }
        }

        let texts: Vec<_> = self
            .registry
            .query::<&TextComponent>()
            .iter()
            .map(|(entity, text)| (entity, text.clone()))
            .collect();
        for (entity, text) in texts {
            if let Some(transform) = self.world_space_transform(entity) {
                renderer.draw_string(&text.text, transform, &text, entity.id() as i32);
            }
        }

        renderer.end_scene();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("entities", &self.entity_map.len())
            .field("viewport", &self.viewport)
            .field("is_running", &self.is_running)
            .field("is_paused", &self.is_paused)
            .field("step_frames", &self.step_frames)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{DrawCommand, RecordingRenderer};
    use glam::{Vec3, Vec4};

    #[test]
    fn test_create_entity_has_mandatory_components() {
        let mut scene = Scene::new("Test");
        let entity = scene.create_entity("");
        assert!(scene.has_component::<IdComponent>(entity));
        assert!(scene.has_component::<RelationshipComponent>(entity));
        assert!(scene.has_component::<TransformComponent>(entity));
        assert_eq!(scene.get_component::<TagComponent>(entity).unwrap().tag, "Entity");
    }

    #[test]
    fn test_destroyed_entity_is_detected() {
        let mut scene = Scene::new("Test");
        let entity = scene.create_entity("Doomed");
        let uuid = scene.uuid_of(entity).unwrap();
        scene.destroy_entity(entity).unwrap();

        assert!(scene.get_entity_by_uuid(uuid).is_none());
        assert!(matches!(scene.destroy_entity(entity), Err(SceneError::NoSuchEntity)));
        assert!(matches!(
            scene.add_component(entity, ScriptComponent::default()),
            Err(SceneError::NoSuchEntity)
        ));
    }

    #[test]
    fn test_add_component_twice_fails() {
        let mut scene = Scene::new("Test");
        let entity = scene.create_entity("A");
        scene
            .add_component(entity, SpriteRendererComponent::default())
            .unwrap();
        assert!(matches!(
            scene.add_component(entity, SpriteRendererComponent::default()),
            Err(SceneError::DuplicateComponent("SpriteRendererComponent"))
        ));
        scene
            .add_or_replace_component(entity, SpriteRendererComponent::with_color(Vec4::ZERO))
            .unwrap();
        assert_eq!(
            scene.get_component::<SpriteRendererComponent>(entity).unwrap().color,
            Vec4::ZERO
        );
    }

    #[test]
    fn test_mandatory_components_cannot_be_removed() {
        let mut scene = Scene::new("Test");
        let entity = scene.create_entity("A");
        assert!(matches!(
            scene.remove_component::<TransformComponent>(entity),
            Err(SceneError::MandatoryComponent(_))
        ));
        assert!(matches!(
            scene.remove_component::<ScriptComponent>(entity),
            Err(SceneError::MissingComponent(_))
        ));
    }

    #[test]
    fn test_camera_added_fits_viewport() {
        let mut scene = Scene::new("Test");
        scene.on_viewport_resize(800, 400);
        let entity = scene.create_entity("Camera");
        scene.add_component(entity, CameraComponent::default()).unwrap();
        let camera = scene.get_component::<CameraComponent>(entity).unwrap();
        assert!((camera.camera.aspect_ratio - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_viewport_resize_skips_fixed_aspect_cameras() {
        let mut scene = Scene::new("Test");
        let free = scene.create_entity("Free");
        let fixed = scene.create_entity("Fixed");
        scene.add_component(free, CameraComponent::default()).unwrap();
        scene
            .add_component(
                fixed,
                CameraComponent {
                    fixed_aspect_ratio: true,
                    ..Default::default()
                },
            )
            .unwrap();

        scene.on_viewport_resize(300, 100);
        assert!((scene.get_component::<CameraComponent>(free).unwrap().camera.aspect_ratio - 3.0).abs() < 1e-6);
        assert_eq!(scene.get_component::<CameraComponent>(fixed).unwrap().camera.aspect_ratio, 0.0);
    }

    #[test]
    fn test_set_parent_rejects_cycles() {
        let mut scene = Scene::new("Test");
        let a = scene.create_entity("A");
        let b = scene.create_entity("B");
        let c = scene.create_entity("C");
        scene.set_parent(b, Some(a)).unwrap();
        scene.set_parent(c, Some(b)).unwrap();

        assert!(matches!(
            scene.set_parent(a, Some(c)),
            Err(SceneError::HierarchyCycle { .. })
        ));
        assert!(matches!(
            scene.set_parent(a, Some(a)),
            Err(SceneError::HierarchyCycle { .. })
        ));

        let a_uuid = scene.uuid_of(a).unwrap();
        assert_eq!(scene.children_of(a_uuid), vec![scene.uuid_of(b).unwrap()]);
        assert_eq!(scene.parent_of(c), Some(b));

        scene.set_parent(c, None).unwrap();
        assert_eq!(scene.parent_of(c), None);
    }

    #[test]
    fn test_world_space_transform_composes_parents() {
        let mut scene = Scene::new("Test");
        let parent = scene.create_entity("Parent");
        let child = scene.create_entity("Child");
        *scene.get_component_mut::<TransformComponent>(parent).unwrap() =
            TransformComponent::from_translation(Vec3::new(1.0, 0.0, 0.0));
        *scene.get_component_mut::<TransformComponent>(child).unwrap() =
            TransformComponent::from_translation(Vec3::new(0.0, 2.0, 0.0));

        assert_eq!(
            scene.world_space_transform(parent).unwrap(),
            Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0))
        );
        scene.set_parent(child, Some(parent)).unwrap();
        let world = scene.world_space_transform(child).unwrap();
        assert!(world.abs_diff_eq(Mat4::from_translation(Vec3::new(1.0, 2.0, 0.0)), 1e-6));
    }

    #[test]
    fn test_world_space_transform_survives_handmade_cycle() {
        let mut scene = Scene::new("Test");
        let a = scene.create_entity("A");
        let b = scene.create_entity("B");
        let a_uuid = scene.uuid_of(a).unwrap();
        let b_uuid = scene.uuid_of(b).unwrap();
        scene.get_component_mut::<RelationshipComponent>(a).unwrap().parent = Some(b_uuid);
        scene.get_component_mut::<RelationshipComponent>(b).unwrap().parent = Some(a_uuid);

        assert!(scene.world_space_transform(a).is_some());
    }

    #[test]
    fn test_dangling_parent_resolves_as_root() {
        let mut scene = Scene::new("Test");
        let parent = scene.create_entity("Parent");
        let child = scene.create_entity("Child");
        scene.set_parent(child, Some(parent)).unwrap();
        scene.destroy_entity(parent).unwrap();

        assert_eq!(scene.parent_of(child), None);
        assert_eq!(scene.world_space_transform(child), Some(Mat4::IDENTITY));
    }

    #[test]
    fn test_runtime_render_requires_primary_camera() {
        let mut scene = Scene::new("Test");
        let sprite = scene.create_entity("Sprite");
        scene
            .add_component(sprite, SpriteRendererComponent::default())
            .unwrap();

        let mut renderer = RecordingRenderer::new();
        let mut scripts = crate::scripting::NullScriptHost;
        scene.on_update_runtime(1.0 / 60.0, &mut scripts, &mut renderer);
        assert!(renderer.commands.is_empty());

        let camera = scene.create_entity("Camera");
        scene.add_component(camera, CameraComponent::default()).unwrap();
        scene.on_update_runtime(1.0 / 60.0, &mut scripts, &mut renderer);
        assert_eq!(renderer.scenes_rendered(), 1);
        assert!(renderer.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Sprite { entity_id, .. } if *entity_id == sprite.id() as i32
        )));
    }

    #[test]
    fn test_editor_render_order() {
        let mut scene = Scene::new("Test");
        let text = scene.create_entity("Text");
        scene
            .add_component(
                text,
                TextComponent {
                    text: "hi".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();
        let circle = scene.create_entity("Circle");
        scene.add_component(circle, CircleRendererComponent::default()).unwrap();
        let sprite = scene.create_entity("Sprite");
        scene.add_component(sprite, SpriteRendererComponent::default()).unwrap();

        let mut renderer = RecordingRenderer::new();
        scene.on_update_editor(Mat4::IDENTITY, &mut renderer);
        assert!(matches!(renderer.commands[0], DrawCommand::BeginScene { .. }));
        assert!(matches!(renderer.commands[1], DrawCommand::Sprite { .. }));
        assert!(matches!(renderer.commands[2], DrawCommand::Circle { .. }));
        assert!(matches!(renderer.commands[3], DrawCommand::Text { .. }));
        assert!(matches!(renderer.commands[4], DrawCommand::EndScene));
    }

    #[test]
    fn test_find_entity_by_name() {
        let mut scene = Scene::new("Test");
        let player = scene.create_entity("Player");
        scene.create_entity("Enemy");
        assert_eq!(scene.find_entity_by_name("Player"), Some(player));
        assert_eq!(scene.find_entity_by_name("Missing"), None);
    }
}
