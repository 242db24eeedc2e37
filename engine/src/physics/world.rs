//! Physics world owned by a running scene
//!
//! Wraps the Rapier structures needed to step a 2D simulation and keeps the
//! mapping from scene entity UUIDs to rigid bodies.

use crate::config::PhysicsSettings;
use crate::core::Uuid;
use crate::scene::{
    BodyType, BoxCollider2DComponent, CircleCollider2DComponent, Rigidbody2DComponent,
    TransformComponent,
};
use glam::Vec2;
use rapier2d::prelude::*;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use tracing::{debug, info};

/// Position and angle of a simulated body after a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    pub entity: Uuid,
    pub position: Vec2,
    pub angle: f32,
}

pub struct PhysicsWorld2D {
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    gravity: Vector<Real>,
    uuid_to_body: HashMap<Uuid, RigidBodyHandle>,
}

impl PhysicsWorld2D {
    pub fn new(settings: &PhysicsSettings) -> Self {
        info!(gravity = ?settings.gravity, "Initializing 2D physics world");

        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.num_solver_iterations =
            NonZeroUsize::new(settings.solver_iterations()).unwrap_or(NonZeroUsize::MIN);

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            gravity: vector![settings.gravity.x, settings.gravity.y],
            uuid_to_body: HashMap::new(),
        }
    }

    /// Create a body for an entity with its optional colliders.
    ///
    /// Collider extents are multiplied by the transform scale. Adding a body
    /// for a UUID that already has one replaces it.
    pub fn add_body(
        &mut self,
        entity: Uuid,
        transform: &TransformComponent,
        rigidbody: &Rigidbody2DComponent,
        box_collider: Option<&BoxCollider2DComponent>,
        circle_collider: Option<&CircleCollider2DComponent>,
    ) -> RigidBodyHandle {
        self.remove_body(entity);

        let body_type = match rigidbody.body_type {
            BodyType::Static => RigidBodyType::Fixed,
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Kinematic => RigidBodyType::KinematicPositionBased,
        };
        let mut builder = RigidBodyBuilder::new(body_type)
            .translation(vector![transform.translation.x, transform.translation.y])
            .rotation(transform.rotation.z);
        if rigidbody.fixed_rotation {
            builder = builder.lock_rotations();
        }
        let handle = self.rigid_body_set.insert(builder.build());

        if let Some(bc) = box_collider {
            let collider = ColliderBuilder::cuboid(
                bc.size.x * transform.scale.x,
                bc.size.y * transform.scale.y,
            )
            .translation(vector![bc.offset.x, bc.offset.y])
            .density(bc.density)
            .friction(bc.friction)
            .restitution(bc.restitution)
            .build();
            self.collider_set
                .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        }

        if let Some(cc) = circle_collider {
            let collider = ColliderBuilder::ball(cc.radius * transform.scale.x)
                .translation(vector![cc.offset.x, cc.offset.y])
                .density(cc.density)
                .friction(cc.friction)
                .restitution(cc.restitution)
                .build();
            self.collider_set
                .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        }

        debug!(entity = %entity, body_type = ?rigidbody.body_type, "Created rigid body");
        self.uuid_to_body.insert(entity, handle);
        handle
    }

    /// Remove an entity's body and its colliders
    pub fn remove_body(&mut self, entity: Uuid) -> bool {
        let Some(handle) = self.uuid_to_body.remove(&entity) else {
            return false;
        };
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
        true
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    /// Current pose of every body, ordered by entity UUID
    pub fn body_poses(&self) -> Vec<BodyPose> {
        let mut poses: Vec<BodyPose> = self
            .uuid_to_body
            .iter()
            .filter_map(|(&entity, &handle)| {
                let body = self.rigid_body_set.get(handle)?;
                let translation = body.translation();
                Some(BodyPose {
                    entity,
                    position: Vec2::new(translation.x, translation.y),
                    angle: body.rotation().angle(),
                })
            })
            .collect();
        poses.sort_by_key(|pose| pose.entity);
        poses
    }

    pub fn body_pose(&self, entity: Uuid) -> Option<BodyPose> {
        let body = self.rigid_body_set.get(*self.uuid_to_body.get(&entity)?)?;
        let translation = body.translation();
        Some(BodyPose {
            entity,
            position: Vec2::new(translation.x, translation.y),
            angle: body.rotation().angle(),
        })
    }

    pub fn body_handle(&self, entity: Uuid) -> Option<RigidBodyHandle> {
        self.uuid_to_body.get(&entity).copied()
    }

    pub fn body_count(&self) -> usize {
        self.uuid_to_body.len()
    }

    pub fn collider_count(&self) -> usize {
        self.collider_set.len()
    }

    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity.x, self.gravity.y)
    }
}

impl std::fmt::Debug for PhysicsWorld2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsWorld2D")
            .field("bodies", &self.rigid_body_set.len())
            .field("colliders", &self.collider_set.len())
            .field("gravity", &self.gravity())
            .finish()
    }
}
