//! Components attached to scene entities
//!
//! Every entity carries [`IdComponent`], [`TagComponent`],
//! [`RelationshipComponent`] and [`TransformComponent`]; the rest are
//! optional.

use super::{Component, SceneCamera, ViewportSize};
use crate::asset::AssetHandle;
use crate::core::Uuid;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Component)]
#[serde(rename_all = "PascalCase")]
pub struct IdComponent {
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Component)]
#[serde(rename_all = "PascalCase")]
pub struct TagComponent {
    pub tag: String,
}

impl TagComponent {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

/// Parent link by UUID; an unresolvable parent counts as no parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Component)]
#[serde(rename_all = "PascalCase", default)]
pub struct RelationshipComponent {
    pub parent: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[serde(rename_all = "PascalCase", default)]
pub struct TransformComponent {
    pub translation: Vec3,
    /// Euler angles in radians
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl TransformComponent {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Rotation applied about X, then Y, then Z
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::ZYX, self.rotation.z, self.rotation.y, self.rotation.x)
    }

    /// Local transform matrix (translation * rotation * scale)
    pub fn transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.translation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[serde(rename_all = "PascalCase", default)]
#[component(on_added = "CameraComponent::fit_viewport")]
pub struct CameraComponent {
    pub camera: SceneCamera,
    pub primary: bool,
    pub fixed_aspect_ratio: bool,
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            camera: SceneCamera::default(),
            primary: true,
            fixed_aspect_ratio: false,
        }
    }
}

impl CameraComponent {
    fn fit_viewport(&mut self, viewport: ViewportSize) {
        if !viewport.is_empty() {
            self.camera.set_viewport_size(viewport);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Component)]
#[serde(rename_all = "PascalCase")]
pub struct ScriptComponent {
    pub class_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[serde(rename_all = "PascalCase", default)]
pub struct SpriteRendererComponent {
    pub color: Vec4,
    pub texture: Option<AssetHandle>,
    pub tiling_factor: f32,
}

impl Default for SpriteRendererComponent {
    fn default() -> Self {
        Self {
            color: Vec4::ONE,
            texture: None,
            tiling_factor: 1.0,
        }
    }
}

impl SpriteRendererComponent {
    pub fn with_color(color: Vec4) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[serde(rename_all = "PascalCase", default)]
pub struct CircleRendererComponent {
    pub color: Vec4,
    pub thickness: f32,
    pub fade: f32,
}

impl Default for CircleRendererComponent {
    fn default() -> Self {
        Self {
            color: Vec4::ONE,
            thickness: 1.0,
            fade: 0.005,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyType {
    #[default]
    Static,
    Dynamic,
    Kinematic,
}

/// Rigid body description; the live body is owned by the scene's physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Component)]
#[serde(rename_all = "PascalCase", default)]
pub struct Rigidbody2DComponent {
    pub body_type: BodyType,
    pub fixed_rotation: bool,
}

impl Rigidbody2DComponent {
    pub fn new(body_type: BodyType) -> Self {
        Self {
            body_type,
            fixed_rotation: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[serde(rename_all = "PascalCase", default)]
pub struct BoxCollider2DComponent {
    pub offset: Vec2,
    /// Half extents, scaled by the transform when the body is built
    pub size: Vec2,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    pub restitution_threshold: f32,
}

impl Default for BoxCollider2DComponent {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            size: Vec2::splat(0.5),
            density: 1.0,
            friction: 0.5,
            restitution: 0.0,
            restitution_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[serde(rename_all = "PascalCase", default)]
pub struct CircleCollider2DComponent {
    pub offset: Vec2,
    pub radius: f32,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    pub restitution_threshold: f32,
}

impl Default for CircleCollider2DComponent {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            radius: 0.5,
            density: 1.0,
            friction: 0.5,
            restitution: 0.0,
            restitution_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Component)]
#[serde(rename_all = "PascalCase", default)]
pub struct TextComponent {
    pub text: String,
    pub color: Vec4,
    pub kerning: f32,
    pub line_spacing: f32,
    pub font: Option<AssetHandle>,
}

impl Default for TextComponent {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: Vec4::ONE,
            kerning: 0.0,
            line_spacing: 0.0,
            font: None,
        }
    }
}
