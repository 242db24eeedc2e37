//! Cobra engine core
//!
//! Handle-indexed asset management, the entity-component scene graph with
//! its file format, and the 2D physics world that runs scenes.

extern crate self as cobra_engine;

pub mod asset;
pub mod config;
pub mod core;
pub mod graphics;
pub mod physics;
pub mod project;
pub mod scene;
pub mod scripting;
pub mod utils;

// Re-export commonly used types
pub mod prelude {
    pub use crate::asset::{
        Asset, AssetHandle, AssetImporter, AssetManagerBase, AssetMetadata, AssetType,
        EditorAssetManager,
    };
    pub use crate::config::PhysicsSettings;
    pub use crate::core::{MainThreadQueue, Uuid};
    pub use crate::graphics::{NullRenderer, RecordingRenderer, Renderer2D, Texture2D};
    pub use crate::physics::PhysicsWorld2D;
    pub use crate::project::{Project, ProjectConfig};
    pub use crate::scene::{
        BodyType, BoxCollider2DComponent, CameraComponent, CircleCollider2DComponent,
        CircleRendererComponent, Component, Entity, IdComponent, RelationshipComponent,
        Rigidbody2DComponent, Scene, SceneCamera, SceneError, SceneSerializer, ScriptComponent,
        SpriteRendererComponent, TagComponent, TextComponent, TransformComponent, ViewportSize,
    };
    pub use crate::scripting::{NullScriptHost, ScriptHost};

    pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
}

/// Initialize logging for the engine
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
