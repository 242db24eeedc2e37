//! 2D renderer interface used by scenes
//!
//! A scene only issues batched draw calls between `begin_scene` and
//! `end_scene`; the GPU backend lives behind this trait.

use crate::asset::AssetHandle;
use crate::scene::{SpriteRendererComponent, TextComponent};
use glam::{Mat4, Vec4};

pub trait Renderer2D {
    fn begin_scene(&mut self, view_projection: Mat4);

    fn draw_sprite(&mut self, transform: Mat4, sprite: &SpriteRendererComponent, entity_id: i32);

    fn draw_circle(
        &mut self,
        transform: Mat4,
        color: Vec4,
        thickness: f32,
        fade: f32,
        entity_id: i32,
    );

    fn draw_string(&mut self, text: &str, transform: Mat4, component: &TextComponent, entity_id: i32);

    fn end_scene(&mut self);
}

/// Renderer that discards everything, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer2D for NullRenderer {
    fn begin_scene(&mut self, _view_projection: Mat4) {}

    fn draw_sprite(&mut self, _transform: Mat4, _sprite: &SpriteRendererComponent, _entity_id: i32) {}

    fn draw_circle(
        &mut self,
        _transform: Mat4,
        _color: Vec4,
        _thickness: f32,
        _fade: f32,
        _entity_id: i32,
    ) {
    }

    fn draw_string(&mut self, _text: &str, _transform: Mat4, _component: &TextComponent, _entity_id: i32) {}

    fn end_scene(&mut self) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginScene {
        view_projection: Mat4,
    },
    Sprite {
        transform: Mat4,
        color: Vec4,
        texture: Option<AssetHandle>,
        entity_id: i32,
    },
    Circle {
        transform: Mat4,
        color: Vec4,
        thickness: f32,
        fade: f32,
        entity_id: i32,
    },
    Text {
        text: String,
        transform: Mat4,
        entity_id: i32,
    },
    EndScene,
}

/// Renderer that records every call, used by tools and tests
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of draw calls, excluding scene begin/end markers
    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| !matches!(c, DrawCommand::BeginScene { .. } | DrawCommand::EndScene))
            .count()
    }

    pub fn scenes_rendered(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::EndScene))
            .count()
    }
}

impl Renderer2D for RecordingRenderer {
    fn begin_scene(&mut self, view_projection: Mat4) {
        self.commands.push(DrawCommand::BeginScene { view_projection });
    }

    fn draw_sprite(&mut self, transform: Mat4, sprite: &SpriteRendererComponent, entity_id: i32) {
        self.commands.push(DrawCommand::Sprite {
            transform,
            color: sprite.color,
            texture: sprite.texture,
            entity_id,
        });
    }

    fn draw_circle(
        &mut self,
        transform: Mat4,
        color: Vec4,
        thickness: f32,
        fade: f32,
        entity_id: i32,
    ) {
        self.commands.push(DrawCommand::Circle {
            transform,
            color,
            thickness,
            fade,
            entity_id,
        });
    }

    fn draw_string(&mut self, text: &str, transform: Mat4, _component: &TextComponent, entity_id: i32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            transform,
            entity_id,
        });
    }

    fn end_scene(&mut self) {
        self.commands.push(DrawCommand::EndScene);
    }
}
