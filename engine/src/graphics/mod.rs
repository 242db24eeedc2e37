//! Renderer-facing contracts and CPU texture data

pub mod renderer;
pub mod texture;

pub use renderer::{DrawCommand, NullRenderer, RecordingRenderer, Renderer2D};
pub use texture::{ImageFormat, Texture2D, TextureSpecification};
