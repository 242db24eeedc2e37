//! CPU-side texture data handed to the renderer backend

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Rgb8,
    Rgba8,
}

impl ImageFormat {
    pub fn channels(self) -> u32 {
        match self {
            ImageFormat::Rgb8 => 3,
            ImageFormat::Rgba8 => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSpecification {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

/// Decoded 2D image, rows stored bottom-up
#[derive(Debug, Clone, PartialEq)]
pub struct Texture2D {
    spec: TextureSpecification,
    data: Vec<u8>,
}

impl Texture2D {
    /// Wrap pixel data. Returns `None` if `data` does not match `spec`.
    pub fn new(spec: TextureSpecification, data: Vec<u8>) -> Option<Self> {
        let expected = spec.width as usize * spec.height as usize * spec.format.channels() as usize;
        if data.len() != expected {
            return None;
        }
        Some(Self { spec, data })
    }

    pub fn specification(&self) -> &TextureSpecification {
        &self.spec
    }

    pub fn width(&self) -> u32 {
        self.spec.width
    }

    pub fn height(&self) -> u32 {
        self.spec.height
    }

    pub fn format(&self) -> ImageFormat {
        self.spec.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
