//! Texture2D import from PNG and JPEG files

use super::{Asset, AssetError, AssetHandle, AssetMetadata};
use crate::graphics::texture::{ImageFormat, Texture2D, TextureSpecification};
use crate::project::Project;
use image::{DynamicImage, ImageError, ImageReader};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error};

pub fn import_texture_2d(
    project: &Project,
    handle: AssetHandle,
    metadata: &AssetMetadata,
) -> Option<Asset> {
    let path = project.asset_absolute_path(&metadata.file_path);
    match load_texture_2d(&path) {
        Ok(texture) => Some(Asset::Texture2D(Arc::new(texture))),
        Err(e) => {
            error!(handle = %handle, path = ?path, error = %e, "Could not load texture");
            None
        }
    }
}

/// Decode an image file into a texture with bottom-up rows.
///
/// Only 8-bit RGB and RGBA images are accepted.
pub fn load_texture_2d(path: &Path) -> Result<Texture2D, AssetError> {
    if !path.is_file() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    let image = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| match e {
            ImageError::Decoding(_) => AssetError::Malformed(e.to_string()),
            ImageError::Unsupported(_) => AssetError::UnsupportedType(e.to_string()),
            other => AssetError::Image(other),
        })?;

    let (format, width, height, data) = match image.flipv() {
        DynamicImage::ImageRgb8(buffer) => {
            (ImageFormat::Rgb8, buffer.width(), buffer.height(), buffer.into_raw())
        }
        DynamicImage::ImageRgba8(buffer) => {
            (ImageFormat::Rgba8, buffer.width(), buffer.height(), buffer.into_raw())
        }
        other => {
            return Err(AssetError::UnsupportedType(format!(
                "color type {:?}",
                other.color()
            )))
        }
    };

    let spec = TextureSpecification {
        width,
        height,
        format,
    };
    debug!(path = ?path, width, height, format = ?format, "Decoded texture");
    Texture2D::new(spec, data).ok_or_else(|| AssetError::Malformed(format!("{path:?}")))
}
