//! JPEG thumbnail encoding for extracted frames.

use image::{DynamicImage, ImageOutputFormat};
use std::io::Cursor;

use crate::error::MediaResult;

/// Maximum thumbnail width.
pub const THUMBNAIL_MAX_WIDTH: u32 = 800;

/// Maximum thumbnail height.
pub const THUMBNAIL_MAX_HEIGHT: u32 = 600;

/// JPEG quality for stored frames.
pub const THUMBNAIL_JPEG_QUALITY: u8 = 85;

/// Thumbnail size and quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailSpec {
    pub max_width: u32,
    pub max_height: u32,
    pub quality: u8,
}

impl Default for ThumbnailSpec {
    fn default() -> Self {
        Self {
            max_width: THUMBNAIL_MAX_WIDTH,
            max_height: THUMBNAIL_MAX_HEIGHT,
            quality: THUMBNAIL_JPEG_QUALITY,
        }
    }
}

/// Downscale `image` to fit within `spec` and encode it as JPEG.
///
/// Aspect ratio is preserved and images already inside the bounds are not
/// upscaled.
pub fn encode_thumbnail(image: &DynamicImage, spec: ThumbnailSpec) -> MediaResult<Vec<u8>> {
    let resized = if image.width() > spec.max_width || image.height() > spec.max_height {
        image.thumbnail(spec.max_width, spec.max_height)
    } else {
        image.clone()
    };

    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());

    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, ImageOutputFormat::Jpeg(spec.quality.clamp(1, 100)))?;
    Ok(buffer.into_inner())
}
