//! Optional background raster loaded once at startup.
//!
//! The backdrop sits beneath the rendered field; a missing or unreadable
//! file is a fatal startup error, surfaced before any frame is computed.

use aurora_core::error::AuroraError;
use image::imageops::FilterType;
use image::RgbaImage;
use std::path::Path;

/// A background image, decoded to RGBA8 at load time.
#[derive(Debug, Clone)]
pub struct Backdrop {
    image: RgbaImage,
}

impl Backdrop {
    /// Loads and decodes the image at `path`.
    ///
    /// Returns `AuroraError::Io` if the file is missing, unreadable, or not
    /// a decodable raster.
    pub fn load(path: &Path) -> Result<Self, AuroraError> {
        let image = image::open(path)
            .map_err(|e| AuroraError::Io(format!("background {}: {e}", path.display())))?
            .to_rgba8();
        Ok(Self { image })
    }

    /// Wraps an already-decoded image. Used by tests and embedders.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Source dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Returns the backdrop stretched to exactly `width x height`.
    pub fn fit(&self, width: u32, height: u32) -> RgbaImage {
        if self.image.dimensions() == (width, height) {
            return self.image.clone();
        }
        image::imageops::resize(&self.image, width, height, FilterType::Triangle)
    }
}
