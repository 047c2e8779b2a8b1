//! CPU-side PNG rendering of a single frame.
//!
//! The pixel buffer conversion itself lives in [`crate::pixel`]; this module
//! only owns the encoding and file write.

use aurora_core::error::AuroraError;
use aurora_core::field::ScalarField;
use std::path::Path;

use crate::colormap::Colormap;
use crate::pixel::field_to_rgba;

/// Writes a field as a PNG image, mapping values through the given colormap.
///
/// Returns `AuroraError::InvalidDimensions` if the field dimensions overflow
/// `u32`, or `AuroraError::Io` on write failure.
pub fn write_png(
    field: &ScalarField,
    clim: (f64, f64),
    colormap: &Colormap,
    path: &Path,
) -> Result<(), AuroraError> {
    let rgba = field_to_rgba(field, clim, colormap);
    write_rgba_png(rgba, field.width(), field.height(), path)
}

/// Writes an already-composited RGBA8 buffer as a PNG image.
pub fn write_rgba_png(
    rgba: Vec<u8>,
    width: usize,
    height: usize,
    path: &Path,
) -> Result<(), AuroraError> {
    let w = u32::try_from(width).map_err(|_| AuroraError::InvalidDimensions)?;
    let h = u32::try_from(height).map_err(|_| AuroraError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| AuroraError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| AuroraError::Io(e.to_string()))
}
