//! Frame composition and looping GIF output.
//!
//! A [`FrameRenderer`] turns each computed frame into a flat RGBA8 buffer:
//! field through colormap, blended over a fitted background (or black), with
//! particle markers stamped last. [`write_gif`] drives a frame iterator
//! through the renderer and encodes an infinitely looping GIF, buffering the
//! encoded bytes in memory so a mid-sequence failure never leaves a truncated
//! file on disk.

use aurora_core::error::AuroraError;
use aurora_core::sequencer::Frame;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, RgbaImage};
use std::fs;
use std::path::Path;

use crate::background::Backdrop;
use crate::colormap::Colormap;
use crate::pixel::{blend_over, draw_particles, field_to_rgba};

/// Composites frames into RGBA8 buffers.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    width: usize,
    height: usize,
    clim: (f64, f64),
    colormap: Colormap,
    alpha: f64,
    y_range: (f64, f64),
    background: Option<Vec<u8>>,
}

impl FrameRenderer {
    /// Creates a renderer for `width x height` frames over the given display
    /// range and colormap. `y_range` places particle radii on the raster.
    ///
    /// Without a backdrop the field is blended over black; the default
    /// overlay opacity is 1.
    pub fn new(
        width: usize,
        height: usize,
        clim: (f64, f64),
        colormap: Colormap,
        y_range: (f64, f64),
    ) -> Self {
        Self {
            width,
            height,
            clim,
            colormap,
            alpha: 1.0,
            y_range,
            background: None,
        }
    }

    /// Sets the field overlay opacity, clamped to [0, 1] at blend time.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Attaches a backdrop, stretched once to the frame size.
    ///
    /// Returns `AuroraError::InvalidDimensions` if the frame dimensions
    /// overflow `u32`.
    pub fn with_backdrop(mut self, backdrop: &Backdrop) -> Result<Self, AuroraError> {
        let w = u32::try_from(self.width).map_err(|_| AuroraError::InvalidDimensions)?;
        let h = u32::try_from(self.height).map_err(|_| AuroraError::InvalidDimensions)?;
        self.background = Some(backdrop.fit(w, h).into_raw());
        Ok(self)
    }

    /// Renders one frame to an opaque RGBA8 buffer of length
    /// `width * height * 4`.
    ///
    /// Returns `AuroraError::DimensionMismatch` if the frame's field does not
    /// match the renderer's dimensions.
    pub fn render(&self, frame: &Frame) -> Result<Vec<u8>, AuroraError> {
        let overlay = field_to_rgba(&frame.field, self.clim, &self.colormap);
        let mut rgba = match &self.background {
            Some(bg) => blend_over(&overlay, bg, self.alpha)?,
            None => {
                let black = vec![0u8; self.width * self.height * 4];
                blend_over(&overlay, &black, self.alpha)?
            }
        };
        if let Some(particles) = &frame.particles {
            draw_particles(&mut rgba, self.width, self.height, particles, self.y_range);
        }
        Ok(rgba)
    }

    /// Frame width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }
}

/// Renders every frame and writes an infinitely looping GIF to `path`.
///
/// Frames are encoded into an in-memory buffer; the file is written only once
/// the whole sequence has encoded successfully, so a generator failure part
/// way through leaves no output behind. `fps` must be at least 1.
///
/// Returns the number of frames written.
pub fn write_gif<I>(
    frames: I,
    renderer: &FrameRenderer,
    fps: u32,
    path: &Path,
) -> Result<usize, AuroraError>
where
    I: IntoIterator<Item = Result<Frame, AuroraError>>,
{
    if fps == 0 {
        return Err(AuroraError::param("fps", "must be at least 1"));
    }
    let w = u32::try_from(renderer.width()).map_err(|_| AuroraError::InvalidDimensions)?;
    let h = u32::try_from(renderer.height()).map_err(|_| AuroraError::InvalidDimensions)?;
    let delay = Delay::from_numer_denom_ms(1000, fps);

    let mut buf = Vec::new();
    let mut count = 0usize;
    {
        let mut encoder = GifEncoder::new(&mut buf);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| AuroraError::Io(e.to_string()))?;
        for frame in frames {
            let frame = frame?;
            let rgba = renderer.render(&frame)?;
            let img = RgbaImage::from_raw(w, h, rgba)
                .ok_or_else(|| AuroraError::Io("RGBA buffer size mismatch".into()))?;
            encoder
                .encode_frame(image::Frame::from_parts(img, 0, 0, delay))
                .map_err(|e| AuroraError::Io(e.to_string()))?;
            count += 1;
            log::debug!("encoded frame {} at t = {}", frame.index, frame.time);
        }
    }

    fs::write(path, &buf).map_err(|e| AuroraError::Io(e.to_string()))?;
    log::info!("wrote {count} frames to {}", path.display());
    Ok(count)
}
