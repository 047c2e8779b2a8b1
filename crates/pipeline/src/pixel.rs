//! Pure-computation RGBA buffer conversion and compositing.
//!
//! Maps a normalized field through a colormap to an opaque RGBA8 buffer,
//! blends it over a background, and stamps particle markers. No I/O here;
//! the snapshot and animation modules own the encoding.

use crate::colormap::Colormap;
use aurora_core::error::AuroraError;
use aurora_core::field::ScalarField;
use aurora_core::particle::ParticleSet;
use std::f64::consts::TAU;

/// Particle marker color (white, like the scatter overlay it replaces).
const MARKER: [u8; 3] = [255, 255, 255];

/// Maps field values through a colormap to produce an opaque RGBA8 buffer.
///
/// Each value is positioned linearly within `[clim.0, clim.1]` to give the
/// colormap parameter; the field is expected to be normalized into that
/// interval already. The buffer length is `width * height * 4`.
pub fn field_to_rgba(field: &ScalarField, clim: (f64, f64), colormap: &Colormap) -> Vec<u8> {
    let (lo, hi) = clim;
    let span = hi - lo;
    field
        .data()
        .iter()
        .flat_map(|&v| {
            let srgb = colormap.sample((v - lo) / span);
            let r = (srgb.r * 255.0).round() as u8;
            let g = (srgb.g * 255.0).round() as u8;
            let b = (srgb.b * 255.0).round() as u8;
            [r, g, b, 255u8]
        })
        .collect()
}

/// Blends `overlay` over `background` with a constant overlay opacity,
/// producing an opaque result.
///
/// Both buffers must be RGBA8 of identical length; mismatched lengths return
/// `AuroraError::DimensionMismatch`. `alpha` is clamped to [0, 1]; 1 keeps
/// only the overlay, 0 only the background.
pub fn blend_over(overlay: &[u8], background: &[u8], alpha: f64) -> Result<Vec<u8>, AuroraError> {
    if overlay.len() != background.len() {
        return Err(AuroraError::DimensionMismatch {
            lhs_w: overlay.len() / 4,
            lhs_h: 1,
            rhs_w: background.len() / 4,
            rhs_h: 1,
        });
    }
    let a = alpha.clamp(0.0, 1.0);
    Ok(overlay
        .chunks_exact(4)
        .zip(background.chunks_exact(4))
        .flat_map(|(fg, bg)| {
            let mix = |f: u8, b: u8| (a * f as f64 + (1.0 - a) * b as f64).round() as u8;
            [mix(fg[0], bg[0]), mix(fg[1], bg[1]), mix(fg[2], bg[2]), 255u8]
        })
        .collect())
}

/// Stamps one marker pixel (plus its 4-neighborhood) per particle into an
/// RGBA8 buffer.
///
/// The particle's angular coordinate maps linearly from `[0, 2*pi)` across
/// the full raster width and its radius onto the y domain; particles whose
/// radius falls outside the domain are skipped. The angle needs no bounds
/// check because the trajectory generator wraps it every frame.
pub fn draw_particles(
    rgba: &mut [u8],
    width: usize,
    height: usize,
    particles: &ParticleSet,
    y_range: (f64, f64),
) {
    let (y_lo, y_hi) = y_range;
    for p in particles.iter() {
        let fx = p.theta / TAU;
        let fy = (p.radius - y_lo) / (y_hi - y_lo);
        if !(0.0..=1.0).contains(&fy) {
            continue;
        }
        let col = ((fx * width as f64) as usize).min(width - 1);
        let row = ((fy * height as f64) as usize).min(height - 1);
        stamp(rgba, width, col, row);
        if col > 0 {
            stamp(rgba, width, col - 1, row);
        }
        if col + 1 < width {
            stamp(rgba, width, col + 1, row);
        }
        if row > 0 {
            stamp(rgba, width, col, row - 1);
        }
        if row + 1 < height {
            stamp(rgba, width, col, row + 1);
        }
    }
}

fn stamp(rgba: &mut [u8], width: usize, col: usize, row: usize) {
    let i = (row * width + col) * 4;
    rgba[i] = MARKER[0];
    rgba[i + 1] = MARKER[1];
    rgba[i + 2] = MARKER[2];
    rgba[i + 3] = 255;
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_core::particle::Particle;

    #[test]
    fn field_to_rgba_correct_length_and_opaque() {
        let field = ScalarField::new(8, 4).unwrap();
        let buf = field_to_rgba(&field, (-1.0, 1.0), &Colormap::plasma());
        assert_eq!(buf.len(), 8 * 4 * 4);
        for px in buf.chunks_exact(4) {
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn field_to_rgba_boundary_colors() {
        let cmap = Colormap::from_hex(&["#000000", "#ffffff"]).unwrap();
        let low = ScalarField::from_data(1, 1, vec![-1.0]).unwrap();
        let high = ScalarField::from_data(1, 1, vec![1.0]).unwrap();
        let buf_low = field_to_rgba(&low, (-1.0, 1.0), &cmap);
        let buf_high = field_to_rgba(&high, (-1.0, 1.0), &cmap);
        assert!(buf_low[0] < 10 && buf_low[1] < 10 && buf_low[2] < 10);
        assert!(buf_high[0] > 245 && buf_high[1] > 245 && buf_high[2] > 245);
    }

    #[test]
    fn field_to_rgba_midpoint_lands_mid_gradient() {
        let cmap = Colormap::from_hex(&["#000000", "#ffffff"]).unwrap();
        let mid = ScalarField::from_data(1, 1, vec![0.0]).unwrap();
        let buf = field_to_rgba(&mid, (-1.0, 1.0), &cmap);
        assert!((i32::from(buf[0]) - 128).abs() <= 2, "got {}", buf[0]);
    }

    #[test]
    fn blend_full_alpha_keeps_overlay() {
        let fg = vec![200, 100, 50, 255];
        let bg = vec![10, 20, 30, 255];
        let out = blend_over(&fg, &bg, 1.0).unwrap();
        assert_eq!(&out[..3], &[200, 100, 50]);
    }

    #[test]
    fn blend_zero_alpha_keeps_background() {
        let fg = vec![200, 100, 50, 255];
        let bg = vec![10, 20, 30, 255];
        let out = blend_over(&fg, &bg, 0.0).unwrap();
        assert_eq!(&out[..3], &[10, 20, 30]);
    }

    #[test]
    fn blend_half_alpha_averages_channels() {
        let fg = vec![200, 100, 50, 255];
        let bg = vec![100, 200, 150, 255];
        let out = blend_over(&fg, &bg, 0.5).unwrap();
        assert_eq!(&out[..3], &[150, 150, 100]);
        assert_eq!(out[3], 255);
    }

    #[test]
    fn blend_rejects_mismatched_buffer_lengths() {
        let fg = vec![0u8; 4 * 4];
        let bg = vec![0u8; 4 * 5];
        assert!(matches!(
            blend_over(&fg, &bg, 0.5),
            Err(AuroraError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn draw_particles_stamps_white_marker() {
        let mut rgba = vec![0u8; 16 * 16 * 4];
        let set = ParticleSet::from_points(vec![Particle {
            theta: 0.0,
            radius: 70.0,
        }]);
        draw_particles(&mut rgba, 16, 16, &set, (50.0, 90.0));
        // radius 70 is halfway up [50, 90] -> row 8, theta 0 -> col 0.
        let i = (8 * 16) * 4;
        assert_eq!(&rgba[i..i + 4], &[255, 255, 255, 255]);
    }

    #[test]
    fn draw_particles_skips_out_of_domain_radius() {
        let mut rgba = vec![0u8; 8 * 8 * 4];
        let set = ParticleSet::from_points(vec![Particle {
            theta: 1.0,
            radius: 120.0,
        }]);
        draw_particles(&mut rgba, 8, 8, &set, (50.0, 90.0));
        assert!(rgba.iter().all(|&b| b == 0), "marker drawn out of domain");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn dimension() -> impl Strategy<Value = usize> {
            1_usize..=32
        }

        proptest! {
            #[test]
            fn field_to_rgba_length_is_always_four_per_cell(
                w in dimension(),
                h in dimension(),
            ) {
                let field = ScalarField::new(w, h).unwrap();
                let buf = field_to_rgba(&field, (-1.0, 1.0), &Colormap::plasma());
                prop_assert_eq!(buf.len(), w * h * 4);
            }

            #[test]
            fn blend_output_is_opaque_for_any_alpha(
                pixels in prop::collection::vec(0_u8..=255, 4..=256),
                alpha in -1.0_f64..2.0,
            ) {
                // Truncate to whole RGBA pixels so both buffers line up.
                let len = pixels.len() - pixels.len() % 4;
                let fg = &pixels[..len];
                let bg = vec![7u8; len];
                let out = blend_over(fg, &bg, alpha).unwrap();
                prop_assert_eq!(out.len(), len);
                for px in out.chunks_exact(4) {
                    prop_assert_eq!(px[3], 255);
                }
            }
        }
    }
}
