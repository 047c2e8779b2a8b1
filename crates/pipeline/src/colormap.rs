//! Named sRGB colormaps sampled by linear interpolation.
//!
//! Stops are evenly spaced along the `t` parameter: `sample(0.0)` returns the
//! first stop, `sample(1.0)` the last. The stop tables approximate the usual
//! scientific colormaps; their exact values are cosmetic, not contractual.

use aurora_core::error::AuroraError;

/// An sRGB color with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    /// Parses "#rrggbb" or "rrggbb" (case insensitive).
    pub fn from_hex(hex: &str) -> Result<Self, AuroraError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AuroraError::param(
                "color",
                format!("not a hex color: {hex:?}"),
            ));
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map(|v| v as f64 / 255.0);
        Ok(Self {
            r: channel(&digits[0..2]).map_err(|_| AuroraError::param("color", "bad red"))?,
            g: channel(&digits[2..4]).map_err(|_| AuroraError::param("color", "bad green"))?,
            b: channel(&digits[4..6]).map_err(|_| AuroraError::param("color", "bad blue"))?,
        })
    }
}

/// All available colormap names.
const COLORMAP_NAMES: &[&str] = &["plasma", "viridis", "inferno", "magma", "aurora"];

/// A gradient of sRGB stops sampled over [0, 1].
#[derive(Debug, Clone)]
pub struct Colormap {
    stops: Vec<Srgb>,
}

impl Colormap {
    /// Creates a colormap from explicit stops. Requires at least one.
    pub fn new(stops: Vec<Srgb>) -> Result<Self, AuroraError> {
        if stops.is_empty() {
            return Err(AuroraError::param("stops", "need at least one color"));
        }
        Ok(Self { stops })
    }

    /// Creates a colormap by parsing hex color strings.
    pub fn from_hex(hexes: &[&str]) -> Result<Self, AuroraError> {
        let stops = hexes
            .iter()
            .map(|h| Srgb::from_hex(h))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(stops)
    }

    /// Looks up a built-in colormap by name.
    ///
    /// Returns `AuroraError::UnknownColormap` for unrecognized names.
    pub fn from_name(name: &str) -> Result<Self, AuroraError> {
        match name {
            "plasma" => Ok(Self::plasma()),
            "viridis" => Ok(Self::viridis()),
            "inferno" => Ok(Self::inferno()),
            "magma" => Ok(Self::magma()),
            "aurora" => Ok(Self::aurora()),
            _ => Err(AuroraError::UnknownColormap(name.to_string())),
        }
    }

    /// Returns a slice of all built-in colormap names.
    pub fn list_names() -> &'static [&'static str] {
        COLORMAP_NAMES
    }

    /// Samples the gradient at parameter `t` in [0, 1].
    ///
    /// `t` is clamped; NaN maps to 0. A single-stop map returns that stop
    /// for any `t`.
    pub fn sample(&self, t: f64) -> Srgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let n = self.stops.len();
        if n == 1 {
            return self.stops[0];
        }
        let scaled = t * (n - 1) as f64;
        let idx = (scaled as usize).min(n - 2);
        let frac = scaled - idx as f64;
        let c0 = self.stops[idx];
        let c1 = self.stops[idx + 1];
        Srgb {
            r: c0.r + frac * (c1.r - c0.r),
            g: c0.g + frac * (c1.g - c0.g),
            b: c0.b + frac * (c1.b - c0.b),
        }
    }

    // -- Built-in colormaps --

    /// Deep violet through magenta and orange to yellow.
    pub fn plasma() -> Self {
        Self::from_hex(&[
            "#0d0887", "#6a00a8", "#b12a90", "#e16462", "#fca636", "#f0f921",
        ])
        .expect("plasma stop hex values are valid")
    }

    /// Dark purple through teal and green to yellow.
    pub fn viridis() -> Self {
        Self::from_hex(&[
            "#440154", "#414487", "#2a788e", "#22a884", "#7ad151", "#fde725",
        ])
        .expect("viridis stop hex values are valid")
    }

    /// Near-black through red and orange to pale yellow.
    pub fn inferno() -> Self {
        Self::from_hex(&[
            "#000004", "#420a68", "#932667", "#dd513a", "#fca50a", "#fcffa4",
        ])
        .expect("inferno stop hex values are valid")
    }

    /// Near-black through purple and rose to cream.
    pub fn magma() -> Self {
        Self::from_hex(&[
            "#000004", "#3b0f70", "#8c2981", "#de4968", "#fe9f6d", "#fcfdbf",
        ])
        .expect("magma stop hex values are valid")
    }

    /// Night sky to green curtain to pale cyan.
    pub fn aurora() -> Self {
        Self::from_hex(&[
            "#02020e", "#07303a", "#0f6a4e", "#2d9d6e", "#7ae582", "#d8f9e8",
        ])
        .expect("aurora stop hex values are valid")
    }
}
