#![deny(unsafe_code)]
//! Generator registry and render/encode pipeline.
//!
//! This crate sits between `aurora-core` (which defines the generator traits)
//! and the individual generator crates. It dispatches generators by name,
//! maps normalized fields through colormaps to RGBA rasters, composites them
//! over an optional background image, and writes PNG snapshots or looping
//! animated GIFs.

pub mod animate;
pub mod background;
pub mod colormap;
pub mod pixel;
pub mod snapshot;

use aurora_core::error::AuroraError;
use aurora_core::field::ScalarField;
use aurora_core::generator::FieldGenerator;
use aurora_core::grid::{Grid, LOCAL_TIME_PERIOD};
use serde_json::Value;
use std::f64::consts::TAU;

/// All available generator names.
const GENERATOR_NAMES: &[&str] = &["harmonic", "perlin", "oval"];

/// Enumeration of all available field generators.
///
/// Wraps each generator implementation and delegates `FieldGenerator` trait
/// methods. Use [`GeneratorKind::from_name`] for string-based construction.
pub enum GeneratorKind {
    /// Closed-form harmonic wave superposition.
    Harmonic(aurora_harmonic::HarmonicGenerator),
    /// Multi-octave coherent noise.
    Perlin(aurora_perlin::PerlinGenerator),
    /// Polar Gaussian ring plus angular disturbance.
    Oval(aurora_oval::OvalGenerator),
}

impl GeneratorKind {
    /// Constructs a generator by name.
    ///
    /// `seed` only affects the noise variant; the closed-form generators
    /// ignore it. Returns `AuroraError::UnknownGenerator` for unrecognized
    /// names.
    pub fn from_name(name: &str, seed: u32, params: &Value) -> Result<Self, AuroraError> {
        match name {
            "harmonic" => Ok(GeneratorKind::Harmonic(
                aurora_harmonic::HarmonicGenerator::from_json(params)?,
            )),
            "perlin" => Ok(GeneratorKind::Perlin(
                aurora_perlin::PerlinGenerator::from_json(seed, params)?,
            )),
            "oval" => Ok(GeneratorKind::Oval(aurora_oval::OvalGenerator::from_json(
                params,
            )?)),
            _ => Err(AuroraError::UnknownGenerator(name.to_string())),
        }
    }

    /// Returns a slice of all recognized generator names.
    pub fn list_generators() -> &'static [&'static str] {
        GENERATOR_NAMES
    }

    /// The spatial domain this generator expects when none is given
    /// explicitly: `(x_range, y_range)`.
    ///
    /// The wave and noise variants sample `[0, 2*pi]` squared; the oval
    /// variant reads x as magnetic local time over a 24-hour period and y as
    /// magnetic latitude in degrees.
    pub fn default_domain(&self) -> ((f64, f64), (f64, f64)) {
        match self {
            GeneratorKind::Harmonic(_) | GeneratorKind::Perlin(_) => {
                ((0.0, TAU), (0.0, TAU))
            }
            GeneratorKind::Oval(_) => ((0.0, LOCAL_TIME_PERIOD), (50.0, 90.0)),
        }
    }
}

impl FieldGenerator for GeneratorKind {
    fn sample(&self, grid: &Grid, t: f64) -> Result<ScalarField, AuroraError> {
        match self {
            GeneratorKind::Harmonic(g) => g.sample(grid, t),
            GeneratorKind::Perlin(g) => g.sample(grid, t),
            GeneratorKind::Oval(g) => g.sample(grid, t),
        }
    }

    fn params(&self) -> Value {
        match self {
            GeneratorKind::Harmonic(g) => g.params(),
            GeneratorKind::Perlin(g) => g.params(),
            GeneratorKind::Oval(g) => g.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            GeneratorKind::Harmonic(g) => g.param_schema(),
            GeneratorKind::Perlin(g) => g.param_schema(),
            GeneratorKind::Oval(g) => g.param_schema(),
        }
    }
}
