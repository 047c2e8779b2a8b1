#![deny(unsafe_code)]
//! Multi-octave coherent-noise field generator.
//!
//! For every grid cell independently, evaluates Perlin fBm at
//! `(x + t * drift, y + t * drift)`: `octaves` noise layers whose amplitude
//! decays by `persistence` and whose frequency grows by `lacunarity`, with
//! the sum rescaled by the total amplitude so output stays in roughly
//! [-1, 1].
//!
//! The noise source is seeded once at construction and never mutated, so the
//! generator is a pure function of its coordinate inputs. Cells are
//! independent; rows are evaluated in parallel with rayon and the result is
//! bit-identical to serial evaluation.
//!
//! The `noise` crate is pinned to `=0.9.0`: a different Perlin permutation
//! table would silently change every field a given seed reproduces.

use aurora_core::error::AuroraError;
use aurora_core::field::ScalarField;
use aurora_core::generator::FieldGenerator;
use aurora_core::grid::Grid;
use aurora_core::params::{param_f64, param_u32};
use noise::{NoiseFn, Perlin};
use rayon::prelude::*;
use serde_json::{json, Value};

/// Default number of noise layers.
const DEFAULT_OCTAVES: u32 = 4;
/// Default per-octave amplitude decay.
const DEFAULT_PERSISTENCE: f64 = 0.5;
/// Default per-octave frequency growth.
const DEFAULT_LACUNARITY: f64 = 2.0;
/// Default coordinate drift per unit time.
const DEFAULT_DRIFT: f64 = 0.1;
/// Octave counts above this add nothing visible and only burn time.
const MAX_OCTAVES: u32 = 16;

/// Coherent-noise field generator.
pub struct PerlinGenerator {
    noise: Perlin,
    seed: u32,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
    drift: f64,
}

impl PerlinGenerator {
    /// Creates a generator with explicit fBm parameters.
    ///
    /// Returns `AuroraError::InvalidParam` unless `1 <= octaves <= 16` and
    /// `persistence`, `lacunarity` are positive and finite (`drift` just
    /// finite). These bounds keep every later evaluation NaN-free.
    pub fn new(
        seed: u32,
        octaves: u32,
        persistence: f64,
        lacunarity: f64,
        drift: f64,
    ) -> Result<Self, AuroraError> {
        if octaves == 0 || octaves > MAX_OCTAVES {
            return Err(AuroraError::param(
                "octaves",
                format!("must be between 1 and {MAX_OCTAVES}"),
            ));
        }
        if !persistence.is_finite() || persistence <= 0.0 {
            return Err(AuroraError::param(
                "persistence",
                "must be finite and positive",
            ));
        }
        if !lacunarity.is_finite() || lacunarity <= 0.0 {
            return Err(AuroraError::param(
                "lacunarity",
                "must be finite and positive",
            ));
        }
        if !drift.is_finite() {
            return Err(AuroraError::param("drift", "must be finite"));
        }
        Ok(Self {
            noise: Perlin::new(seed),
            seed,
            octaves,
            persistence,
            lacunarity,
            drift,
        })
    }

    /// Creates a generator with the classic parameters (octaves 4,
    /// persistence 0.5, lacunarity 2.0, drift 0.1).
    pub fn with_defaults(seed: u32) -> Self {
        Self::new(
            seed,
            DEFAULT_OCTAVES,
            DEFAULT_PERSISTENCE,
            DEFAULT_LACUNARITY,
            DEFAULT_DRIFT,
        )
        .expect("default noise parameters are valid")
    }

    /// Creates a generator from a JSON params object, falling back to
    /// defaults for missing keys.
    pub fn from_json(seed: u32, params: &Value) -> Result<Self, AuroraError> {
        Self::new(
            seed,
            param_u32(params, "octaves", DEFAULT_OCTAVES),
            param_f64(params, "persistence", DEFAULT_PERSISTENCE),
            param_f64(params, "lacunarity", DEFAULT_LACUNARITY),
            param_f64(params, "drift", DEFAULT_DRIFT),
        )
    }

    /// fBm value at one drifted coordinate pair. Pure: same inputs, same bits.
    fn value_at(&self, x: f64, y: f64, t: f64) -> f64 {
        let sx = x + t * self.drift;
        let sy = y + t * self.drift;
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut amplitude_sum = 0.0;
        for _ in 0..self.octaves {
            total += self.noise.get([sx * frequency, sy * frequency]) * amplitude;
            amplitude_sum += amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }
        total / amplitude_sum
    }
}

impl FieldGenerator for PerlinGenerator {
    fn sample(&self, grid: &Grid, t: f64) -> Result<ScalarField, AuroraError> {
        let width = grid.width();
        let xs = grid.x_data();
        let ys = grid.y_data();

        // Rows are independent, so a parallel map over row chunks produces
        // the same bits as the serial loop.
        let mut data = vec![0.0_f64; xs.len()];
        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, out)| {
                let base = row * width;
                for (col, slot) in out.iter_mut().enumerate() {
                    let i = base + col;
                    *slot = self.value_at(xs[i], ys[i], t);
                }
            });

        ScalarField::from_data(width, grid.height(), data)
    }

    fn params(&self) -> Value {
        json!({
            "seed": self.seed,
            "octaves": self.octaves,
            "persistence": self.persistence,
            "lacunarity": self.lacunarity,
            "drift": self.drift,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "octaves": {
                "type": "integer",
                "default": DEFAULT_OCTAVES,
                "min": 1,
                "max": MAX_OCTAVES,
                "description": "Number of noise layers"
            },
            "persistence": {
                "type": "number",
                "default": DEFAULT_PERSISTENCE,
                "min": 0.0,
                "max": 1.0,
                "description": "Per-octave amplitude decay"
            },
            "lacunarity": {
                "type": "number",
                "default": DEFAULT_LACUNARITY,
                "min": 1.0,
                "max": 4.0,
                "description": "Per-octave frequency growth"
            },
            "drift": {
                "type": "number",
                "default": DEFAULT_DRIFT,
                "description": "Coordinate drift per unit time"
            }
        })
    }
}
