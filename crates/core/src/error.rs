//! Error types for the aurora-engine core.

use thiserror::Error;

/// Errors produced by grid construction, field operations, and the pipeline.
#[derive(Debug, Error)]
pub enum AuroraError {
    /// Width or height was zero when creating a Grid or ScalarField.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// An interval had non-finite bounds or `low >= high`.
    #[error("invalid interval [{low}, {high}]: bounds must be finite with low < high")]
    InvalidInterval { low: f64, high: f64 },

    /// A generator parameter failed validation (zero decay, zero particle
    /// count, bad octave count, ...).
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// Two shapes disagreed (generator output vs grid, field vs field).
    #[error("dimension mismatch: ({lhs_w}, {lhs_h}) vs ({rhs_w}, {rhs_h})")]
    DimensionMismatch {
        lhs_w: usize,
        lhs_h: usize,
        rhs_w: usize,
        rhs_h: usize,
    },

    /// A requested generator name was not recognized.
    #[error("unknown generator: {0}")]
    UnknownGenerator(String),

    /// A requested colormap name was not recognized.
    #[error("unknown colormap: {0}")]
    UnknownColormap(String),

    /// Background load, snapshot, or animation write failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl AuroraError {
    /// Shorthand for an `InvalidParam` error.
    pub fn param(name: impl Into<String>, reason: impl Into<String>) -> Self {
        AuroraError::InvalidParam {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
