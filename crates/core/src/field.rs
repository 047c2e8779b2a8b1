//! Two-dimensional scalar intensity field.
//!
//! A `ScalarField` stores `width * height` raw f64 intensities in row-major
//! layout. Raw fields are unbounded; [`ScalarField::normalize`] produces a
//! new field saturated into a fixed display interval for color mapping. No
//! field is mutated after creation by the pipeline.

use crate::error::AuroraError;
use crate::grid::Grid;

/// A 2D scalar field of raw intensity values, same shape as the grid that
/// produced it.
#[derive(Debug, Clone)]
pub struct ScalarField {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl ScalarField {
    /// Creates a zero-filled field of the given dimensions.
    ///
    /// Returns `AuroraError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, AuroraError> {
        if width == 0 || height == 0 {
            return Err(AuroraError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(AuroraError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            data: vec![0.0; len],
        })
    }

    /// Creates a field from a pre-built row-major data vector, validating
    /// that `data.len() == width * height`.
    pub fn from_data(width: usize, height: usize, data: Vec<f64>) -> Result<Self, AuroraError> {
        if width == 0 || height == 0 {
            return Err(AuroraError::InvalidDimensions);
        }
        let expected = width
            .checked_mul(height)
            .ok_or(AuroraError::InvalidDimensions)?;
        if data.len() != expected {
            return Err(AuroraError::DimensionMismatch {
                lhs_w: width,
                lhs_h: height,
                rhs_w: data.len(),
                rhs_h: 1,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Evaluates `f(x, y)` at every cell of `grid` and collects the result
    /// into a field of the same shape.
    pub fn from_grid_fn<F>(grid: &Grid, mut f: F) -> ScalarField
    where
        F: FnMut(f64, f64) -> f64,
    {
        let data = grid
            .x_data()
            .iter()
            .zip(grid.y_data().iter())
            .map(|(&x, &y)| f(x, y))
            .collect();
        // Shape comes from the grid, which already validated its dimensions.
        ScalarField {
            width: grid.width(),
            height: grid.height(),
            data,
        }
    }

    /// Field width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Value at `(col, row)`. Panics if the coordinates are out of bounds.
    pub fn get(&self, col: usize, row: usize) -> f64 {
        self.data[row * self.width + col]
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// True when this field has the same shape as `grid`.
    pub fn matches_grid(&self, grid: &Grid) -> bool {
        self.width == grid.width() && self.height == grid.height()
    }

    /// Element-wise sum of two fields, unbounded.
    ///
    /// Returns `AuroraError::DimensionMismatch` if the fields differ in size.
    pub fn add(&self, other: &ScalarField) -> Result<ScalarField, AuroraError> {
        if self.width != other.width || self.height != other.height {
            return Err(AuroraError::DimensionMismatch {
                lhs_w: self.width,
                lhs_h: self.height,
                rhs_w: other.width,
                rhs_h: other.height,
            });
        }
        Ok(ScalarField {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a + b)
                .collect(),
        })
    }

    /// Saturates every value into `[lo, hi]`, producing a new field suitable
    /// for color mapping.
    ///
    /// The same bounds must be applied to every frame of a run so brightness
    /// stays comparable across the sequence. NaN inputs map to `lo`.
    ///
    /// Returns `AuroraError::InvalidInterval` unless both bounds are finite
    /// and `lo < hi`.
    pub fn normalize(&self, lo: f64, hi: f64) -> Result<ScalarField, AuroraError> {
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(AuroraError::InvalidInterval { low: lo, high: hi });
        }
        Ok(ScalarField {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .map(|&v| if v.is_nan() { lo } else { v.clamp(lo, hi) })
                .collect(),
        })
    }

    /// Iterates over all cells yielding `(col, row, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data.iter().enumerate().map(|(i, &v)| {
            let col = i % self.width;
            let row = i / self.width;
            (col, row, v)
        })
    }
}
