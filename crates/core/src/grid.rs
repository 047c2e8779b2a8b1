//! Fixed 2D coordinate mesh the field generators are evaluated over.
//!
//! A `Grid` holds two row-major coordinate matrices X and Y of shape
//! `height x width`, built once from the outer product of linearly spaced
//! samples along each axis. It is immutable after construction.
//!
//! The oval variant reads the X axis as magnetic local time in hours;
//! [`theta_from_local_time`] converts that coordinate to radians.

use crate::error::AuroraError;

/// Length of the local-time period, in hours. Angular coordinates wrap at
/// this value.
pub const LOCAL_TIME_PERIOD: f64 = 24.0;

/// Converts a local-time coordinate (hours) into an angle in radians:
/// `theta = 2*pi * t / 24`.
pub fn theta_from_local_time(local_time: f64) -> f64 {
    std::f64::consts::TAU * local_time / LOCAL_TIME_PERIOD
}

/// Returns `count` evenly spaced samples over the closed interval
/// `[low, high]`, endpoints included.
///
/// A single sample yields `[low]`. The caller validates `count >= 1` and the
/// interval ordering; this helper assumes both.
pub fn linspace(low: f64, high: f64, count: usize) -> Vec<f64> {
    if count == 1 {
        return vec![low];
    }
    let step = (high - low) / (count - 1) as f64;
    (0..count).map(|i| low + step * i as f64).collect()
}

/// A fixed 2D coordinate mesh: X and Y matrices of shape `height x width`.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Grid {
    /// Builds the mesh from two closed intervals and two sample counts.
    ///
    /// `x_range` is sampled across columns, `y_range` across rows; every
    /// combination of an x-sample and a y-sample produces one cell.
    ///
    /// Returns `AuroraError::InvalidDimensions` if either count is zero or
    /// `width * height` overflows, and `AuroraError::InvalidInterval` if a
    /// range is not finite or not well ordered (`low < high`).
    pub fn new(
        x_range: (f64, f64),
        y_range: (f64, f64),
        width: usize,
        height: usize,
    ) -> Result<Self, AuroraError> {
        if width == 0 || height == 0 {
            return Err(AuroraError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(AuroraError::InvalidDimensions)?;
        check_interval(x_range)?;
        check_interval(y_range)?;

        let xs = linspace(x_range.0, x_range.1, width);
        let ys = linspace(y_range.0, y_range.1, height);

        let mut x = Vec::with_capacity(len);
        let mut y = Vec::with_capacity(len);
        for &yv in &ys {
            for &xv in &xs {
                x.push(xv);
                y.push(yv);
            }
        }
        Ok(Self {
            width,
            height,
            x,
            y,
        })
    }

    /// Grid width in cells (x-axis sample count).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells (y-axis sample count).
    pub fn height(&self) -> usize {
        self.height
    }

    /// X coordinate at `(col, row)`.
    pub fn x(&self, col: usize, row: usize) -> f64 {
        self.x[row * self.width + col]
    }

    /// Y coordinate at `(col, row)`.
    pub fn y(&self, col: usize, row: usize) -> f64 {
        self.y[row * self.width + col]
    }

    /// Read-only access to the row-major X coordinate matrix.
    pub fn x_data(&self) -> &[f64] {
        &self.x
    }

    /// Read-only access to the row-major Y coordinate matrix.
    pub fn y_data(&self) -> &[f64] {
        &self.y
    }

    /// Iterates over all cells yielding `(col, row, x, y)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64, f64)> + '_ {
        self.x.iter().zip(self.y.iter()).enumerate().map(|(i, (&x, &y))| {
            let col = i % self.width;
            let row = i / self.width;
            (col, row, x, y)
        })
    }
}

fn check_interval((low, high): (f64, f64)) -> Result<(), AuroraError> {
    if !low.is_finite() || !high.is_finite() || low >= high {
        return Err(AuroraError::InvalidInterval { low, high });
    }
    Ok(())
}
