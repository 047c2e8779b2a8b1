#![deny(unsafe_code)]
//! Polar auroral-oval field generator and spiral particle trajectories.
//!
//! The grid's X axis is read as magnetic local time (MLT, hours over a
//! 24-hour period) and its Y axis as magnetic latitude (MLAT, degrees). The
//! displayed field is a time-independent Gaussian ring centered at the peak
//! latitude plus a sinusoidal disturbance in the angular coordinate whose
//! phase advances linearly with time.
//!
//! [`SpiralParticles`] overlays N points that sweep around the oval while
//! their latitude oscillates, re-derived from closed form every frame.

use aurora_core::error::AuroraError;
use aurora_core::field::ScalarField;
use aurora_core::generator::FieldGenerator;
use aurora_core::grid::{theta_from_local_time, Grid, LOCAL_TIME_PERIOD};
use aurora_core::params::{param_f64, param_usize};
use aurora_core::particle::{Particle, ParticleGenerator, ParticleSet};
use serde_json::{json, Value};
use std::f64::consts::TAU;

/// Default peak latitude of the oval, degrees.
const DEFAULT_PEAK_MLAT: f64 = 70.0;
/// Default standard deviation of the Gaussian ring, degrees.
const DEFAULT_WIDTH: f64 = 3.0;
/// Default peak ring intensity.
const DEFAULT_PEAK_INTENSITY: f64 = 1.0;
/// Default disturbance amplitude.
const DEFAULT_AMP: f64 = 0.3;
/// Default angular wavenumber of the disturbance.
const DEFAULT_FREQ: f64 = 3.0;
/// Default disturbance phase advance per unit time.
const DEFAULT_PHASE_RATE: f64 = 0.1;
/// Default latitude envelope denominator of the disturbance.
const DEFAULT_ENVELOPE: f64 = 20.0;

/// Gaussian-ring oval generator with an angular disturbance term.
#[derive(Debug, Clone, Copy)]
pub struct OvalGenerator {
    peak_mlat: f64,
    width: f64,
    peak_intensity: f64,
    amp: f64,
    freq: f64,
    phase_rate: f64,
    envelope: f64,
}

impl OvalGenerator {
    /// Creates a generator with explicit parameters.
    ///
    /// Returns `AuroraError::InvalidParam` unless `width` and `envelope` are
    /// positive and finite and the remaining values are finite. Zero widths
    /// would divide by zero inside the Gaussians.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        peak_mlat: f64,
        width: f64,
        peak_intensity: f64,
        amp: f64,
        freq: f64,
        phase_rate: f64,
        envelope: f64,
    ) -> Result<Self, AuroraError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(AuroraError::param("width", "must be finite and positive"));
        }
        if !envelope.is_finite() || envelope <= 0.0 {
            return Err(AuroraError::param(
                "envelope",
                "must be finite and positive",
            ));
        }
        for (name, v) in [
            ("peak_mlat", peak_mlat),
            ("peak_intensity", peak_intensity),
            ("amp", amp),
            ("freq", freq),
            ("phase_rate", phase_rate),
        ] {
            if !v.is_finite() {
                return Err(AuroraError::param(name, "must be finite"));
            }
        }
        Ok(Self {
            peak_mlat,
            width,
            peak_intensity,
            amp,
            freq,
            phase_rate,
            envelope,
        })
    }

    /// Time-dependent storm preset: disturbance amplitude 0.3, broad
    /// latitude envelope.
    pub fn active() -> Self {
        Self {
            peak_mlat: DEFAULT_PEAK_MLAT,
            width: DEFAULT_WIDTH,
            peak_intensity: DEFAULT_PEAK_INTENSITY,
            amp: DEFAULT_AMP,
            freq: DEFAULT_FREQ,
            phase_rate: DEFAULT_PHASE_RATE,
            envelope: DEFAULT_ENVELOPE,
        }
    }

    /// Quiet preset for static renders: weaker disturbance, tighter envelope.
    pub fn quiet() -> Self {
        Self {
            amp: 0.2,
            envelope: 10.0,
            ..Self::active()
        }
    }

    /// Creates a generator from a JSON params object, falling back to the
    /// [`active`](Self::active) preset values for missing keys.
    pub fn from_json(params: &Value) -> Result<Self, AuroraError> {
        Self::new(
            param_f64(params, "peak_mlat", DEFAULT_PEAK_MLAT),
            param_f64(params, "width", DEFAULT_WIDTH),
            param_f64(params, "peak_intensity", DEFAULT_PEAK_INTENSITY),
            param_f64(params, "amp", DEFAULT_AMP),
            param_f64(params, "freq", DEFAULT_FREQ),
            param_f64(params, "phase_rate", DEFAULT_PHASE_RATE),
            param_f64(params, "envelope", DEFAULT_ENVELOPE),
        )
    }

    /// Time-independent Gaussian ring intensity at a latitude.
    fn ring(&self, mlat: f64) -> f64 {
        let d = mlat - self.peak_mlat;
        self.peak_intensity * (-(d * d) / (2.0 * self.width * self.width)).exp()
    }

    /// Angular disturbance at a latitude and angle, phase advancing with `t`.
    fn disturbance(&self, mlat: f64, theta: f64, t: f64) -> f64 {
        let d = mlat - self.peak_mlat;
        self.amp * (self.freq * theta + self.phase_rate * t).sin() * (-(d * d) / self.envelope).exp()
    }
}

impl FieldGenerator for OvalGenerator {
    fn sample(&self, grid: &Grid, t: f64) -> Result<ScalarField, AuroraError> {
        Ok(ScalarField::from_grid_fn(grid, |mlt, mlat| {
            let theta = theta_from_local_time(mlt);
            self.ring(mlat) + self.disturbance(mlat, theta, t)
        }))
    }

    fn params(&self) -> Value {
        json!({
            "peak_mlat": self.peak_mlat,
            "width": self.width,
            "peak_intensity": self.peak_intensity,
            "amp": self.amp,
            "freq": self.freq,
            "phase_rate": self.phase_rate,
            "envelope": self.envelope,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "peak_mlat": {
                "type": "number",
                "default": DEFAULT_PEAK_MLAT,
                "min": 50.0,
                "max": 90.0,
                "description": "Latitude of peak ring intensity, degrees"
            },
            "width": {
                "type": "number",
                "default": DEFAULT_WIDTH,
                "min": 0.1,
                "max": 20.0,
                "description": "Gaussian ring standard deviation, degrees"
            },
            "peak_intensity": {
                "type": "number",
                "default": DEFAULT_PEAK_INTENSITY,
                "description": "Ring intensity at the peak latitude"
            },
            "amp": {
                "type": "number",
                "default": DEFAULT_AMP,
                "description": "Disturbance amplitude"
            },
            "freq": {
                "type": "number",
                "default": DEFAULT_FREQ,
                "description": "Angular wavenumber of the disturbance"
            },
            "phase_rate": {
                "type": "number",
                "default": DEFAULT_PHASE_RATE,
                "description": "Disturbance phase advance per unit time"
            },
            "envelope": {
                "type": "number",
                "default": DEFAULT_ENVELOPE,
                "min": 0.1,
                "description": "Latitude envelope denominator of the disturbance"
            }
        })
    }
}

/// Default particle count.
const DEFAULT_PARTICLE_COUNT: usize = 20;
/// Default center latitude the particles oscillate around, degrees.
const DEFAULT_CENTER: f64 = 70.0;
/// Default latitude oscillation amplitude, degrees.
const DEFAULT_AMPLITUDE: f64 = 5.0;
/// Default latitude oscillation angular speed.
const DEFAULT_OMEGA: f64 = 0.2;
/// Default local-time sweep per unit time, hours.
const DEFAULT_PARTICLE_DRIFT: f64 = 0.1;

/// Spiral particle trajectory generator.
///
/// Particle i starts at local time `linspace(0, period, N)[i]` and sweeps
/// forward by `drift * t`, wrapped into `[0, period)` every frame. Its
/// latitude oscillates around `center` with the phase seed
/// `linspace(0, 2*pi, N)[i]`.
#[derive(Debug, Clone, Copy)]
pub struct SpiralParticles {
    count: usize,
    center: f64,
    amplitude: f64,
    omega: f64,
    drift: f64,
    period: f64,
}

impl SpiralParticles {
    /// Creates a generator with explicit trajectory parameters.
    ///
    /// Returns `AuroraError::InvalidParam` unless `count >= 1`, `period` is
    /// positive and finite, and the remaining values are finite.
    pub fn new(
        count: usize,
        center: f64,
        amplitude: f64,
        omega: f64,
        drift: f64,
        period: f64,
    ) -> Result<Self, AuroraError> {
        if count == 0 {
            return Err(AuroraError::param("count", "must be at least 1"));
        }
        if !period.is_finite() || period <= 0.0 {
            return Err(AuroraError::param("period", "must be finite and positive"));
        }
        for (name, v) in [
            ("center", center),
            ("amplitude", amplitude),
            ("omega", omega),
            ("drift", drift),
        ] {
            if !v.is_finite() {
                return Err(AuroraError::param(name, "must be finite"));
            }
        }
        Ok(Self {
            count,
            center,
            amplitude,
            omega,
            drift,
            period,
        })
    }

    /// Creates `count` particles with the standard oval trajectory constants.
    pub fn with_defaults(count: usize) -> Result<Self, AuroraError> {
        Self::new(
            count,
            DEFAULT_CENTER,
            DEFAULT_AMPLITUDE,
            DEFAULT_OMEGA,
            DEFAULT_PARTICLE_DRIFT,
            LOCAL_TIME_PERIOD,
        )
    }

    /// Creates a generator from a JSON params object.
    pub fn from_json(params: &Value) -> Result<Self, AuroraError> {
        Self::new(
            param_usize(params, "count", DEFAULT_PARTICLE_COUNT),
            param_f64(params, "center", DEFAULT_CENTER),
            param_f64(params, "amplitude", DEFAULT_AMPLITUDE),
            param_f64(params, "omega", DEFAULT_OMEGA),
            param_f64(params, "drift", DEFAULT_PARTICLE_DRIFT),
            param_f64(params, "period", LOCAL_TIME_PERIOD),
        )
    }

    /// Number of particles per frame.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Evenly spaced seed over `[0, span]`, endpoints included.
    fn seed(&self, i: usize, span: f64) -> f64 {
        if self.count == 1 {
            return 0.0;
        }
        span * i as f64 / (self.count - 1) as f64
    }
}

impl ParticleGenerator for SpiralParticles {
    fn sample(&self, t: f64) -> ParticleSet {
        let points = (0..self.count)
            .map(|i| {
                let local_time = (self.seed(i, self.period) + self.drift * t)
                    .rem_euclid(self.period);
                let theta = TAU * local_time / self.period;
                let radius = self.center
                    + self.amplitude * (self.omega * t + self.seed(i, TAU)).sin();
                Particle { theta, radius }
            })
            .collect();
        ParticleSet::from_points(points)
    }

    fn params(&self) -> Value {
        json!({
            "count": self.count,
            "center": self.center,
            "amplitude": self.amplitude,
            "omega": self.omega,
            "drift": self.drift,
            "period": self.period,
        })
    }
}
