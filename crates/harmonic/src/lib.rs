#![deny(unsafe_code)]
//! Harmonic wave-superposition field generator.
//!
//! Sums 2-3 sinusoidal terms of the form
//! `amplitude * trig(frequency * x + phase_speed * t) * exp(-y / decay)`,
//! producing curtain-like intensity bands that drift horizontally with time
//! and fade with height. Fully closed-form: no randomness anywhere.
//!
//! The raw sum is not bounded to the display range; the pipeline saturates
//! it during normalization.

use aurora_core::error::AuroraError;
use aurora_core::field::ScalarField;
use aurora_core::generator::FieldGenerator;
use aurora_core::grid::Grid;
use aurora_core::params::param_f64;
use serde_json::{json, Value};
use std::f64::consts::PI;

/// Trigonometric carrier of a wave term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sin,
    Cos,
}

impl Waveform {
    fn eval(self, phase: f64) -> f64 {
        match self {
            Waveform::Sin => phase.sin(),
            Waveform::Cos => phase.cos(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Waveform::Sin => "sin",
            Waveform::Cos => "cos",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Waveform::Sin),
            "cos" => Some(Waveform::Cos),
            _ => None,
        }
    }
}

/// One sinusoidal term of the superposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    /// Peak contribution of this term.
    pub amplitude: f64,
    /// Spatial frequency along the x axis.
    pub frequency: f64,
    /// Temporal phase advance per unit time. Negative values drift the
    /// opposite way.
    pub phase_speed: f64,
    /// Exponential falloff constant along the y axis. Must be non-zero.
    pub decay: f64,
    /// Carrier function.
    pub waveform: Waveform,
}

impl Wave {
    fn value(&self, x: f64, y: f64, t: f64) -> f64 {
        self.amplitude
            * self.waveform.eval(self.frequency * x + self.phase_speed * t)
            * (-y / self.decay).exp()
    }

    fn validate(&self) -> Result<(), AuroraError> {
        if !self.decay.is_finite() || self.decay == 0.0 {
            return Err(AuroraError::param("decay", "must be finite and non-zero"));
        }
        for (name, v) in [
            ("amplitude", self.amplitude),
            ("frequency", self.frequency),
            ("phase_speed", self.phase_speed),
        ] {
            if !v.is_finite() {
                return Err(AuroraError::param(name, "must be finite"));
            }
        }
        Ok(())
    }

    fn from_json(value: &Value) -> Result<Self, AuroraError> {
        let waveform_name = value
            .get("waveform")
            .and_then(Value::as_str)
            .unwrap_or("sin");
        let waveform = Waveform::from_name(waveform_name)
            .ok_or_else(|| AuroraError::param("waveform", "expected \"sin\" or \"cos\""))?;
        Ok(Self {
            amplitude: param_f64(value, "amplitude", 0.5),
            frequency: param_f64(value, "frequency", 3.0),
            phase_speed: param_f64(value, "phase_speed", 1.0),
            decay: param_f64(value, "decay", PI),
            waveform,
        })
    }

    fn to_json(self) -> Value {
        json!({
            "amplitude": self.amplitude,
            "frequency": self.frequency,
            "phase_speed": self.phase_speed,
            "decay": self.decay,
            "waveform": self.waveform.name(),
        })
    }
}

/// Harmonic superposition generator.
///
/// Holds a fixed, validated list of wave terms. Sampling is deterministic and
/// independent per cell.
pub struct HarmonicGenerator {
    waves: Vec<Wave>,
}

impl HarmonicGenerator {
    /// Creates a generator from explicit wave terms.
    ///
    /// Returns `AuroraError::InvalidParam` if the list is empty or any term
    /// has a zero/non-finite decay constant.
    pub fn new(waves: Vec<Wave>) -> Result<Self, AuroraError> {
        if waves.is_empty() {
            return Err(AuroraError::param("waves", "need at least one wave term"));
        }
        for wave in &waves {
            wave.validate()?;
        }
        Ok(Self { waves })
    }

    /// Gentle three-wave preset with pi-scaled decay constants.
    pub fn calm() -> Self {
        Self {
            waves: vec![
                Wave {
                    amplitude: 0.5,
                    frequency: 3.0,
                    phase_speed: 1.0,
                    decay: PI,
                    waveform: Waveform::Sin,
                },
                Wave {
                    amplitude: 0.3,
                    frequency: 6.0,
                    phase_speed: -2.0,
                    decay: 2.0 * PI,
                    waveform: Waveform::Sin,
                },
                Wave {
                    amplitude: 0.2,
                    frequency: 2.0,
                    phase_speed: 3.0,
                    decay: 3.0 * PI,
                    waveform: Waveform::Cos,
                },
            ],
        }
    }

    /// Busier preset: stronger lead wave, tighter decay, slower drift.
    pub fn vivid() -> Self {
        Self {
            waves: vec![
                Wave {
                    amplitude: 0.6,
                    frequency: 3.0,
                    phase_speed: 0.5,
                    decay: 3.0,
                    waveform: Waveform::Sin,
                },
                Wave {
                    amplitude: 0.3,
                    frequency: 6.0,
                    phase_speed: 0.8,
                    decay: 6.0,
                    waveform: Waveform::Sin,
                },
                Wave {
                    amplitude: 0.2,
                    frequency: 2.0,
                    phase_speed: 1.2,
                    decay: 2.0,
                    waveform: Waveform::Cos,
                },
            ],
        }
    }

    /// Creates a generator from a JSON params object.
    ///
    /// `{"waves": [...]}` replaces the wave list; a missing or empty object
    /// yields the [`calm`](Self::calm) preset. Each wave entry supplies
    /// `amplitude`, `frequency`, `phase_speed`, `decay`, and `waveform`.
    pub fn from_json(params: &Value) -> Result<Self, AuroraError> {
        match params.get("waves").and_then(Value::as_array) {
            None => Ok(Self::calm()),
            Some(entries) => {
                let waves = entries
                    .iter()
                    .map(Wave::from_json)
                    .collect::<Result<Vec<_>, _>>()?;
                Self::new(waves)
            }
        }
    }

    /// The wave terms of this generator.
    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }
}

impl FieldGenerator for HarmonicGenerator {
    fn sample(&self, grid: &Grid, t: f64) -> Result<ScalarField, AuroraError> {
        Ok(ScalarField::from_grid_fn(grid, |x, y| {
            self.waves.iter().map(|w| w.value(x, y, t)).sum()
        }))
    }

    fn params(&self) -> Value {
        json!({
            "waves": self.waves.iter().map(|w| w.to_json()).collect::<Vec<_>>(),
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "waves": {
                "type": "array",
                "description": "Wave terms summed per cell",
                "items": {
                    "amplitude": {
                        "type": "number",
                        "default": 0.5,
                        "description": "Peak contribution of the term"
                    },
                    "frequency": {
                        "type": "number",
                        "default": 3.0,
                        "description": "Spatial frequency along x"
                    },
                    "phase_speed": {
                        "type": "number",
                        "default": 1.0,
                        "description": "Phase advance per unit time; sign sets drift direction"
                    },
                    "decay": {
                        "type": "number",
                        "default": PI,
                        "description": "Exponential y falloff constant; non-zero"
                    },
                    "waveform": {
                        "type": "string",
                        "default": "sin",
                        "description": "Carrier: \"sin\" or \"cos\""
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::f64::consts::TAU;

    fn aurora_grid() -> Grid {
        Grid::new((0.0, TAU), (0.0, TAU), 800, 300).unwrap()
    }

    #[test]
    fn new_rejects_empty_wave_list() {
        assert!(HarmonicGenerator::new(vec![]).is_err());
    }

    #[test]
    fn new_rejects_zero_decay() {
        let wave = Wave {
            amplitude: 0.5,
            frequency: 3.0,
            phase_speed: 1.0,
            decay: 0.0,
            waveform: Waveform::Sin,
        };
        assert!(matches!(
            HarmonicGenerator::new(vec![wave]),
            Err(AuroraError::InvalidParam { .. })
        ));
    }

    #[test]
    fn new_rejects_non_finite_amplitude() {
        let wave = Wave {
            amplitude: f64::NAN,
            frequency: 3.0,
            phase_speed: 1.0,
            decay: 1.0,
            waveform: Waveform::Sin,
        };
        assert!(HarmonicGenerator::new(vec![wave]).is_err());
    }

    #[test]
    fn output_shape_matches_grid() {
        let grid = Grid::new((0.0, TAU), (0.0, TAU), 12, 7).unwrap();
        let field = HarmonicGenerator::calm().sample(&grid, 1.5).unwrap();
        assert!(field.matches_grid(&grid));
    }

    #[test]
    fn calm_origin_value_at_t0_is_closed_form_sum() {
        // At (x=0, y=0, t=0): 0.5*sin(0)*1 + 0.3*sin(0)*1 + 0.2*cos(0)*1 = 0.2
        let grid = aurora_grid();
        let field = HarmonicGenerator::calm().sample(&grid, 0.0).unwrap();
        assert!(
            (field.get(0, 0) - 0.2).abs() < 1e-12,
            "got {}",
            field.get(0, 0)
        );
    }

    #[test]
    fn vivid_origin_value_at_t0_is_closed_form_sum() {
        // Same structure, cos term amplitude 0.2 again: 0.6*0 + 0.3*0 + 0.2*1.
        let grid = aurora_grid();
        let field = HarmonicGenerator::vivid().sample(&grid, 0.0).unwrap();
        assert!((field.get(0, 0) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn repeated_sampling_is_bit_identical() {
        let grid = Grid::new((0.0, TAU), (0.0, TAU), 40, 15).unwrap();
        let gen = HarmonicGenerator::vivid();
        let a = gen.sample(&grid, 13.5).unwrap();
        let b = gen.sample(&grid, 13.5).unwrap();
        assert!(a
            .data()
            .iter()
            .zip(b.data().iter())
            .all(|(va, vb)| va.to_bits() == vb.to_bits()));
    }

    #[test]
    fn field_varies_with_time() {
        let grid = Grid::new((0.0, TAU), (0.0, TAU), 40, 15).unwrap();
        let gen = HarmonicGenerator::calm();
        let early = gen.sample(&grid, 0.0).unwrap();
        let late = gen.sample(&grid, 5.0).unwrap();
        assert!(early
            .data()
            .iter()
            .zip(late.data().iter())
            .any(|(a, b)| a != b));
    }

    #[test]
    fn intensity_decays_with_height() {
        // Fix a column where the carrier is non-zero and walk up in y.
        let grid = aurora_grid();
        let field = HarmonicGenerator::calm().sample(&grid, 0.25).unwrap();
        let col = 100;
        let low = field.get(col, 0).abs();
        let high = field.get(col, 299).abs();
        assert!(
            high < low,
            "expected falloff with height: low={low}, high={high}"
        );
    }

    #[test]
    fn single_sin_wave_matches_formula_everywhere() {
        let wave = Wave {
            amplitude: 0.7,
            frequency: 2.0,
            phase_speed: 1.5,
            decay: 4.0,
            waveform: Waveform::Sin,
        };
        let gen = HarmonicGenerator::new(vec![wave]).unwrap();
        let grid = Grid::new((0.0, TAU), (0.0, TAU), 16, 9).unwrap();
        let t = 2.5;
        let field = gen.sample(&grid, t).unwrap();
        for (col, row, x, y) in grid.iter() {
            let expected = 0.7 * (2.0 * x + 1.5 * t).sin() * (-y / 4.0).exp();
            assert!(
                (field.get(col, row) - expected).abs() < 1e-12,
                "mismatch at ({col}, {row})"
            );
        }
    }

    #[test]
    fn from_json_defaults_to_calm_preset() {
        let gen = HarmonicGenerator::from_json(&json!({})).unwrap();
        assert_eq!(gen.waves().len(), 3);
        assert_eq!(gen.waves()[0].amplitude, 0.5);
    }

    #[test]
    fn from_json_parses_explicit_waves() {
        let gen = HarmonicGenerator::from_json(&json!({
            "waves": [
                {"amplitude": 1.0, "frequency": 4.0, "phase_speed": -0.5,
                 "decay": 2.0, "waveform": "cos"}
            ]
        }))
        .unwrap();
        assert_eq!(gen.waves().len(), 1);
        assert_eq!(gen.waves()[0].waveform, Waveform::Cos);
        assert_eq!(gen.waves()[0].phase_speed, -0.5);
    }

    #[test]
    fn from_json_rejects_bad_waveform_name() {
        let result = HarmonicGenerator::from_json(&json!({
            "waves": [{"waveform": "tan"}]
        }));
        assert!(matches!(result, Err(AuroraError::InvalidParam { .. })));
    }

    #[test]
    fn from_json_rejects_empty_wave_array() {
        assert!(HarmonicGenerator::from_json(&json!({"waves": []})).is_err());
    }

    #[test]
    fn params_round_trip_through_from_json() {
        let gen = HarmonicGenerator::vivid();
        let round = HarmonicGenerator::from_json(&gen.params()).unwrap();
        assert_eq!(round.waves(), gen.waves());
    }

    #[test]
    fn param_schema_describes_wave_terms() {
        let schema = HarmonicGenerator::calm().param_schema();
        assert_eq!(schema["waves"]["type"], "array");
        assert!(schema["waves"]["items"].get("decay").is_some());
    }
}
