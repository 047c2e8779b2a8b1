//! Frame schedule and the lazy frame sequencer.
//!
//! A `FrameSchedule` fixes the time sampling: `count` frames at strictly
//! increasing, evenly spaced times. The `FrameSequencer` walks that schedule,
//! invoking the field generator (and optional particle generator) once per
//! frame and normalizing each field into the display range. It is a finite,
//! forward-only iterator; a fresh run re-derives the whole sequence from the
//! first frame.

use crate::error::AuroraError;
use crate::field::ScalarField;
use crate::generator::FieldGenerator;
use crate::grid::Grid;
use crate::particle::{ParticleGenerator, ParticleSet};

/// Evenly spaced frame times: `t_i = start + i * step` for `i < count`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSchedule {
    start: f64,
    step: f64,
    count: usize,
}

impl FrameSchedule {
    /// Creates a schedule of `count` frames starting at `start`, spaced `step`
    /// apart.
    ///
    /// Returns `AuroraError::InvalidParam` unless `count >= 1`, `start` is
    /// finite, and `step` is finite and strictly positive (times must be
    /// strictly increasing).
    pub fn new(start: f64, step: f64, count: usize) -> Result<Self, AuroraError> {
        if count == 0 {
            return Err(AuroraError::param("count", "must be at least 1"));
        }
        if !start.is_finite() {
            return Err(AuroraError::param("start", "must be finite"));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(AuroraError::param("step", "must be finite and positive"));
        }
        Ok(Self { start, step, count })
    }

    /// Unit-step schedule from t = 0, as used by the harmonic and noise
    /// animations (`t = 0, 1, 2, ...`).
    pub fn unit(count: usize) -> Result<Self, AuroraError> {
        Self::new(0.0, 1.0, count)
    }

    /// `count` frames evenly spanning `[0, t_max]` with both endpoints
    /// included, matching `linspace(0, t_max, count)`.
    ///
    /// Requires `count >= 2` so the step is well defined.
    pub fn linspace(t_max: f64, count: usize) -> Result<Self, AuroraError> {
        if count < 2 {
            return Err(AuroraError::param("count", "linspace needs at least 2 frames"));
        }
        if !t_max.is_finite() || t_max <= 0.0 {
            return Err(AuroraError::param("t_max", "must be finite and positive"));
        }
        Self::new(0.0, t_max / (count - 1) as f64, count)
    }

    /// Number of frames.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Inter-frame time step.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Time of frame `index`. Defined for `index < count`.
    pub fn time(&self, index: usize) -> f64 {
        self.start + self.step * index as f64
    }

    /// Iterates over all frame times in order.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.count).map(move |i| self.time(i))
    }
}

/// One fully computed frame: a normalized field plus optional particles.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Position in the sequence, starting at 0.
    pub index: usize,
    /// The time the field was sampled at.
    pub time: f64,
    /// The field, already saturated into the sequencer's display range.
    pub field: ScalarField,
    /// Particle overlay, when a particle generator is attached.
    pub particles: Option<ParticleSet>,
}

/// Lazy, finite, forward-only driver of the frame sequence.
///
/// Each call to `next` computes one frame in full: sample the generator at
/// the scheduled time, verify the output shape against the grid, normalize
/// into the display range, and sample particles if attached. Frame state is
/// passed by value in the yielded [`Frame`]; the sequencer itself holds only
/// its cursor.
///
/// The first generator or normalization error aborts the sequence: the
/// erroneous frame is yielded as `Err` and every later call returns `None`,
/// so a failed run never produces a truncated tail of frames.
pub struct FrameSequencer<'a> {
    grid: &'a Grid,
    generator: &'a dyn FieldGenerator,
    particles: Option<&'a dyn ParticleGenerator>,
    clim: (f64, f64),
    schedule: FrameSchedule,
    cursor: usize,
}

impl<'a> FrameSequencer<'a> {
    /// Creates a sequencer over `grid` for the given generator, schedule, and
    /// display range.
    ///
    /// The display range is validated here so a bad configuration fails
    /// before any frame is computed.
    pub fn new(
        grid: &'a Grid,
        generator: &'a dyn FieldGenerator,
        schedule: FrameSchedule,
        clim: (f64, f64),
    ) -> Result<Self, AuroraError> {
        let (lo, hi) = clim;
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(AuroraError::InvalidInterval { low: lo, high: hi });
        }
        Ok(Self {
            grid,
            generator,
            particles: None,
            clim,
            schedule,
            cursor: 0,
        })
    }

    /// Attaches a particle generator sampled at every frame time.
    pub fn with_particles(mut self, particles: &'a dyn ParticleGenerator) -> Self {
        self.particles = Some(particles);
        self
    }

    /// The schedule this sequencer walks.
    pub fn schedule(&self) -> FrameSchedule {
        self.schedule
    }

    fn compute(&self, index: usize) -> Result<Frame, AuroraError> {
        let time = self.schedule.time(index);
        let raw = self.generator.sample(self.grid, time)?;
        if !raw.matches_grid(self.grid) {
            return Err(AuroraError::DimensionMismatch {
                lhs_w: raw.width(),
                lhs_h: raw.height(),
                rhs_w: self.grid.width(),
                rhs_h: self.grid.height(),
            });
        }
        let field = raw.normalize(self.clim.0, self.clim.1)?;
        let particles = self.particles.map(|p| p.sample(time));
        Ok(Frame {
            index,
            time,
            field,
            particles,
        })
    }
}

impl Iterator for FrameSequencer<'_> {
    type Item = Result<Frame, AuroraError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.schedule.count() {
            return None;
        }
        let index = self.cursor;
        self.cursor += 1;
        let result = self.compute(index);
        if result.is_err() {
            // Abort the run; no further frames after a failure.
            self.cursor = self.schedule.count();
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.schedule.count() - self.cursor;
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    struct Ramp;

    impl FieldGenerator for Ramp {
        fn sample(&self, grid: &Grid, t: f64) -> Result<ScalarField, AuroraError> {
            Ok(ScalarField::from_grid_fn(grid, |x, _| x * t))
        }

        fn params(&self) -> Value {
            json!({})
        }

        fn param_schema(&self) -> Value {
            json!({})
        }
    }

    /// Fails at a chosen frame time, for abort-semantics tests.
    struct FailsAt {
        bad_time: f64,
    }

    impl FieldGenerator for FailsAt {
        fn sample(&self, grid: &Grid, t: f64) -> Result<ScalarField, AuroraError> {
            if (t - self.bad_time).abs() < 1e-9 {
                return Err(AuroraError::param("t", "synthetic failure"));
            }
            Ok(ScalarField::from_grid_fn(grid, |_, _| 0.0))
        }

        fn params(&self) -> Value {
            json!({})
        }

        fn param_schema(&self) -> Value {
            json!({})
        }
    }

    fn grid() -> Grid {
        Grid::new((0.0, 1.0), (0.0, 1.0), 4, 3).unwrap()
    }

    // ---- FrameSchedule ----

    #[test]
    fn schedule_rejects_zero_count() {
        assert!(FrameSchedule::new(0.0, 1.0, 0).is_err());
    }

    #[test]
    fn schedule_rejects_non_positive_or_non_finite_step() {
        assert!(FrameSchedule::new(0.0, 0.0, 10).is_err());
        assert!(FrameSchedule::new(0.0, -0.5, 10).is_err());
        assert!(FrameSchedule::new(0.0, f64::NAN, 10).is_err());
    }

    #[test]
    fn unit_schedule_counts_from_zero() {
        let sched = FrameSchedule::unit(5).unwrap();
        let times: Vec<f64> = sched.times().collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn linspace_schedule_includes_endpoint() {
        // time.py animates over linspace(0, 100, 200).
        let sched = FrameSchedule::linspace(100.0, 200).unwrap();
        let times: Vec<f64> = sched.times().collect();
        assert_eq!(times.len(), 200);
        assert_eq!(times[0], 0.0);
        assert!((times[199] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn linspace_rejects_single_frame() {
        assert!(FrameSchedule::linspace(10.0, 1).is_err());
    }

    #[test]
    fn times_are_strictly_increasing_with_constant_step() {
        let sched = FrameSchedule::new(2.0, 0.25, 50).unwrap();
        let times: Vec<f64> = sched.times().collect();
        for pair in times.windows(2) {
            let delta = pair[1] - pair[0];
            assert!(delta > 0.0);
            assert!((delta - 0.25).abs() < 1e-12, "uneven step: {delta}");
        }
    }

    #[test]
    fn half_step_schedule_hits_expected_times() {
        // 200 frames at step 0.5: 0, 0.5, ..., 99.5.
        let sched = FrameSchedule::new(0.0, 0.5, 200).unwrap();
        assert_eq!(sched.time(0), 0.0);
        assert_eq!(sched.time(1), 0.5);
        assert_eq!(sched.time(199), 99.5);
        assert_eq!(sched.times().count(), 200);
    }

    // ---- FrameSequencer ----

    #[test]
    fn sequencer_yields_exactly_count_frames() {
        let grid = grid();
        let gen = Ramp;
        let sched = FrameSchedule::unit(7).unwrap();
        let seq = FrameSequencer::new(&grid, &gen, sched, (-1.0, 1.0)).unwrap();
        let frames: Vec<_> = seq.collect::<Result<_, _>>().unwrap();
        assert_eq!(frames.len(), 7);
    }

    #[test]
    fn sequencer_frames_carry_monotonic_times_and_indices() {
        let grid = grid();
        let gen = Ramp;
        let sched = FrameSchedule::new(0.0, 0.5, 200).unwrap();
        let seq = FrameSequencer::new(&grid, &gen, sched, (-1.0, 1.0)).unwrap();
        let frames: Vec<Frame> = seq.collect::<Result<_, _>>().unwrap();
        assert_eq!(frames.len(), 200);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.index, i);
            assert!((frame.time - 0.5 * i as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn sequencer_normalizes_every_frame() {
        let grid = Grid::new((0.0, 10.0), (0.0, 1.0), 8, 2).unwrap();
        let gen = Ramp;
        let sched = FrameSchedule::unit(4).unwrap();
        let seq = FrameSequencer::new(&grid, &gen, sched, (-1.0, 1.0)).unwrap();
        for frame in seq {
            let frame = frame.unwrap();
            assert!(frame
                .field
                .data()
                .iter()
                .all(|&v| (-1.0..=1.0).contains(&v)));
        }
    }

    #[test]
    fn sequencer_rejects_bad_display_range_up_front() {
        let grid = grid();
        let gen = Ramp;
        let sched = FrameSchedule::unit(4).unwrap();
        assert!(matches!(
            FrameSequencer::new(&grid, &gen, sched, (1.0, -1.0)),
            Err(AuroraError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn sequencer_aborts_after_first_error() {
        let grid = grid();
        let gen = FailsAt { bad_time: 2.0 };
        let sched = FrameSchedule::unit(10).unwrap();
        let mut seq = FrameSequencer::new(&grid, &gen, sched, (-1.0, 1.0)).unwrap();
        assert!(seq.next().unwrap().is_ok()); // t = 0
        assert!(seq.next().unwrap().is_ok()); // t = 1
        assert!(seq.next().unwrap().is_err()); // t = 2
        assert!(seq.next().is_none(), "sequence must stop after a failure");
    }

    #[test]
    fn sequencer_samples_particles_at_frame_times() {
        use crate::particle::{Particle, ParticleGenerator, ParticleSet};

        struct Single;
        impl ParticleGenerator for Single {
            fn sample(&self, t: f64) -> ParticleSet {
                ParticleSet::from_points(vec![Particle {
                    theta: 0.0,
                    radius: t,
                }])
            }
            fn params(&self) -> Value {
                json!({})
            }
        }

        let grid = grid();
        let gen = Ramp;
        let particles = Single;
        let sched = FrameSchedule::unit(3).unwrap();
        let seq = FrameSequencer::new(&grid, &gen, sched, (-1.0, 1.0))
            .unwrap()
            .with_particles(&particles);
        let frames: Vec<Frame> = seq.collect::<Result<_, _>>().unwrap();
        for frame in &frames {
            let set = frame.particles.as_ref().unwrap();
            assert_eq!(set.len(), 1);
            assert_eq!(set.points()[0].radius, frame.time);
        }
    }

    #[test]
    fn size_hint_tracks_remaining_frames() {
        let grid = grid();
        let gen = Ramp;
        let sched = FrameSchedule::unit(5).unwrap();
        let mut seq = FrameSequencer::new(&grid, &gen, sched, (-1.0, 1.0)).unwrap();
        assert_eq!(seq.size_hint(), (5, Some(5)));
        seq.next();
        assert_eq!(seq.size_hint(), (4, Some(4)));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn schedule_yields_exactly_count_strictly_increasing_times(
                count in 1_usize..=300,
                step in 0.01_f64..10.0,
            ) {
                let sched = FrameSchedule::new(0.0, step, count).unwrap();
                let times: Vec<f64> = sched.times().collect();
                prop_assert_eq!(times.len(), count);
                for pair in times.windows(2) {
                    prop_assert!(pair[1] > pair[0]);
                }
            }
        }
    }
}
