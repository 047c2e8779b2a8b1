#![deny(unsafe_code)]
//! Core types and traits for the aurora-engine field synthesis pipeline.
//!
//! Provides the `FieldGenerator` and `ParticleGenerator` traits, the `Grid`
//! coordinate mesh, the `ScalarField` matrix with display normalization, the
//! `FrameSchedule`/`FrameSequencer` frame driver, `ParticleSet`, and JSON
//! parameter helpers.

pub mod error;
pub mod field;
pub mod generator;
pub mod grid;
pub mod params;
pub mod particle;
pub mod sequencer;

pub use error::AuroraError;
pub use field::ScalarField;
pub use generator::FieldGenerator;
pub use grid::Grid;
pub use particle::{Particle, ParticleGenerator, ParticleSet};
pub use sequencer::{Frame, FrameSchedule, FrameSequencer};
