//! Particle overlay data model and generator trait.
//!
//! A `ParticleSet` is an ordered sequence of polar points, recomputed fresh
//! each frame from closed-form trajectory equations. Nothing is mutated
//! between frames.

use serde_json::Value;

/// One particle in polar display coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Angular position in radians, within `[0, 2*pi)`.
    pub theta: f64,
    /// Radial position (magnetic latitude, in degrees, for the oval variant).
    pub radius: f64,
}

/// An ordered set of particles for one frame.
#[derive(Debug, Clone)]
pub struct ParticleSet {
    points: Vec<Particle>,
}

impl ParticleSet {
    /// Wraps a vector of points.
    pub fn from_points(points: Vec<Particle>) -> Self {
        Self { points }
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the set holds no particles.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Read-only access to the points, in generation order.
    pub fn points(&self) -> &[Particle] {
        &self.points
    }

    /// Iterates over the particles in generation order.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.points.iter()
    }
}

/// A pure function from time to a particle set.
///
/// Implementations must be deterministic and hold no per-frame state; the
/// full set is re-derived from `t` every frame.
pub trait ParticleGenerator: Send + Sync {
    /// Computes all particle positions at time `t`.
    fn sample(&self, t: f64) -> ParticleSet;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Ring {
        count: usize,
    }

    impl ParticleGenerator for Ring {
        fn sample(&self, t: f64) -> ParticleSet {
            let points = (0..self.count)
                .map(|i| Particle {
                    theta: (i as f64 + t).rem_euclid(std::f64::consts::TAU),
                    radius: 1.0,
                })
                .collect();
            ParticleSet::from_points(points)
        }

        fn params(&self) -> Value {
            json!({"count": self.count})
        }
    }

    #[test]
    fn particle_set_preserves_order_and_length() {
        let set = ParticleSet::from_points(vec![
            Particle {
                theta: 0.0,
                radius: 1.0,
            },
            Particle {
                theta: 1.0,
                radius: 2.0,
            },
        ]);
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        assert_eq!(set.points()[1].radius, 2.0);
    }

    #[test]
    fn particle_generator_trait_is_object_safe() {
        let gen: Box<dyn ParticleGenerator> = Box::new(Ring { count: 8 });
        let set = gen.sample(0.5);
        assert_eq!(set.len(), 8);
        assert_eq!(gen.params()["count"], 8);
    }

    #[test]
    fn repeated_sampling_is_deterministic() {
        let gen = Ring { count: 4 };
        let a = gen.sample(3.25);
        let b = gen.sample(3.25);
        for (pa, pb) in a.iter().zip(b.iter()) {
            assert_eq!(pa.theta.to_bits(), pb.theta.to_bits());
            assert_eq!(pa.radius.to_bits(), pb.radius.to_bits());
        }
    }
}
