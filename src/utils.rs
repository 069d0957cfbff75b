//! Synthetic pose data for tests, demos and benchmarks.
//!
//! [`PoseGenerator`] wraps a `StdRng`; seed it with [`PoseGenerator::from_seed`]
//! for reproducible sets.

use std::f64::consts::PI;

use nalgebra::{UnitQuaternion, Vector3};
use rand::distributions::Uniform;
use rand::prelude::*;

use crate::models::Pose;
use crate::types::PoseSet;

/// Random rigid poses with translations inside a cube of half-width `extent`.
pub struct PoseGenerator {
    rng: StdRng,
    translation: Uniform<f64>,
    angle: Uniform<f64>,
}

impl Default for PoseGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseGenerator {
    /// Construct with a random seed.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Construct with a fixed seed (useful for tests).
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            translation: Uniform::new_inclusive(-10.0, 10.0),
            angle: Uniform::new(-PI, PI),
        }
    }

    /// Reset the translation range to `[-extent, extent]`.
    pub fn set_extent(&mut self, extent: f64) {
        self.translation = Uniform::new_inclusive(-extent, extent);
    }

    pub fn rotation(&mut self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_euler_angles(
            self.rng.sample(self.angle),
            self.rng.sample(self.angle),
            self.rng.sample(self.angle),
        )
    }

    pub fn translation(&mut self) -> Vector3<f64> {
        Vector3::new(
            self.rng.sample(self.translation),
            self.rng.sample(self.translation),
            self.rng.sample(self.translation),
        )
    }

    /// Random rotation and translation, unit scale.
    pub fn rigid(&mut self) -> Pose {
        let rotation = self.rotation();
        let translation = self.translation();
        Pose::from_trs(translation, rotation, Vector3::new(1.0, 1.0, 1.0))
    }

    pub fn rigid_set(&mut self, n: usize) -> PoseSet {
        (0..n).map(|_| self.rigid()).collect()
    }

    /// Copy of `pose` with every translation component moved by up to
    /// `magnitude`.
    pub fn jitter(&mut self, pose: &Pose, magnitude: f64) -> Pose {
        let noise = Uniform::new_inclusive(-magnitude, magnitude);
        let mut out = *pose;
        for r in 0..3 {
            out.m[(r, 3)] += self.rng.sample(noise);
        }
        out
    }

    /// Copy of `set` in random order.
    pub fn shuffled(&mut self, set: &PoseSet) -> PoseSet {
        let mut poses = set.to_vec();
        poses.shuffle(&mut self.rng);
        poses.into()
    }
}

/// Apply `offset` to every pose of `set`, keeping order.
pub fn apply_offset(offset: &Pose, set: &PoseSet) -> PoseSet {
    set.iter().map(|p| offset * p).collect()
}
