//! Configuration types for the solver and the offset animator.
//!
//! These replace the values a host component used to carry as serialized
//! fields. Defaults match the values the original tool shipped with.

use std::time::Duration;

/// What to do when the pivot pose cannot be inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotPolicy {
    /// Report an empty offset list.
    #[default]
    Lenient,
    /// Fail with [`Error::DegeneratePivot`](crate::Error::DegeneratePivot).
    Strict,
}

/// Settings for a single solve pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    /// Upper bound (exclusive) on the summed squared row distance for two
    /// poses to count as equal.
    pub tolerance: f64,
    pub pivot_policy: PivotPolicy,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: 0.001,
            pivot_policy: PivotPolicy::Lenient,
        }
    }
}

impl SolverSettings {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    pub fn strict(mut self) -> Self {
        self.pivot_policy = PivotPolicy::Strict;
        self
    }
}

/// Timing of the offset animation loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    /// Interpolation steps between two offsets. Frames `0..=frames` are
    /// emitted, so both end points are shown.
    pub frames: u32,
    /// Hold time on each offset once it is reached.
    pub pause: Duration,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            frames: 120,
            pause: Duration::from_secs(3),
        }
    }
}
