//! Pose equality and the coverage acceptance rule.
//!
//! Two poses are equal when the summed squared distance between their
//! corresponding rows is below the tolerance. A candidate offset is accepted
//! when every model pose, moved by the offset, equals some space pose.
//! Matches are not consumed, so several model poses may share one space pose.

use crate::core::Scoring;
use crate::models::Pose;
use crate::types::PoseSet;

/// Sum over the four rows of the squared distance between `a` and `b`.
pub fn pose_distance_sq(a: &Pose, b: &Pose) -> f64 {
    (0..4).map(|i| (a.row(i) - b.row(i)).norm_squared()).sum()
}

/// Approximate equality. Identical poses are always equal, even at zero
/// tolerance.
pub fn poses_equal(a: &Pose, b: &Pose, tolerance: f64) -> bool {
    let delta = pose_distance_sq(a, b);
    delta < tolerance || delta == 0.0
}

/// Number of model poses matched before the scan stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub matched: usize,
    pub total: usize,
}

impl Score {
    pub fn new(matched: usize, total: usize) -> Self {
        Self { matched, total }
    }

    pub fn is_complete(&self) -> bool {
        self.matched == self.total
    }
}

/// Accepts an offset iff every model pose lands on some space pose.
#[derive(Debug, Clone, Copy)]
pub struct CoverageScoring {
    tolerance: f64,
}

impl CoverageScoring {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Scoring<Pose> for CoverageScoring {
    type Score = Score;

    fn threshold(&self) -> f64 {
        self.tolerance
    }

    fn score(
        &self,
        model: &PoseSet,
        space: &PoseSet,
        candidate: &Pose,
        matches_out: &mut Vec<usize>,
    ) -> Score {
        matches_out.clear();
        for m in model.iter() {
            let moved = candidate * m;
            match space
                .iter()
                .position(|s| poses_equal(&moved, s, self.tolerance))
            {
                Some(index) => matches_out.push(index),
                None => break,
            }
        }
        Score::new(matches_out.len(), model.len())
    }

    fn is_accepted(&self, score: &Score) -> bool {
        score.is_complete()
    }
}
