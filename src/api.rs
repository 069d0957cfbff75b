//! High-level functions for finding offsets between two pose sets.

use crate::core::OffsetSolver;
use crate::error::Result;
use crate::estimators::PivotOffsetEstimator;
use crate::models::Pose;
use crate::scoring::CoverageScoring;
use crate::settings::SolverSettings;
use crate::types::PoseSet;

/// Result of an offset search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveResult {
    /// Accepted offsets, in the order of the space set.
    pub offsets: Vec<Pose>,
    /// Index of the space pose each offset was generated from.
    pub sources: Vec<usize>,
    /// For each offset, the space pose matched by every model pose.
    pub matches: Vec<Vec<usize>>,
    /// Number of candidate offsets tested.
    pub candidates_evaluated: usize,
}

impl SolveResult {
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Find every offset mapping all of `model` onto `space` within `tolerance`.
///
/// A non-invertible first model pose gives an empty result. Use
/// [`solve_with_settings`] with [`SolverSettings::strict`] to get an error
/// instead.
///
/// # Errors
/// `InvalidArgument` when `model` is empty or `tolerance` is negative or NaN.
pub fn solve(model: &PoseSet, space: &PoseSet, tolerance: f64) -> Result<Vec<Pose>> {
    solve_with_settings(model, space, SolverSettings::with_tolerance(tolerance))
        .map(|result| result.offsets)
}

/// Same as [`solve`], with the full report and explicit settings.
pub fn solve_with_settings(
    model: &PoseSet,
    space: &PoseSet,
    settings: SolverSettings,
) -> Result<SolveResult> {
    let mut solver = OffsetSolver::new(
        settings,
        PivotOffsetEstimator::new(),
        CoverageScoring::new(settings.tolerance),
    );
    solver.run(model, space)?;

    Ok(SolveResult {
        offsets: solver.offsets,
        sources: solver.sources,
        matches: solver.matches,
        candidates_evaluated: solver.candidates_evaluated,
    })
}
