//! Core traits and the offset search pipeline.
//!
//! The search is a hypothesize-and-verify loop without sampling: every space
//! pose yields candidate offsets (via an [`Estimator`]), and each candidate is
//! kept or dropped by a [`Scoring`] strategy. The traits sit at the same seams
//! so that a different candidate generator or acceptance rule can be plugged
//! into [`OffsetSolver`] without touching the loop.

use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    models::Pose,
    settings::{PivotPolicy, SolverSettings},
    types::PoseSet,
};

/// Estimator responsible for generating candidate offsets.
pub trait Estimator {
    /// Model type produced by this estimator.
    type Model: Clone;

    /// Check whether the model set can produce candidates at all.
    fn is_valid_sample(&self, model: &PoseSet) -> bool;

    /// Candidate models that would carry the model set onto `target`.
    fn estimate_model(&self, model: &PoseSet, target: &Pose) -> Vec<Self::Model>;
}

/// Strategy deciding whether a candidate maps the model set onto the space set.
pub trait Scoring<M> {
    type Score: Clone;

    /// Equality tolerance used when comparing poses.
    fn threshold(&self) -> f64;

    /// Score `candidate`. `matches_out` receives, per model pose, the index of
    /// the first matching space pose, stopping at the first model pose that
    /// has no match.
    fn score(
        &self,
        model: &PoseSet,
        space: &PoseSet,
        candidate: &M,
        matches_out: &mut Vec<usize>,
    ) -> Self::Score;

    fn is_accepted(&self, score: &Self::Score) -> bool;
}

/// Exhaustive offset search orchestrating an estimator and a scoring rule.
///
/// Results of the last [`run`](Self::run) are kept on the struct; every call
/// clears them first.
#[derive(Debug)]
pub struct OffsetSolver<E, Sc>
where
    E: Estimator,
    Sc: Scoring<E::Model>,
{
    pub settings: SolverSettings,
    pub estimator: E,
    pub scoring: Sc,

    // Outputs / diagnostics
    pub offsets: Vec<E::Model>,
    /// Index of the space pose each accepted offset was generated from.
    pub sources: Vec<usize>,
    /// Per accepted offset, the matching space pose of every model pose.
    pub matches: Vec<Vec<usize>>,
    pub candidates_evaluated: usize,
}

impl<E, Sc> OffsetSolver<E, Sc>
where
    E: Estimator,
    Sc: Scoring<E::Model>,
{
    pub fn new(settings: SolverSettings, estimator: E, scoring: Sc) -> Self {
        Self {
            settings,
            estimator,
            scoring,
            offsets: Vec::new(),
            sources: Vec::new(),
            matches: Vec::new(),
            candidates_evaluated: 0,
        }
    }

    /// Run the search. Accepted offsets keep the iteration order of `space`.
    ///
    /// Cost is `O(|space| * |model| * |space|)`; intended for pose sets in
    /// the tens to low hundreds.
    pub fn run(&mut self, model: &PoseSet, space: &PoseSet) -> Result<()> {
        self.offsets.clear();
        self.sources.clear();
        self.matches.clear();
        self.candidates_evaluated = 0;

        let pivot = model
            .pivot()
            .ok_or_else(|| Error::InvalidArgument("model pose set is empty".to_string()))?;
        let threshold = self.scoring.threshold();
        if threshold.is_nan() || threshold < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "tolerance must be non-negative, got {threshold}"
            )));
        }

        if !self.estimator.is_valid_sample(model) {
            let determinant = pivot.determinant();
            match self.settings.pivot_policy {
                PivotPolicy::Lenient => {
                    warn!("pivot pose is not invertible (determinant {determinant}), no offsets");
                    return Ok(());
                }
                PivotPolicy::Strict => return Err(Error::DegeneratePivot { determinant }),
            }
        }

        let mut tmp_matches = Vec::with_capacity(model.len());
        for (index, target) in space.iter().enumerate() {
            for candidate in self.estimator.estimate_model(model, target) {
                self.candidates_evaluated += 1;
                let score = self
                    .scoring
                    .score(model, space, &candidate, &mut tmp_matches);
                if self.scoring.is_accepted(&score) {
                    self.offsets.push(candidate);
                    self.sources.push(index);
                    self.matches.push(tmp_matches.clone());
                }
            }
        }

        debug!(
            model = model.len(),
            space = space.len(),
            candidates = self.candidates_evaluated,
            accepted = self.offsets.len(),
            "offset search finished"
        );
        Ok(())
    }
}
