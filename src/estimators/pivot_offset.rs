//! Candidate offsets anchored on the first model pose.

use crate::core::Estimator;
use crate::models::Pose;
use crate::types::PoseSet;

/// Proposes `target * inverse(pivot)` for each space pose, where the pivot is
/// the first model pose.
///
/// Only the pivot is used to generate candidates; the other model poses take
/// part in verification only. A model set whose true correspondence does not
/// involve the pivot is therefore never found.
#[derive(Debug, Clone, Copy, Default)]
pub struct PivotOffsetEstimator;

impl PivotOffsetEstimator {
    pub fn new() -> Self {
        Self
    }
}

impl Estimator for PivotOffsetEstimator {
    type Model = Pose;

    fn is_valid_sample(&self, model: &PoseSet) -> bool {
        model.pivot().is_some_and(Pose::is_invertible)
    }

    fn estimate_model(&self, model: &PoseSet, target: &Pose) -> Vec<Self::Model> {
        let Some(inverse) = model.pivot().and_then(Pose::try_inverse) else {
            return Vec::new();
        };
        vec![target * &inverse]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix4, UnitQuaternion, Vector3};

    #[test]
    fn candidate_maps_pivot_onto_target() {
        let pivot = Pose::from_trs(
            Vector3::new(1.0, 2.0, 3.0),
            UnitQuaternion::from_euler_angles(0.3, -0.2, 1.1),
            Vector3::new(1.0, 1.0, 1.0),
        );
        let target = Pose::from_trs(
            Vector3::new(-4.0, 0.5, 0.0),
            UnitQuaternion::from_euler_angles(0.0, 0.7, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
        );
        let model: PoseSet = vec![pivot].into();

        let estimator = PivotOffsetEstimator::new();
        assert!(estimator.is_valid_sample(&model));

        let candidates = estimator.estimate_model(&model, &target);
        assert_eq!(candidates.len(), 1);
        assert_relative_eq!((candidates[0] * pivot).m, target.m, epsilon = 1e-12);
    }

    #[test]
    fn singular_pivot_yields_nothing() {
        let model: PoseSet = vec![Pose::new(Matrix4::zeros())].into();
        let estimator = PivotOffsetEstimator::new();
        assert!(!estimator.is_valid_sample(&model));
        assert!(estimator
            .estimate_model(&model, &Pose::identity())
            .is_empty());
    }

    #[test]
    fn empty_model_is_not_a_valid_sample() {
        let estimator = PivotOffsetEstimator::new();
        assert!(!estimator.is_valid_sample(&PoseSet::default()));
    }
}
