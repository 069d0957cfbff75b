//! Core shared types.

use std::ops::Deref;

use crate::models::Pose;

/// Ordered collection of poses, immutable once built.
///
/// Dereferences to `[Pose]` so iteration order is the load order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoseSet {
    poses: Vec<Pose>,
}

impl PoseSet {
    pub fn new(poses: Vec<Pose>) -> Self {
        Self { poses }
    }

    /// Reference pose for the solver, i.e. the first pose.
    pub fn pivot(&self) -> Option<&Pose> {
        self.poses.first()
    }

    pub fn into_inner(self) -> Vec<Pose> {
        self.poses
    }
}

impl Deref for PoseSet {
    type Target = [Pose];

    fn deref(&self) -> &[Pose] {
        &self.poses
    }
}

impl From<Vec<Pose>> for PoseSet {
    fn from(poses: Vec<Pose>) -> Self {
        Self::new(poses)
    }
}

impl FromIterator<Pose> for PoseSet {
    fn from_iter<I: IntoIterator<Item = Pose>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PoseSet {
    type Item = &'a Pose;
    type IntoIter = std::slice::Iter<'a, Pose>;

    fn into_iter(self) -> Self::IntoIter {
        self.poses.iter()
    }
}
