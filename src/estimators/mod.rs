//! Estimators producing candidate offsets.
//!
//! - Pivot offset estimation (`space_pose * inverse(model[0])`)

pub mod pivot_offset;

pub use pivot_offset::PivotOffsetEstimator;
