//! # pose-offset - find the offsets between two pose sets
//!
//! Given a "model" set and a "space" set of 4x4 poses, `pose_offset` finds every
//! transform that, applied to each model pose, lands it on some space pose
//! within a tolerance. It also loads and exports pose sets as JSON and can
//! animate through the offsets it found.
//!
//! ## Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use pose_offset::{solve, Pose, PoseSet};
//!
//! let model: PoseSet = vec![Pose::identity()].into();
//! let t = Pose::from_translation(Vector3::new(1.0, 0.0, 0.0));
//! let space: PoseSet = vec![t].into();
//!
//! let offsets = solve(&model, &space, 1e-3).unwrap();
//! assert_eq!(offsets, vec![t]);
//! ```
//!
//! ## How the search works
//!
//! The first model pose is the *pivot*. Each space pose `s` proposes the
//! candidate `s * inverse(pivot)`, and a candidate is accepted when every
//! model pose, moved by it, equals at least one space pose. Equality is the
//! summed squared distance between matrix rows, compared against the
//! tolerance. The search is exhaustive and cubic in the set sizes, which is
//! fine for tens to low hundreds of poses.
//!
//! Only the pivot generates candidates. When the pivot is not invertible the
//! result is empty, or an error with [`PivotPolicy::Strict`].
//!
//! ## Extending the Library
//!
//! The search loop in [`OffsetSolver`](core::OffsetSolver) is generic over two
//! traits:
//!
//! - **[`Estimator`](core::Estimator)**: proposes candidate offsets
//! - **[`Scoring<M>`](core::Scoring)**: decides whether a candidate is accepted
//!
//! ### Example: Custom Scoring
//!
//! ```rust
//! use pose_offset::core::{OffsetSolver, Scoring};
//! use pose_offset::estimators::PivotOffsetEstimator;
//! use pose_offset::scoring::poses_equal;
//! use pose_offset::{Pose, PoseSet, SolverSettings};
//!
//! /// Accept offsets that place at least half of the model.
//! struct HalfCoverage(f64);
//!
//! impl Scoring<Pose> for HalfCoverage {
//!     type Score = usize;
//!
//!     fn threshold(&self) -> f64 {
//!         self.0
//!     }
//!
//!     fn score(
//!         &self,
//!         model: &PoseSet,
//!         space: &PoseSet,
//!         candidate: &Pose,
//!         matches_out: &mut Vec<usize>,
//!     ) -> usize {
//!         matches_out.clear();
//!         for m in model.iter() {
//!             let moved = candidate * m;
//!             if let Some(i) = space.iter().position(|s| poses_equal(&moved, s, self.0)) {
//!                 matches_out.push(i);
//!             }
//!         }
//!         matches_out.len() * 2 / model.len().max(1)
//!     }
//!
//!     fn is_accepted(&self, score: &usize) -> bool {
//!         *score >= 1
//!     }
//! }
//!
//! let model: PoseSet = vec![Pose::identity()].into();
//! let mut solver = OffsetSolver::new(
//!     SolverSettings::default(),
//!     PivotOffsetEstimator::new(),
//!     HalfCoverage(1e-3),
//! );
//! solver.run(&model, &model).unwrap();
//! assert_eq!(solver.offsets.len(), 1);
//! ```
//!
//! ## Modules
//!
//! - **[`api`](api)**: `solve` and `solve_with_settings`
//! - **[`core`](core)**: Core traits and the `OffsetSolver` loop
//! - **[`estimators`](estimators)**: Candidate offset generation
//! - **[`scoring`](scoring)**: Pose equality and coverage acceptance
//! - **[`models`](models)**: The `Pose` type
//! - **[`io`](io)**: JSON loading and export
//! - **[`animation`](animation)**: Frame-driven animation over offsets
//! - **[`config`](config)**: TOML run configuration
//! - **[`settings`](settings)**: Solver and animation settings

pub mod animation;
pub mod api;
pub mod config;
pub mod core;
mod error;
pub mod estimators;
pub mod io;
pub mod models;
pub mod scoring;
pub mod settings;
pub mod types;
pub mod utils;

pub use api::{solve, solve_with_settings, SolveResult};
pub use error::{Error, Result};
pub use models::Pose;
pub use settings::{AnimationSettings, PivotPolicy, SolverSettings};
pub use types::PoseSet;

// Re-export core traits for easy access
pub use crate::core::{Estimator, Scoring};
