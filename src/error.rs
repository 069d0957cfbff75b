//! Error type shared by the solver, the loader/exporter and the animator.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Error for `pose_offset`
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid argument: {}", .0)]
    InvalidArgument(String),
    #[error("pivot pose is not invertible (determinant {determinant})")]
    DegeneratePivot { determinant: f64 },
    #[error("no offsets to animate")]
    NothingToAnimate,
    #[error("expected 16 matrix entries, found {}", .0)]
    MatrixLength(usize),
    #[error("JSON error: {}", source)]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("IO error on {:?}: {}", path, source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {:?} as toml ({})", path, source)]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Result for `pose_offset`
pub type Result<T> = ::std::result::Result<T, Error>;
