//! JSON loading of pose sets and export of offsets.
//!
//! A pose is stored either as an object with the sixteen fields
//! `m00`..`m33` (`m{row}{col}`), or as a flat array of sixteen numbers in
//! row-major order. Objects may carry extra fields (a serialized engine
//! matrix also lists `rotation`, `lossyScale`, `isIdentity`, ...); those are
//! ignored. Export always writes the sixteen fields and nothing else.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Pose;
use crate::types::PoseSet;

/// On-disk schema of one matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatrixRecord {
    pub m00: f64,
    pub m01: f64,
    pub m02: f64,
    pub m03: f64,
    pub m10: f64,
    pub m11: f64,
    pub m12: f64,
    pub m13: f64,
    pub m20: f64,
    pub m21: f64,
    pub m22: f64,
    pub m23: f64,
    pub m30: f64,
    pub m31: f64,
    pub m32: f64,
    pub m33: f64,
}

impl From<&Pose> for MatrixRecord {
    fn from(pose: &Pose) -> Self {
        let [m00, m01, m02, m03, m10, m11, m12, m13, m20, m21, m22, m23, m30, m31, m32, m33] =
            pose.to_row_major();
        Self {
            m00,
            m01,
            m02,
            m03,
            m10,
            m11,
            m12,
            m13,
            m20,
            m21,
            m22,
            m23,
            m30,
            m31,
            m32,
            m33,
        }
    }
}

impl From<MatrixRecord> for Pose {
    fn from(r: MatrixRecord) -> Self {
        Pose::from_row_major(&[
            r.m00, r.m01, r.m02, r.m03, r.m10, r.m11, r.m12, r.m13, r.m20, r.m21, r.m22, r.m23,
            r.m30, r.m31, r.m32, r.m33,
        ])
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MatrixEntry {
    Fields(MatrixRecord),
    Flat(Vec<f64>),
}

impl MatrixEntry {
    fn into_pose(self) -> Result<Pose> {
        match self {
            MatrixEntry::Fields(record) => Ok(record.into()),
            MatrixEntry::Flat(values) => {
                let values: [f64; 16] = values
                    .as_slice()
                    .try_into()
                    .map_err(|_| Error::MatrixLength(values.len()))?;
                Ok(Pose::from_row_major(&values))
            }
        }
    }
}

/// Parse a JSON array of matrices.
pub fn parse_pose_set(text: &str) -> Result<PoseSet> {
    let entries: Vec<MatrixEntry> = serde_json::from_str(text)?;
    entries.into_iter().map(MatrixEntry::into_pose).collect()
}

/// Read and parse a pose set file.
pub fn load_pose_set(path: impl AsRef<Path>) -> Result<PoseSet> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    let poses = parse_pose_set(&text)?;
    debug!("loaded {} poses from {:?}", poses.len(), path);
    Ok(poses)
}

/// Pretty-printed JSON array of `m00`..`m33` objects.
pub fn offsets_to_json(offsets: &[Pose]) -> Result<String> {
    let records: Vec<MatrixRecord> = offsets.iter().map(MatrixRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Write offsets to `path`, replacing any existing file.
pub fn export_offsets(path: impl AsRef<Path>, offsets: &[Pose]) -> Result<()> {
    let path = path.as_ref();
    let json = offsets_to_json(offsets)?;
    fs::write(path, json).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    debug!("exported {} offsets to {:?}", offsets.len(), path);
    Ok(())
}
