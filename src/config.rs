//! TOML run configuration for the command-line tool.
//!
//! ```toml
//! model = "model.json"
//! space = "space.json"
//! output = "output.json"
//!
//! [solver]
//! tolerance = 0.001
//! strict = false
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    settings::{PivotPolicy, SolverSettings},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SolverConfig {
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Fail on a non-invertible pivot instead of reporting no offsets.
    #[serde(default)]
    pub strict: bool,
}

fn default_tolerance() -> f64 {
    SolverSettings::default().tolerance
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            strict: false,
        }
    }
}

impl From<&SolverConfig> for SolverSettings {
    fn from(config: &SolverConfig) -> Self {
        Self {
            tolerance: config.tolerance,
            pivot_policy: if config.strict {
                PivotPolicy::Strict
            } else {
                PivotPolicy::Lenient
            },
        }
    }
}

/// Inputs, output and solver settings of one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub model: PathBuf,
    pub space: PathBuf,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub solver: SolverConfig,
}

impl RunConfig {
    pub fn from_str(
        s: &str,
        base_path: impl AsRef<Path>,
    ) -> std::result::Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(s)?;
        config.resolve_paths(base_path.as_ref());
        Ok(config)
    }

    /// Load a config file; relative paths inside it are resolved against the
    /// directory containing the file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let base_path = path.parent().unwrap_or_else(|| Path::new(""));
        let config = Self::from_str(&s, base_path).map_err(|source| Error::TomlParse {
            path: path.to_owned(),
            source,
        })?;
        debug!(?config, "loaded run config");
        Ok(config)
    }

    pub fn solver_settings(&self) -> SolverSettings {
        SolverSettings::from(&self.solver)
    }

    fn resolve_paths(&mut self, base_path: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base_path.join(&*p);
            }
        };
        resolve(&mut self.model);
        resolve(&mut self.space);
        if let Some(output) = self.output.as_mut() {
            resolve(output);
        }
    }
}
