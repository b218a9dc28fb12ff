//! Run configuration
//!
//! Parameters arrive as loosely typed `RunParams` (from a TOML scenario or
//! the command line) and are checked once by `RunParams::validate`, which
//! yields the typed `RunConfig` the transition engine consumes. Nothing
//! touches a grid before validation succeeds.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{LandUseError, Result};
use crate::core::types::{Category, ChangeType, NeighborhoodKind};

/// Raw run parameters as supplied by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunParams {
    /// Land-use category that expands or retracts
    pub target_category: Category,
    /// "expansion" or "retraction"
    #[serde(default = "default_change_type")]
    pub change_type: String,
    /// "Moore", "Von Neumann", "Extended Moore" or "Extended Von Neumann"
    #[serde(default = "default_neighborhood")]
    pub neighborhood: String,
    /// Minimum number of neighbors already in the target category
    #[serde(default = "default_neighborhood_threshold")]
    pub neighborhood_threshold: i64,
    /// Minimum suitability score of the candidate cell itself
    #[serde(default)]
    pub suitability_threshold: f64,
    /// Upper bound on the number of cells changed in one run
    pub max_changes: i64,
    /// Seed for the traversal order; drawn from entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_change_type() -> String {
    "expansion".to_string()
}

fn default_neighborhood() -> String {
    "Moore".to_string()
}

fn default_neighborhood_threshold() -> i64 {
    1
}

impl RunParams {
    pub fn new(target_category: Category, max_changes: i64) -> Self {
        Self {
            target_category,
            change_type: default_change_type(),
            neighborhood: default_neighborhood(),
            neighborhood_threshold: default_neighborhood_threshold(),
            suitability_threshold: 0.0,
            max_changes,
            seed: None,
        }
    }

    /// Check every parameter and produce the typed configuration
    pub fn validate(&self) -> Result<RunConfig> {
        let change_type: ChangeType = self.change_type.parse()?;
        let neighborhood_kind: NeighborhoodKind = self.neighborhood.parse()?;

        let neighborhood_threshold = usize::try_from(self.neighborhood_threshold).map_err(|_| {
            LandUseError::InvalidConfiguration(format!(
                "neighborhood_threshold must be >= 0, got {}",
                self.neighborhood_threshold
            ))
        })?;

        let max_changes = usize::try_from(self.max_changes).map_err(|_| {
            LandUseError::InvalidConfiguration(format!(
                "max_changes must be >= 0, got {}",
                self.max_changes
            ))
        })?;

        if !self.suitability_threshold.is_finite() {
            return Err(LandUseError::InvalidConfiguration(format!(
                "suitability_threshold must be a finite number, got {}",
                self.suitability_threshold
            )));
        }

        Ok(RunConfig {
            target_category: self.target_category,
            change_type,
            neighborhood_kind,
            neighborhood_threshold,
            suitability_threshold: self.suitability_threshold,
            max_changes,
        })
    }
}

/// Validated parameters for a single transition epoch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunConfig {
    pub target_category: Category,
    pub change_type: ChangeType,
    pub neighborhood_kind: NeighborhoodKind,
    pub neighborhood_threshold: usize,
    pub suitability_threshold: f64,
    pub max_changes: usize,
}

/// A complete run described in a TOML file
///
/// Relative raster paths are resolved against the scenario file's directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub land_use: PathBuf,
    pub suitability: PathBuf,
    #[serde(default)]
    pub constraint: Option<PathBuf>,
    pub output: PathBuf,
    pub params: RunParams,
}

impl Scenario {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a scenario file and anchor its paths at the file's location
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let scenario = Self::from_toml_str(&contents)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(scenario.resolve_paths(base))
    }

    fn resolve_paths(mut self, base: &Path) -> Self {
        let anchor = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.land_use = anchor(self.land_use);
        self.suitability = anchor(self.suitability);
        self.constraint = self.constraint.map(anchor);
        self.output = anchor(self.output);
        self
    }
}
