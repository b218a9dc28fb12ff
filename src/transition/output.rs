//! Run output and statistics

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::config::RunConfig;
use crate::core::error::Result;
use crate::core::types::{Category, ChangeType, NeighborhoodKind};
use crate::spatial::Grid;
use crate::transition::engine::EngineTally;
use crate::transition::repair::RepairReport;

/// Output grid of a run plus what happened along the way
#[derive(Debug, Clone)]
pub struct TransitionOutput {
    pub grid: Grid<Category>,
    pub stats: TransitionStats,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionStats {
    pub target_category: Category,
    pub change_type: ChangeType,
    pub neighborhood: NeighborhoodKind,
    pub max_changes: usize,
    pub seed: Option<u64>,
    pub rows: usize,
    pub cols: usize,
    pub valid_categories: Vec<Category>,
    pub candidates: usize,
    pub engine: EngineTally,
    pub repaired_values: Vec<Category>,
    pub repaired_cells: usize,
    pub simulation_time_ms: u64,
}

impl TransitionStats {
    pub(crate) fn new(
        config: &RunConfig,
        shape: (usize, usize),
        valid_categories: Vec<Category>,
        candidates: usize,
        engine: EngineTally,
        repair: RepairReport,
        elapsed: Duration,
    ) -> Self {
        Self {
            target_category: config.target_category,
            change_type: config.change_type,
            neighborhood: config.neighborhood_kind,
            max_changes: config.max_changes,
            seed: None,
            rows: shape.0,
            cols: shape.1,
            valid_categories,
            candidates,
            engine,
            repaired_values: repair.offending,
            repaired_cells: repair.cells_rewritten,
            simulation_time_ms: elapsed.as_millis() as u64,
        }
    }
}

impl TransitionOutput {
    /// Human-readable report of the run
    pub fn summary(&self) -> String {
        let s = &self.stats;
        let mut lines = vec![
            "=== Land-Use Transition ===".to_string(),
            format!("Grid: {} rows x {} cols", s.rows, s.cols),
            format!(
                "Rule: {} of category {} ({} neighborhood)",
                s.change_type, s.target_category, s.neighborhood
            ),
            format!("Valid categories: {:?}", s.valid_categories),
            format!("Candidates: {}", s.candidates),
            format!("Evaluated: {}", s.engine.evaluated),
            format!("Eligible: {}", s.engine.eligible),
            format!("Changed: {} (budget {})", s.engine.changed, s.max_changes),
        ];

        if s.change_type == ChangeType::Retraction {
            lines.push(format!(
                "Retraction skips: {} empty neighborhood, {} invalid majority, {} majority unchanged",
                s.engine.empty_neighborhood, s.engine.invalid_majority, s.engine.majority_unchanged
            ));
        }
        if s.repaired_cells > 0 {
            lines.push(format!(
                "Repaired: {} cells (values {:?})",
                s.repaired_cells, s.repaired_values
            ));
        }
        if let Some(seed) = s.seed {
            lines.push(format!("Seed: {}", seed));
        }
        lines.push(format!("Simulation time: {}ms", s.simulation_time_ms));

        lines.join("\n")
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.stats)?)
    }
}

/// Number of cells whose value differs between two same-shaped grids
pub fn count_changed_cells(before: &Grid<Category>, after: &Grid<Category>) -> usize {
    before
        .values()
        .zip(after.values())
        .filter(|(a, b)| a != b)
        .count()
}
