//! Candidate selection
//!
//! One scan over the land-use grid, in row-major order. The engine shuffles
//! the result, so the order here carries no meaning.

use crate::core::config::RunConfig;
use crate::core::types::{CellCoord, ChangeType};
use crate::transition::landscape::Landscape;

/// Cells eligible for consideration under the configured change type
pub fn select_candidates(landscape: &Landscape, config: &RunConfig) -> Vec<CellCoord> {
    let target = config.target_category;
    let no_data = landscape.no_data();

    landscape
        .land_use()
        .cells()
        .filter(|&(cell, &value)| {
            let in_domain = match config.change_type {
                ChangeType::Expansion => value != target && value != no_data,
                ChangeType::Retraction => value == target,
            };
            in_domain && !landscape.is_excluded(cell)
        })
        .map(|(cell, _)| cell)
        .collect()
}
