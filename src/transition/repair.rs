//! Validity repair pass
//!
//! Closing step of every run: any category in the output that was not
//! present in the input (and is not no-data) is rewritten to the fallback
//! category. Two linear scans, one to collect the offending values and one
//! to rewrite them. The fallback itself is never treated as offending, so an
//! expansion toward a category absent from the input is left as written.

use ahash::AHashSet;
use std::collections::BTreeSet;

use crate::core::types::Category;
use crate::spatial::Grid;

/// Result of a repair pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Distinct stray values found, ascending
    pub offending: Vec<Category>,
    /// Number of cells rewritten
    pub cells_rewritten: usize,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        self.offending.is_empty()
    }
}

/// Rewrite every out-of-domain value in `grid` to `fallback`
pub fn repair(
    grid: &mut Grid<Category>,
    valid_categories: &BTreeSet<Category>,
    no_data: Category,
    fallback: Category,
) -> RepairReport {
    let offending: AHashSet<Category> = grid
        .values()
        .copied()
        .filter(|v| *v != no_data && *v != fallback && !valid_categories.contains(v))
        .collect();

    if offending.is_empty() {
        return RepairReport::default();
    }

    let mut cells_rewritten = 0;
    for value in grid.values_mut() {
        if offending.contains(value) {
            *value = fallback;
            cells_rewritten += 1;
        }
    }

    let mut offending: Vec<_> = offending.into_iter().collect();
    offending.sort_unstable();

    tracing::warn!(
        values = ?offending,
        cells = cells_rewritten,
        fallback,
        "repaired out-of-domain categories"
    );

    RepairReport {
        offending,
        cells_rewritten,
    }
}
