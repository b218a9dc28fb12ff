//! Co-registered input grids for one transition run

use std::collections::BTreeSet;

use crate::core::error::{LandUseError, Result};
use crate::core::types::{Category, CellCoord};
use crate::spatial::Grid;

/// The read-only inputs of a run
///
/// All three grids share the land-use grid's shape; `new` refuses anything
/// else. The engine only ever borrows a `Landscape`.
#[derive(Debug, Clone)]
pub struct Landscape {
    land_use: Grid<Category>,
    suitability: Grid<f64>,
    constraint: Grid<bool>,
    no_data: Category,
    valid_categories: BTreeSet<Category>,
}

impl Landscape {
    /// Bundle the inputs; a missing constraint mask excludes nothing
    pub fn new(
        land_use: Grid<Category>,
        suitability: Grid<f64>,
        constraint: Option<Grid<bool>>,
        no_data: Category,
    ) -> Result<Self> {
        let expected = land_use.shape();

        if !suitability.same_shape(&land_use) {
            return Err(LandUseError::DimensionMismatch {
                grid: "suitability",
                expected,
                found: suitability.shape(),
            });
        }

        let constraint = match constraint {
            Some(mask) if !mask.same_shape(&land_use) => {
                return Err(LandUseError::DimensionMismatch {
                    grid: "constraint",
                    expected,
                    found: mask.shape(),
                });
            }
            Some(mask) => mask,
            None => Grid::filled(expected.0, expected.1, false),
        };

        let valid_categories = land_use
            .values()
            .copied()
            .filter(|&v| v != no_data)
            .collect();

        Ok(Self {
            land_use,
            suitability,
            constraint,
            no_data,
            valid_categories,
        })
    }

    pub fn land_use(&self) -> &Grid<Category> {
        &self.land_use
    }

    pub fn suitability(&self) -> &Grid<f64> {
        &self.suitability
    }

    pub fn constraint(&self) -> &Grid<bool> {
        &self.constraint
    }

    pub fn no_data(&self) -> Category {
        self.no_data
    }

    /// Distinct non-sentinel categories present in the input land-use grid
    pub fn valid_categories(&self) -> &BTreeSet<Category> {
        &self.valid_categories
    }

    pub fn shape(&self) -> (usize, usize) {
        self.land_use.shape()
    }

    /// Whether the constraint mask excludes this cell from change
    #[inline]
    pub fn is_excluded(&self, cell: CellCoord) -> bool {
        self.constraint.get(cell).copied().unwrap_or(false)
    }
}
