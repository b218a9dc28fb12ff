//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::LandUseError;

/// Land-use class code stored in a categorical grid
pub type Category = i32;

/// No-data sentinel used when a land-use raster does not declare one
pub const DEFAULT_NO_DATA: Category = -9999;

/// Row/column position of a cell inside a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Apply a relative offset, returning `None` if the result is negative
    ///
    /// Upper bounds are the grid's business; see `Grid::offset`.
    #[inline]
    pub fn shifted(&self, d_row: i32, d_col: i32) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row as isize)?;
        let col = self.col.checked_add_signed(d_col as isize)?;
        Some(Self { row, col })
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction of land-use change for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// Convert non-target cells into the target category
    Expansion,
    /// Convert target cells into their neighborhood's majority category
    Retraction,
}

impl FromStr for ChangeType {
    type Err = LandUseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expansion" => Ok(ChangeType::Expansion),
            "retraction" => Ok(ChangeType::Retraction),
            other => Err(LandUseError::InvalidConfiguration(format!(
                "unknown change type '{}' (expected 'expansion' or 'retraction')",
                other
            ))),
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeType::Expansion => write!(f, "expansion"),
            ChangeType::Retraction => write!(f, "retraction"),
        }
    }
}

/// Shape of the neighborhood examined around each candidate cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeighborhoodKind {
    /// 3x3 square minus the center (8 cells)
    Moore,
    /// The four axis-adjacent cells
    VonNeumann,
    /// 5x5 square minus the center (24 cells)
    ExtendedMoore,
    /// Manhattan radius 2 diamond minus the center (12 cells)
    ExtendedVonNeumann,
}

impl NeighborhoodKind {
    pub const ALL: [NeighborhoodKind; 4] = [
        NeighborhoodKind::Moore,
        NeighborhoodKind::VonNeumann,
        NeighborhoodKind::ExtendedMoore,
        NeighborhoodKind::ExtendedVonNeumann,
    ];
}

impl FromStr for NeighborhoodKind {
    type Err = LandUseError;

    /// Accepts "Moore", "Von Neumann", "extended_moore", "Extended-Von-Neumann", ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "moore" => Ok(NeighborhoodKind::Moore),
            "vonneumann" => Ok(NeighborhoodKind::VonNeumann),
            "extendedmoore" => Ok(NeighborhoodKind::ExtendedMoore),
            "extendedvonneumann" => Ok(NeighborhoodKind::ExtendedVonNeumann),
            _ => Err(LandUseError::InvalidConfiguration(format!(
                "unknown neighborhood kind '{}' (expected 'Moore', 'Von Neumann', \
                 'Extended Moore' or 'Extended Von Neumann')",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for NeighborhoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NeighborhoodKind::Moore => "Moore",
            NeighborhoodKind::VonNeumann => "Von Neumann",
            NeighborhoodKind::ExtendedMoore => "Extended Moore",
            NeighborhoodKind::ExtendedVonNeumann => "Extended Von Neumann",
        };
        f.write_str(name)
    }
}
