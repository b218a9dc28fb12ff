//! Generic grid for raster data

use crate::core::error::{LandUseError, Result};
use crate::core::types::CellCoord;

/// Row-major 2D grid with bounds-checked access
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Grid of `rows * cols` cells all holding `fill`
    pub fn filled(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![fill; rows * cols],
        }
    }
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::default())
    }
}

impl<T> Grid<T> {
    /// Wrap row-major data, which must hold exactly `rows * cols` values
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            LandUseError::InvalidConfiguration(format!("{}x{} grid is too large", rows, cols))
        })?;
        if data.len() != expected {
            return Err(LandUseError::InvalidConfiguration(format!(
                "grid data has {} values, expected {}x{} = {}",
                data.len(),
                rows,
                cols,
                expected
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from nested rows; every row must have the same length
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != width) {
            return Err(LandUseError::InvalidConfiguration(format!(
                "row {} has {} values, expected {}",
                bad,
                rows[bad].len(),
                width
            )));
        }
        let data = rows.into_iter().flatten().collect();
        Ok(Self {
            rows: height,
            cols: width,
            data,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    #[inline]
    pub fn get(&self, cell: CellCoord) -> Option<&T> {
        if self.contains(cell) {
            Some(&self.data[cell.row * self.cols + cell.col])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, cell: CellCoord) -> Option<&mut T> {
        if self.contains(cell) {
            Some(&mut self.data[cell.row * self.cols + cell.col])
        } else {
            None
        }
    }

    /// Write a cell; out-of-bounds writes are ignored
    #[inline]
    pub fn set(&mut self, cell: CellCoord, value: T) {
        if let Some(slot) = self.get_mut(cell) {
            *slot = value;
        }
    }

    /// Neighbor of `cell` at a relative offset, if it lies inside the grid
    ///
    /// No wrapping: offsets past any edge yield `None`.
    #[inline]
    pub fn offset(&self, cell: CellCoord, d_row: i32, d_col: i32) -> Option<CellCoord> {
        cell.shifted(d_row, d_col).filter(|c| self.contains(*c))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.data.iter_mut()
    }

    /// All cells in scan order with their values
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, &T)> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| (CellCoord::new(i / cols, i % cols), v))
    }

    /// One row as a slice
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.rows {
            Some(&self.data[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.shape() == other.shape()
    }
}
