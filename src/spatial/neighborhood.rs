//! Neighborhood catalog
//!
//! Fixed relative offsets `(d_row, d_col)` for each neighborhood kind.
//! No table contains the zero offset or a duplicate.

use crate::core::types::NeighborhoodKind;

/// Relative `(d_row, d_col)` offset from a center cell
pub type Offset = (i32, i32);

/// 3x3 ring
#[rustfmt::skip]
const MOORE: [Offset; 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// N, W, E, S
const VON_NEUMANN: [Offset; 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// 5x5 square minus the center
#[rustfmt::skip]
const EXTENDED_MOORE: [Offset; 24] = [
    (-2, -2), (-2, -1), (-2, 0), (-2, 1), (-2, 2),
    (-1, -2), (-1, -1), (-1, 0), (-1, 1), (-1, 2),
    (0, -2),  (0, -1),           (0, 1),  (0, 2),
    (1, -2),  (1, -1),  (1, 0),  (1, 1),  (1, 2),
    (2, -2),  (2, -1),  (2, 0),  (2, 1),  (2, 2),
];

/// Manhattan radius 2 diamond minus the center
#[rustfmt::skip]
const EXTENDED_VON_NEUMANN: [Offset; 12] = [
                        (-2, 0),
              (-1, -1), (-1, 0), (-1, 1),
    (0, -2),  (0, -1),           (0, 1),  (0, 2),
              (1, -1),  (1, 0),  (1, 1),
                        (2, 0),
];

/// Offsets examined around a cell for the given neighborhood kind
pub fn offsets(kind: NeighborhoodKind) -> &'static [Offset] {
    match kind {
        NeighborhoodKind::Moore => &MOORE,
        NeighborhoodKind::VonNeumann => &VON_NEUMANN,
        NeighborhoodKind::ExtendedMoore => &EXTENDED_MOORE,
        NeighborhoodKind::ExtendedVonNeumann => &EXTENDED_VON_NEUMANN,
    }
}
