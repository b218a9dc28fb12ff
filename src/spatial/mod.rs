pub mod grid;
pub mod neighborhood;

pub use grid::Grid;
pub use neighborhood::{offsets, Offset};
