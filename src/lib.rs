//! Land-use CA - cellular-automata land-use change over raster grids

pub mod core;
pub mod raster;
pub mod spatial;
pub mod transition;
