//! Raster I/O for run inputs and outputs

pub mod adapter;
pub mod ascii;

pub use adapter::{
    load_landscape, read_constraint, read_land_use, read_suitability, write_land_use,
    LandUseRaster, RasterMetadata,
};
pub use ascii::{read_ascii_grid, write_ascii_grid, AsciiRaster, RasterHeader};
