//! Loading run inputs from rasters and saving the result
//!
//! The land-use raster's header and `.prj` sidecar travel untouched from
//! input to output; the transition core never sees them.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::core::error::{LandUseError, Result};
use crate::core::types::{Category, DEFAULT_NO_DATA};
use crate::raster::ascii::{read_ascii_grid, write_ascii_grid, AsciiRaster, RasterHeader};
use crate::spatial::Grid;
use crate::transition::Landscape;

/// Georeferencing carried from the land-use raster to the output
#[derive(Debug, Clone, PartialEq)]
pub struct RasterMetadata {
    pub header: RasterHeader,
    /// Contents of the `.prj` sidecar, if there was one
    pub projection: Option<String>,
}

/// Categorical land-use raster
#[derive(Debug, Clone)]
pub struct LandUseRaster {
    pub grid: Grid<Category>,
    pub no_data: Category,
    pub metadata: RasterMetadata,
}

fn sidecar_path(path: &Path) -> PathBuf {
    path.with_extension("prj")
}

fn open_ascii(path: &Path) -> Result<AsciiRaster> {
    let file = File::open(path)?;
    read_ascii_grid(BufReader::new(file), path)
}

fn as_category(value: f64, path: &Path, what: impl std::fmt::Display) -> Result<Category> {
    if value.fract() == 0.0 && value >= Category::MIN as f64 && value <= Category::MAX as f64 {
        Ok(value as Category)
    } else {
        Err(LandUseError::InvalidCategory {
            path: path.to_path_buf(),
            message: format!("{} {} is not an integer category code", what, value),
        })
    }
}

fn check_alignment(reference: &RasterHeader, header: &RasterHeader, role: &'static str, path: &Path) {
    if !reference.is_aligned_with(header) {
        tracing::warn!(
            path = %path.display(),
            role,
            "raster origin or cell size differs from the land-use raster; assuming cell alignment"
        );
    }
}

/// Read a categorical land-use raster
///
/// A missing `NODATA_value` falls back to `DEFAULT_NO_DATA`.
pub fn read_land_use(path: &Path) -> Result<LandUseRaster> {
    let AsciiRaster { header, values } = open_ascii(path)?;

    let no_data = match header.no_data {
        Some(value) => as_category(value, path, "NODATA_value")?,
        None => DEFAULT_NO_DATA,
    };

    let (rows, cols) = values.shape();
    let data = values
        .cells()
        .map(|(cell, &v)| as_category(v, path, format_args!("cell {}", cell)))
        .collect::<Result<Vec<_>>>()?;
    let grid = Grid::from_vec(rows, cols, data)?;

    let prj = sidecar_path(path);
    let projection = if prj.is_file() {
        Some(fs::read_to_string(&prj)?)
    } else {
        None
    };

    tracing::debug!(path = %path.display(), rows, cols, no_data, "loaded land-use raster");

    Ok(LandUseRaster {
        grid,
        no_data,
        metadata: RasterMetadata { header, projection },
    })
}

/// Read a continuous suitability raster; no-data cells become `-inf`
pub fn read_suitability(path: &Path, reference: &RasterHeader) -> Result<Grid<f64>> {
    let AsciiRaster { header, mut values } = open_ascii(path)?;
    check_alignment(reference, &header, "suitability", path);

    if let Some(no_data) = header.no_data {
        for value in values.values_mut() {
            if *value == no_data {
                *value = f64::NEG_INFINITY;
            }
        }
    }
    Ok(values)
}

/// Read a constraint raster; only cells equal to 1 are excluded
pub fn read_constraint(path: &Path, reference: &RasterHeader) -> Result<Grid<bool>> {
    let AsciiRaster { header, values } = open_ascii(path)?;
    check_alignment(reference, &header, "constraint", path);

    let (rows, cols) = values.shape();
    let mask = values
        .values()
        .map(|&v| header.no_data != Some(v) && v == 1.0)
        .collect();
    Grid::from_vec(rows, cols, mask)
}

/// Load all inputs and bundle them into a `Landscape`
pub fn load_landscape(
    land_use: &Path,
    suitability: &Path,
    constraint: Option<&Path>,
) -> Result<(Landscape, RasterMetadata)> {
    let land_use = read_land_use(land_use)?;
    let reference = &land_use.metadata.header;

    let suitability = read_suitability(suitability, reference)?;
    let constraint = constraint
        .map(|path| read_constraint(path, reference))
        .transpose()?;

    let landscape = Landscape::new(land_use.grid, suitability, constraint, land_use.no_data)?;
    Ok((landscape, land_use.metadata))
}

/// Write the output grid with the land-use raster's georeferencing
///
/// The no-data value is always written so the sentinel survives a
/// round trip even when the input header omitted it.
pub fn write_land_use(
    path: &Path,
    grid: &Grid<Category>,
    no_data: Category,
    metadata: &RasterMetadata,
) -> Result<()> {
    let mut header = metadata.header.clone();
    header.rows = grid.rows();
    header.cols = grid.cols();
    header.no_data = Some(no_data as f64);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_ascii_grid(BufWriter::new(file), &header, grid)?;

    if let Some(projection) = &metadata.projection {
        fs::write(sidecar_path(path), projection)?;
    }

    tracing::info!(path = %path.display(), "wrote output raster");
    Ok(())
}
