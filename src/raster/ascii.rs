//! Esri ASCII grid codec
//!
//! ```text
//! ncols         4
//! nrows         3
//! xllcorner     500000.0
//! yllcorner     4100000.0
//! cellsize      30.0
//! NODATA_value  -9999
//! 1 1 2 2
//! 1 -9999 2 2
//! 3 3 3 2
//! ```
//!
//! Header keys are case-insensitive and may come in any order; the body
//! holds `nrows * ncols` values, top row first, with free line wrapping.

use geo_types::Coord;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::core::error::{LandUseError, Result};
use crate::spatial::Grid;

/// Placement of a raster in map coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct RasterHeader {
    pub rows: usize,
    pub cols: usize,
    /// Lower-left corner of the lower-left cell
    pub origin: Coord<f64>,
    pub cell_size: f64,
    pub no_data: Option<f64>,
}

impl RasterHeader {
    pub fn new(rows: usize, cols: usize, origin: Coord<f64>, cell_size: f64) -> Self {
        Self {
            rows,
            cols,
            origin,
            cell_size,
            no_data: None,
        }
    }

    /// Same origin and cell size, within a small tolerance
    pub fn is_aligned_with(&self, other: &RasterHeader) -> bool {
        let tolerance = self.cell_size.abs().max(1.0) * 1e-9;
        (self.origin.x - other.origin.x).abs() <= tolerance
            && (self.origin.y - other.origin.y).abs() <= tolerance
            && (self.cell_size - other.cell_size).abs() <= tolerance
    }
}

/// A parsed ASCII grid: header plus raw cell values
#[derive(Debug, Clone)]
pub struct AsciiRaster {
    pub header: RasterHeader,
    pub values: Grid<f64>,
}

#[derive(Default)]
struct HeaderFields {
    ncols: Option<usize>,
    nrows: Option<usize>,
    x_corner: Option<f64>,
    y_corner: Option<f64>,
    x_center: Option<f64>,
    y_center: Option<f64>,
    cell_size: Option<f64>,
    no_data: Option<f64>,
}

fn format_error(path: &Path, line: usize, message: impl Into<String>) -> LandUseError {
    LandUseError::RasterFormat {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}

/// Parse an ASCII grid; `path` is only used in error messages
pub fn read_ascii_grid<R: BufRead>(reader: R, path: &Path) -> Result<AsciiRaster> {
    let mut fields = HeaderFields::default();
    let mut values: Vec<f64> = Vec::new();
    let mut in_body = false;
    let mut last_line = 0;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        last_line = line_no;
        let line = line?;
        let mut tokens = line.split_whitespace().peekable();

        let Some(&first) = tokens.peek() else {
            continue;
        };

        if !in_body && first.starts_with(|c: char| c.is_ascii_alphabetic()) {
            let key = first.to_ascii_lowercase();
            tokens.next();
            let raw = tokens
                .next()
                .ok_or_else(|| format_error(path, line_no, format!("header '{}' has no value", first)))?;
            let number: f64 = raw
                .parse()
                .map_err(|_| format_error(path, line_no, format!("header '{}' value '{}' is not a number", first, raw)))?;

            let count = |n: f64| -> Result<usize> {
                if n >= 0.0 && n.fract() == 0.0 {
                    Ok(n as usize)
                } else {
                    Err(format_error(path, line_no, format!("'{}' must be a non-negative integer", first)))
                }
            };

            match key.as_str() {
                "ncols" => fields.ncols = Some(count(number)?),
                "nrows" => fields.nrows = Some(count(number)?),
                "xllcorner" => fields.x_corner = Some(number),
                "yllcorner" => fields.y_corner = Some(number),
                "xllcenter" => fields.x_center = Some(number),
                "yllcenter" => fields.y_center = Some(number),
                "cellsize" => fields.cell_size = Some(number),
                "nodata_value" => fields.no_data = Some(number),
                _ => {
                    return Err(format_error(path, line_no, format!("unknown header key '{}'", first)));
                }
            }
            continue;
        }

        in_body = true;
        for token in tokens {
            let value: f64 = token
                .parse()
                .map_err(|_| format_error(path, line_no, format!("cell value '{}' is not a number", token)))?;
            values.push(value);
        }
    }

    let header = finish_header(fields, path, last_line)?;
    let expected = header
        .rows
        .checked_mul(header.cols)
        .ok_or_else(|| format_error(path, last_line, format!("{}x{} grid is too large", header.rows, header.cols)))?;
    if values.len() != expected {
        return Err(format_error(
            path,
            last_line,
            format!(
                "expected {} cell values ({}x{}), found {}",
                expected,
                header.rows,
                header.cols,
                values.len()
            ),
        ));
    }

    let values = Grid::from_vec(header.rows, header.cols, values)?;
    Ok(AsciiRaster { header, values })
}

fn finish_header(fields: HeaderFields, path: &Path, line: usize) -> Result<RasterHeader> {
    let missing = |key: &str| format_error(path, line, format!("missing header '{}'", key));

    let cols = fields.ncols.ok_or_else(|| missing("ncols"))?;
    let rows = fields.nrows.ok_or_else(|| missing("nrows"))?;
    let cell_size = fields.cell_size.ok_or_else(|| missing("cellsize"))?;
    if cell_size.is_nan() || cell_size <= 0.0 {
        return Err(format_error(path, line, "cellsize must be positive"));
    }

    let half = cell_size / 2.0;
    let x = match (fields.x_corner, fields.x_center) {
        (Some(corner), _) => corner,
        (None, Some(center)) => center - half,
        (None, None) => return Err(missing("xllcorner")),
    };
    let y = match (fields.y_corner, fields.y_center) {
        (Some(corner), _) => corner,
        (None, Some(center)) => center - half,
        (None, None) => return Err(missing("yllcorner")),
    };

    Ok(RasterHeader {
        rows,
        cols,
        origin: Coord { x, y },
        cell_size,
        no_data: fields.no_data,
    })
}

/// Write a grid in ASCII format, one raster row per line
pub fn write_ascii_grid<W, T>(mut writer: W, header: &RasterHeader, grid: &Grid<T>) -> Result<()>
where
    W: Write,
    T: std::fmt::Display,
{
    writeln!(writer, "ncols {}", header.cols)?;
    writeln!(writer, "nrows {}", header.rows)?;
    writeln!(writer, "xllcorner {}", header.origin.x)?;
    writeln!(writer, "yllcorner {}", header.origin.y)?;
    writeln!(writer, "cellsize {}", header.cell_size)?;
    if let Some(no_data) = header.no_data {
        writeln!(writer, "NODATA_value {}", no_data)?;
    }

    for row in 0..grid.rows() {
        let Some(values) = grid.row(row) else {
            break;
        };
        let line: Vec<String> = values.iter().map(ToString::to_string).collect();
        writeln!(writer, "{}", line.join(" "))?;
    }
    writer.flush()?;
    Ok(())
}
