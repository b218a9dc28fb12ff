use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LandUseError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Dimension mismatch: {grid} grid is {found:?} (rows, cols), land-use grid is {expected:?}")]
    DimensionMismatch {
        grid: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Raster format error in {path:?} (line {line}): {message}")]
    RasterFormat {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid category in {path:?}: {message}")]
    InvalidCategory { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LandUseError>;
