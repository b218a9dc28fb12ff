pub mod config;
pub mod error;
pub mod types;

pub use config::{RunConfig, RunParams, Scenario};
pub use error::{LandUseError, Result};
pub use types::{Category, CellCoord, ChangeType, NeighborhoodKind, DEFAULT_NO_DATA};
