//! Land-use CA - Entry Point
//!
//! Loads a land-use raster, a suitability raster and an optional constraint
//! raster, runs one cellular-automata transition epoch and writes the result
//! with the land-use raster's georeferencing.

use clap::Parser;
use std::path::PathBuf;

use landuse_ca::core::error::{LandUseError, Result};
use landuse_ca::core::{RunParams, Scenario};
use landuse_ca::raster::{load_landscape, write_land_use};
use landuse_ca::transition::simulate_seeded;

/// Simulate land-use expansion or retraction with a cellular automaton
#[derive(Parser, Debug)]
#[command(name = "landuse-ca")]
#[command(about = "Run one cellular-automata land-use transition over ASCII grid rasters")]
struct Args {
    /// Scenario TOML file; other flags override its values
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Categorical land-use raster (.asc)
    #[arg(long)]
    land_use: Option<PathBuf>,

    /// Continuous suitability raster (.asc)
    #[arg(long)]
    suitability: Option<PathBuf>,

    /// Constraint raster (.asc); cells equal to 1 never change
    #[arg(long)]
    constraint: Option<PathBuf>,

    /// Output land-use raster (.asc)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Land-use category that expands or retracts
    #[arg(long, allow_negative_numbers = true)]
    target_category: Option<i32>,

    /// "expansion" or "retraction"
    #[arg(long)]
    change_type: Option<String>,

    /// Moore, "Von Neumann", "Extended Moore" or "Extended Von Neumann"
    #[arg(long)]
    neighborhood: Option<String>,

    /// Minimum neighbors already in the target category
    #[arg(long, allow_negative_numbers = true)]
    neighborhood_threshold: Option<i64>,

    /// Minimum suitability of a candidate cell
    #[arg(long, allow_negative_numbers = true)]
    suitability_threshold: Option<f64>,

    /// Maximum number of cells changed
    #[arg(long, allow_negative_numbers = true)]
    max_changes: Option<i64>,

    /// Random seed for a reproducible traversal order
    #[arg(long)]
    seed: Option<u64>,

    /// Write run statistics as JSON to this file
    #[arg(long)]
    stats: Option<PathBuf>,
}

fn missing(flag: &str) -> LandUseError {
    LandUseError::InvalidConfiguration(format!("{} is required without --scenario", flag))
}

/// Combine the scenario file (if any) with command-line overrides
fn resolve_scenario(args: Args) -> Result<(Scenario, Option<PathBuf>)> {
    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario {
            land_use: args.land_use.clone().ok_or_else(|| missing("--land-use"))?,
            suitability: args.suitability.clone().ok_or_else(|| missing("--suitability"))?,
            constraint: None,
            output: args.output.clone().ok_or_else(|| missing("--output"))?,
            params: RunParams::new(
                args.target_category.ok_or_else(|| missing("--target-category"))?,
                args.max_changes.ok_or_else(|| missing("--max-changes"))?,
            ),
        },
    };

    if let Some(path) = args.land_use {
        scenario.land_use = path;
    }
    if let Some(path) = args.suitability {
        scenario.suitability = path;
    }
    if let Some(path) = args.constraint {
        scenario.constraint = Some(path);
    }
    if let Some(path) = args.output {
        scenario.output = path;
    }

    let params = &mut scenario.params;
    if let Some(target) = args.target_category {
        params.target_category = target;
    }
    if let Some(change_type) = args.change_type {
        params.change_type = change_type;
    }
    if let Some(neighborhood) = args.neighborhood {
        params.neighborhood = neighborhood;
    }
    if let Some(threshold) = args.neighborhood_threshold {
        params.neighborhood_threshold = threshold;
    }
    if let Some(threshold) = args.suitability_threshold {
        params.suitability_threshold = threshold;
    }
    if let Some(max_changes) = args.max_changes {
        params.max_changes = max_changes;
    }
    if let Some(seed) = args.seed {
        params.seed = Some(seed);
    }

    Ok((scenario, args.stats))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let (scenario, stats_path) = resolve_scenario(Args::parse())?;

    // Validate before any raster is read
    let config = scenario.params.validate()?;

    let seed = scenario.params.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "traversal seed");

    let (landscape, metadata) = load_landscape(
        &scenario.land_use,
        &scenario.suitability,
        scenario.constraint.as_deref(),
    )?;

    let output = simulate_seeded(&landscape, &config, seed)?;
    write_land_use(&scenario.output, &output.grid, landscape.no_data(), &metadata)?;

    if let Some(path) = stats_path {
        std::fs::write(&path, output.to_json()?)?;
        tracing::info!(path = %path.display(), "wrote run statistics");
    }

    println!("{}", output.summary());
    Ok(())
}
