//! Integration tests for raster loading and saving
//!
//! Rasters are written to a scratch directory, loaded into a landscape,
//! run through one transition and written back out.

use std::fs;
use std::path::PathBuf;

use landuse_ca::core::types::CellCoord;
use landuse_ca::core::{LandUseError, RunParams, Scenario};
use landuse_ca::raster::{load_landscape, read_land_use, write_land_use};
use landuse_ca::transition::simulate_seeded;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("landuse_ca_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

const HEADER: &str = "ncols 4\nnrows 3\nxllcorner 500000\nyllcorner 4100000\ncellsize 30\n";
const PROJECTION: &str = "PROJCS[\"WGS_1984_UTM_Zone_33N\"]";

#[test]
fn test_load_run_save_round_trip() {
    let dir = scratch_dir("round_trip");

    let land_use = dir.join("land_use.asc");
    fs::write(
        &land_use,
        format!("{HEADER}NODATA_value -1\n1 1 2 1\n1 -1 1 1\n3 3 3 3\n"),
    )
    .unwrap();
    fs::write(dir.join("land_use.prj"), PROJECTION).unwrap();

    let suitability = dir.join("suitability.asc");
    fs::write(
        &suitability,
        format!("{HEADER}NODATA_value -9999\n0.9 0.9 0.9 0.1\n0.9 0.9 -9999 0.9\n0.9 0.9 0.9 0.9\n"),
    )
    .unwrap();

    let constraint = dir.join("constraint.asc");
    fs::write(&constraint, format!("{HEADER}1 0 0 0\n0 0 0 0\n0 0 0 0\n")).unwrap();

    let (landscape, metadata) = load_landscape(&land_use, &suitability, Some(constraint.as_path())).unwrap();
    assert_eq!(landscape.no_data(), -1);
    assert_eq!(landscape.shape(), (3, 4));
    assert!(landscape.is_excluded(CellCoord::new(0, 0)));
    assert_eq!(
        landscape.suitability().get(CellCoord::new(1, 2)),
        Some(&f64::NEG_INFINITY)
    );
    assert_eq!(metadata.projection.as_deref(), Some(PROJECTION));

    let mut params = RunParams::new(2, 10);
    params.neighborhood = "Von Neumann".into();
    params.suitability_threshold = 0.5;
    let config = params.validate().unwrap();

    let output = simulate_seeded(&landscape, &config, 17).unwrap();

    // (0,1) is the only suitable Von Neumann neighbor of the 2: (0,3) scores
    // too low and (1,2) has no-data suitability
    assert_eq!(output.grid.row(0), Some(&[1, 2, 2, 1][..]));
    assert_eq!(output.grid.row(1), Some(&[1, -1, 1, 1][..]));

    let out_path = dir.join("out").join("result.asc");
    write_land_use(&out_path, &output.grid, landscape.no_data(), &metadata).unwrap();

    let reloaded = read_land_use(&out_path).unwrap();
    assert_eq!(reloaded.grid, output.grid);
    assert_eq!(reloaded.no_data, -1);
    assert_eq!(reloaded.metadata.header.origin, metadata.header.origin);
    assert_eq!(reloaded.metadata.header.cell_size, 30.0);
    assert_eq!(
        fs::read_to_string(dir.join("out").join("result.prj")).unwrap(),
        PROJECTION
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_no_data_uses_default_sentinel() {
    let dir = scratch_dir("default_nodata");
    let land_use = dir.join("lu.asc");
    fs::write(&land_use, format!("{HEADER}1 1 2 1\n1 1 1 1\n3 3 3 -9999\n")).unwrap();

    let raster = read_land_use(&land_use).unwrap();
    assert_eq!(raster.no_data, -9999);
    assert!(raster.metadata.projection.is_none());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_shape_mismatch_between_rasters() {
    let dir = scratch_dir("mismatch");
    let land_use = dir.join("lu.asc");
    fs::write(&land_use, format!("{HEADER}1 1 2 1\n1 1 1 1\n3 3 3 3\n")).unwrap();

    let suitability = dir.join("suit.asc");
    fs::write(
        &suitability,
        "ncols 2\nnrows 2\nxllcorner 500000\nyllcorner 4100000\ncellsize 30\n1 1\n1 1\n",
    )
    .unwrap();

    let err = load_landscape(&land_use, &suitability, None).unwrap_err();
    assert!(matches!(
        err,
        LandUseError::DimensionMismatch { grid: "suitability", .. }
    ));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_fractional_category_rejected() {
    let dir = scratch_dir("fractional");
    let land_use = dir.join("lu.asc");
    fs::write(&land_use, format!("{HEADER}1 1 2.5 1\n1 1 1 1\n3 3 3 3\n")).unwrap();

    match read_land_use(&land_use) {
        Err(LandUseError::InvalidCategory { message, .. }) => assert!(message.contains("cell (0, 2)")),
        other => panic!("unexpected result: {other:?}"),
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_sample_scenario_runs() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/sample/scenario.toml");
    let scenario = Scenario::load(&path).unwrap();
    let config = scenario.params.validate().unwrap();

    let (landscape, metadata) = load_landscape(
        &scenario.land_use,
        &scenario.suitability,
        scenario.constraint.as_deref(),
    )
    .unwrap();
    assert_eq!(landscape.shape(), (8, 8));
    assert!(metadata.projection.is_some());

    let seed = scenario.params.seed.unwrap();
    let output = simulate_seeded(&landscape, &config, seed).unwrap();
    assert!(output.stats.engine.changed <= config.max_changes);
    assert!(output.stats.engine.changed > 0);
}
