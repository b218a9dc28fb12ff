//! Integration tests for a full transition epoch
//!
//! These tests drive the public API the way the command-line tool does:
//! - Expansion limited by the change budget
//! - Retraction by neighborhood majority, including ties
//! - Constraint masks and no-data cells
//! - Zero budget and reproducibility for a fixed seed

use landuse_ca::core::types::{CellCoord, DEFAULT_NO_DATA};
use landuse_ca::core::{LandUseError, RunParams};
use landuse_ca::spatial::Grid;
use landuse_ca::transition::{count_changed_cells, simulate_seeded, Landscape};

const ND: i32 = DEFAULT_NO_DATA;

fn uniform_landscape(rows: Vec<Vec<i32>>, suitability: f64) -> Landscape {
    let land_use = Grid::from_rows(rows).unwrap();
    let (r, c) = land_use.shape();
    Landscape::new(land_use, Grid::filled(r, c, suitability), None, ND).unwrap()
}

fn is_moore_adjacent(a: CellCoord, b: CellCoord) -> bool {
    a != b && a.row.abs_diff(b.row) <= 1 && a.col.abs_diff(b.col) <= 1
}

#[test]
fn test_simple_expansion_scenario() {
    let landscape = uniform_landscape(
        vec![
            vec![1, 1, 1, 1],
            vec![1, 2, 1, 1],
            vec![1, 1, 1, 1],
            vec![1, 1, 1, 1],
        ],
        1.0,
    );
    let seed_cell = CellCoord::new(1, 1);

    let mut params = RunParams::new(2, 3);
    params.neighborhood = "Moore".into();
    params.neighborhood_threshold = 1;
    params.suitability_threshold = 0.0;
    let config = params.validate().unwrap();

    for seed in 0..25 {
        let output = simulate_seeded(&landscape, &config, seed).unwrap();

        let converted: Vec<CellCoord> = output
            .grid
            .cells()
            .filter(|&(cell, &v)| v == 2 && cell != seed_cell)
            .map(|(cell, _)| cell)
            .collect();

        assert_eq!(converted.len(), 3, "seed {seed}");
        for cell in converted {
            assert!(
                is_moore_adjacent(cell, seed_cell),
                "seed {seed}: {cell} is not next to an original 2"
            );
        }
        assert_eq!(output.stats.engine.changed, 3);
        assert_eq!(output.stats.repaired_cells, 0);
    }
}

#[test]
fn test_retraction_majority_tie_scenario() {
    let landscape = uniform_landscape(
        vec![
            vec![ND, 3, ND],
            vec![5, 7, 5],
            vec![ND, 3, ND],
        ],
        1.0,
    );

    let mut params = RunParams::new(7, 10);
    params.change_type = "retraction".into();
    params.neighborhood = "Von Neumann".into();
    params.neighborhood_threshold = 0;
    let config = params.validate().unwrap();

    let output = simulate_seeded(&landscape, &config, 11).unwrap();
    assert_eq!(output.grid.get(CellCoord::new(1, 1)), Some(&3));
    assert_eq!(count_changed_cells(landscape.land_use(), &output.grid), 1);
}

#[test]
fn test_retraction_to_clear_majority() {
    let landscape = uniform_landscape(
        vec![
            vec![4, 4, 4],
            vec![4, 6, 1],
            vec![4, 1, 1],
        ],
        1.0,
    );

    let mut params = RunParams::new(6, 1);
    params.change_type = "Retraction".into();
    params.neighborhood_threshold = 0;
    let config = params.validate().unwrap();

    // Five 4s against three 1s
    let output = simulate_seeded(&landscape, &config, 5).unwrap();
    assert_eq!(output.grid.get(CellCoord::new(1, 1)), Some(&4));
}

#[test]
fn test_zero_budget_scenario() {
    let landscape = uniform_landscape(
        vec![
            vec![2, 1, 1],
            vec![1, 1, 3],
            vec![ND, 1, 1],
        ],
        1.0,
    );

    for change_type in ["expansion", "retraction"] {
        for neighborhood in ["Moore", "Von Neumann", "Extended Moore", "Extended Von Neumann"] {
            let mut params = RunParams::new(2, 0);
            params.change_type = change_type.into();
            params.neighborhood = neighborhood.into();
            params.neighborhood_threshold = 0;
            let config = params.validate().unwrap();

            let output = simulate_seeded(&landscape, &config, 42).unwrap();
            assert_eq!(&output.grid, landscape.land_use());
        }
    }
}

#[test]
fn test_constraint_mask_blocks_conversion() {
    let land_use = Grid::from_rows(vec![vec![2, 1, 1], vec![1, 1, 1]]).unwrap();
    let constraint = Grid::from_rows(vec![
        vec![false, true, false],
        vec![true, true, false],
    ])
    .unwrap();
    let landscape =
        Landscape::new(land_use, Grid::filled(2, 3, 1.0), Some(constraint), ND).unwrap();

    let config = RunParams::new(2, 100).validate().unwrap();
    let output = simulate_seeded(&landscape, &config, 3).unwrap();

    // The only unconstrained cells are too far from the 2 for a Moore ring
    assert_eq!(&output.grid, landscape.land_use());
    assert_eq!(output.stats.candidates, 2);
}

#[test]
fn test_no_data_cells_never_converted() {
    let landscape = uniform_landscape(vec![vec![2, ND, 1], vec![ND, 1, ND]], 1.0);
    let mut params = RunParams::new(2, 100);
    params.neighborhood_threshold = 0;
    let config = params.validate().unwrap();

    let output = simulate_seeded(&landscape, &config, 8).unwrap();
    assert_eq!(output.grid.row(0), Some(&[2, ND, 2][..]));
    assert_eq!(output.grid.row(1), Some(&[ND, 2, ND][..]));
}

#[test]
fn test_extended_neighborhood_reaches_two_cells() {
    let landscape = uniform_landscape(vec![vec![2, 1, 1, 1, 1]], 1.0);

    let mut params = RunParams::new(2, 100);
    params.neighborhood = "Extended Von Neumann".into();
    let config = params.validate().unwrap();

    let output = simulate_seeded(&landscape, &config, 0).unwrap();
    assert_eq!(output.grid.row(0), Some(&[2, 2, 2, 1, 1][..]));
}

#[test]
fn test_same_seed_reproduces_run() {
    let rows: Vec<Vec<i32>> = (0..12)
        .map(|r| (0..12).map(|c| if (r * 7 + c * 3) % 11 == 0 { 2 } else { 1 + (r + c) % 3 }).collect())
        .collect();
    let landscape = uniform_landscape(rows, 0.8);
    let config = RunParams::new(2, 15).validate().unwrap();

    let first = simulate_seeded(&landscape, &config, 2024).unwrap();
    let second = simulate_seeded(&landscape, &config, 2024).unwrap();
    assert_eq!(first.grid, second.grid);
    assert!(count_changed_cells(landscape.land_use(), &first.grid) <= 15);
}

#[test]
fn test_invalid_configuration_detected_before_run() {
    let mut params = RunParams::new(2, 10);
    params.neighborhood = "Hexagonal".into();
    assert!(matches!(
        params.validate(),
        Err(LandUseError::InvalidConfiguration(_))
    ));

    let mut params = RunParams::new(2, 10);
    params.change_type = "growth".into();
    assert!(matches!(
        params.validate(),
        Err(LandUseError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_dimension_mismatch_rejected() {
    let land_use = Grid::filled(3, 3, 1);
    let err = Landscape::new(land_use, Grid::filled(3, 4, 1.0), None, ND).unwrap_err();
    assert!(matches!(err, LandUseError::DimensionMismatch { .. }));
}

#[test]
fn test_no_data_target_never_written() {
    let landscape = uniform_landscape(vec![vec![ND, 1, 1], vec![1, 1, 1]], 1.0);

    for change_type in ["expansion", "retraction"] {
        let mut params = RunParams::new(ND, 10);
        params.change_type = change_type.into();
        let config = params.validate().unwrap();

        let err = simulate_seeded(&landscape, &config, 0).unwrap_err();
        assert!(matches!(err, LandUseError::InvalidConfiguration(_)), "{change_type}");
    }
}
