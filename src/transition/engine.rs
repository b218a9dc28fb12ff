//! Transition engine
//!
//! Visits candidate cells in a uniformly shuffled order and applies the
//! neighborhood/suitability rule to each until the change budget is spent.
//!
//! Every neighborhood lookup reads the *input* land-use grid. Writes go to a
//! separate output grid, so a conversion early in the pass never feeds the
//! decision for a later cell in the same run.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::RunConfig;
use crate::core::types::{Category, CellCoord, ChangeType};
use crate::spatial::{offsets, Grid, Offset};
use crate::transition::landscape::Landscape;

/// What happened to one candidate cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellOutcome {
    /// Failed the neighborhood or suitability threshold
    Ineligible,
    /// Written with a new category
    Converted(Category),
    /// Retraction found no classified neighbor to vote
    EmptyNeighborhood,
    /// Retraction majority is not a valid category; cell left alone
    InvalidMajority(Category),
    /// Retraction majority equals the cell's current value
    MajorityUnchanged,
}

/// Per-run counters collected by the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineTally {
    pub evaluated: usize,
    pub eligible: usize,
    pub changed: usize,
    pub empty_neighborhood: usize,
    pub invalid_majority: usize,
    pub majority_unchanged: usize,
}

impl EngineTally {
    fn record(&mut self, outcome: CellOutcome) {
        self.evaluated += 1;
        if outcome != CellOutcome::Ineligible {
            self.eligible += 1;
        }
        match outcome {
            CellOutcome::Ineligible => {}
            CellOutcome::Converted(_) => self.changed += 1,
            CellOutcome::EmptyNeighborhood => self.empty_neighborhood += 1,
            CellOutcome::InvalidMajority(_) => self.invalid_majority += 1,
            CellOutcome::MajorityUnchanged => self.majority_unchanged += 1,
        }
    }
}

/// Neighborhood statistics for one cell, read from the input grid
#[derive(Debug, Default)]
struct NeighborhoodSample {
    /// Neighbors already in the target category
    matches: usize,
    /// Classified (non no-data) neighbor values
    values: Vec<Category>,
}

impl NeighborhoodSample {
    fn gather(
        &mut self,
        land_use: &Grid<Category>,
        cell: CellCoord,
        table: &[Offset],
        target: Category,
        no_data: Category,
    ) {
        self.matches = 0;
        self.values.clear();

        for &(d_row, d_col) in table {
            let Some(neighbor) = land_use.offset(cell, d_row, d_col) else {
                continue;
            };
            let Some(&value) = land_use.get(neighbor) else {
                continue;
            };
            if value == target {
                self.matches += 1;
            }
            if value != no_data {
                self.values.push(value);
            }
        }
    }
}

/// Most frequent value; ties go to the smallest category code
///
/// Sorts `values` in place.
pub fn majority_category(values: &mut [Category]) -> Option<Category> {
    values.sort_unstable();

    let mut best: Option<(Category, usize)> = None;
    let mut start = 0;
    while start < values.len() {
        let value = values[start];
        let end = start + values[start..].iter().take_while(|&&v| v == value).count();
        let count = end - start;
        // Strict comparison keeps the earliest (smallest) value on a tie
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
        start = end;
    }
    best.map(|(value, _)| value)
}

/// Applies the transition rule to a landscape
pub struct TransitionEngine<'a> {
    landscape: &'a Landscape,
    config: &'a RunConfig,
    table: &'static [Offset],
    sample: NeighborhoodSample,
}

impl<'a> TransitionEngine<'a> {
    pub fn new(landscape: &'a Landscape, config: &'a RunConfig) -> Self {
        Self {
            landscape,
            config,
            table: offsets(config.neighborhood_kind),
            sample: NeighborhoodSample::default(),
        }
    }

    /// Decide the fate of one cell given the current output value
    pub fn evaluate(&mut self, cell: CellCoord, current: Category) -> CellOutcome {
        let config = self.config;
        let landscape = self.landscape;

        self.sample.gather(
            landscape.land_use(),
            cell,
            self.table,
            config.target_category,
            landscape.no_data(),
        );

        let suitability = landscape
            .suitability()
            .get(cell)
            .copied()
            .unwrap_or(f64::NEG_INFINITY);

        // NaN suitability never passes
        let suitable = suitability >= config.suitability_threshold;
        if self.sample.matches < config.neighborhood_threshold || !suitable {
            return CellOutcome::Ineligible;
        }

        match config.change_type {
            ChangeType::Expansion => CellOutcome::Converted(config.target_category),
            ChangeType::Retraction => match majority_category(&mut self.sample.values) {
                None => CellOutcome::EmptyNeighborhood,
                Some(mode) if !landscape.valid_categories().contains(&mode) => {
                    CellOutcome::InvalidMajority(mode)
                }
                Some(mode) if mode == current => CellOutcome::MajorityUnchanged,
                Some(mode) => CellOutcome::Converted(mode),
            },
        }
    }

    /// Run one transition epoch over `candidates`
    ///
    /// The output starts as a copy of the input land-use grid and is returned
    /// with the tally. At most `config.max_changes` cells differ from the input.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        mut candidates: Vec<CellCoord>,
        rng: &mut R,
    ) -> (Grid<Category>, EngineTally) {
        let mut output = self.landscape.land_use().clone();
        let mut tally = EngineTally::default();
        let budget = self.config.max_changes;

        candidates.shuffle(rng);

        tracing::debug!(
            candidates = candidates.len(),
            budget,
            neighborhood = %self.config.neighborhood_kind,
            change_type = %self.config.change_type,
            "starting transition pass"
        );

        for cell in candidates {
            if tally.changed >= budget {
                break;
            }

            let Some(&current) = output.get(cell) else {
                continue;
            };

            let outcome = self.evaluate(cell, current);
            if let CellOutcome::Converted(value) = outcome {
                output.set(cell, value);
                tracing::trace!(%cell, from = current, to = value, "cell converted");
            }
            tally.record(outcome);
        }

        tracing::debug!(
            evaluated = tally.evaluated,
            eligible = tally.eligible,
            changed = tally.changed,
            "transition pass finished"
        );

        (output, tally)
    }
}

/// Run the engine once over `candidates` with the given generator
pub fn run_transition<R: Rng + ?Sized>(
    landscape: &Landscape,
    candidates: Vec<CellCoord>,
    config: &RunConfig,
    rng: &mut R,
) -> (Grid<Category>, EngineTally) {
    TransitionEngine::new(landscape, config).run(candidates, rng)
}
