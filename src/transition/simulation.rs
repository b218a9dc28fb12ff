//! One transition epoch, start to finish

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::RunConfig;
use crate::core::error::{LandUseError, Result};
use crate::transition::candidates::select_candidates;
use crate::transition::engine::run_transition;
use crate::transition::landscape::Landscape;
use crate::transition::output::{TransitionOutput, TransitionStats};
use crate::transition::repair::repair;

/// Run selection, the transition pass and the repair pass
///
/// Fails if the target category is the landscape's no-data sentinel, since
/// the rule would then write no-data into classified cells.
pub fn simulate<R: Rng + ?Sized>(
    landscape: &Landscape,
    config: &RunConfig,
    rng: &mut R,
) -> Result<TransitionOutput> {
    if config.target_category == landscape.no_data() {
        return Err(LandUseError::InvalidConfiguration(format!(
            "target category {} is the land-use no-data value",
            config.target_category
        )));
    }

    let start = std::time::Instant::now();

    let candidates = select_candidates(landscape, config);
    let candidate_count = candidates.len();

    let (mut grid, tally) = run_transition(landscape, candidates, config, rng);

    let report = repair(
        &mut grid,
        landscape.valid_categories(),
        landscape.no_data(),
        config.target_category,
    );

    let stats = TransitionStats::new(
        config,
        landscape.shape(),
        landscape.valid_categories().iter().copied().collect(),
        candidate_count,
        tally,
        report,
        start.elapsed(),
    );

    tracing::info!(
        candidates = stats.candidates,
        changed = stats.engine.changed,
        repaired = stats.repaired_cells,
        elapsed_ms = stats.simulation_time_ms,
        "transition complete"
    );

    Ok(TransitionOutput { grid, stats })
}

/// `simulate` with a ChaCha8 generator seeded from `seed`
///
/// Identical inputs and seed always give identical output.
pub fn simulate_seeded(
    landscape: &Landscape,
    config: &RunConfig,
    seed: u64,
) -> Result<TransitionOutput> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut output = simulate(landscape, config, &mut rng)?;
    output.stats.seed = Some(seed);
    Ok(output)
}
