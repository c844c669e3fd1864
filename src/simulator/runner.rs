//! Simulation driver: builds the resolution table once, then runs every
//! trial against it and folds the outcomes into [`LotteryStats`].

use super::config::SimConfig;
use super::report::LotteryReport;
use super::stats::LotteryStats;
use crate::lottery::{LotteryConfig, ResolutionTable, Result, RoundResolver, TrialOutcome};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Run the full simulation and return a report.
///
/// Every configuration problem is reported before the first trial starts.
pub fn run_simulation(lottery: &LotteryConfig, config: &SimConfig) -> Result<LotteryReport> {
    lottery.validate()?;
    let table = lottery.build_table()?;
    config.validate(lottery, &table)?;

    if config.verbosity >= 1 {
        info!(
            simulations = config.simulations,
            rounds = config.rounds,
            seed = ?config.seed,
            "running draft lottery simulations"
        );
    }

    let initial_order = lottery.teams.initial_draft_order();
    let mut stats = LotteryStats::new(config.rounds);
    let mut last_draft_order = initial_order.clone();

    for trial in 0..config.simulations {
        // Create RNG for this trial
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(trial)),
            None => ChaCha8Rng::from_entropy(),
        };

        let outcome = simulate_trial(lottery, &table, config, &mut rng)?;

        if config.verbosity >= 2 {
            info!(
                trial = trial + 1,
                of = config.simulations,
                winners = ?outcome.winners,
                redraws = outcome.redraws.iter().map(|r| r.total()).sum::<u64>(),
                "trial complete"
            );
        }

        stats.record_trial(&outcome, &initial_order);
        last_draft_order = outcome.draft_order;
    }

    if config.verbosity >= 1 {
        info!(
            simulations = stats.simulations,
            retained = stats.original_draft_order_retained,
            "simulations complete"
        );
    }

    Ok(LotteryReport::new(stats, lottery, last_draft_order))
}

/// Run one trial from the pre-lottery order to the last round's winner.
pub fn simulate_trial(
    lottery: &LotteryConfig,
    table: &ResolutionTable,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Result<TrialOutcome> {
    RoundResolver::new(lottery, table, config.rounds).run(rng, config.max_draws_per_round)
}
