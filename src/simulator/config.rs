//! Simulation configuration.

use crate::core::constants::{
    DEFAULT_ROUNDS, DEFAULT_SIMULATIONS, MAX_DRAWS_PER_ROUND, MIN_DRAWS_PER_ROUND, MIN_ROUNDS,
    MIN_SIMULATIONS,
};
use crate::lottery::{LotteryConfig, LotteryError, ResolutionTable, Result};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Number of independent lottery trials
    pub simulations: u64,

    /// Lottery rounds per trial
    pub rounds: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Draws a single round may take before the trial is abandoned
    pub max_draws_per_round: u64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per trial, 3 = per draw)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            simulations: DEFAULT_SIMULATIONS,
            rounds: DEFAULT_ROUNDS,
            seed: None,
            max_draws_per_round: MAX_DRAWS_PER_ROUND,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Most rounds `lottery` can support without risking a round that can
    /// never end.
    ///
    /// Going into round `r`, at most `r - 1` earlier winners plus the `r - 1`
    /// ranks sitting in finalized positions are ineligible, so at least
    /// `2r - 1` ranks must own a combination.
    pub fn max_rounds(lottery: &LotteryConfig, table: &ResolutionTable) -> u32 {
        let assignable = table.assignable_ranks() as u32;
        lottery.max_rounds.min((assignable + 1) / 2)
    }

    /// Checks the run against the lottery it will drive. Runs before any
    /// trial starts.
    pub fn validate(&self, lottery: &LotteryConfig, table: &ResolutionTable) -> Result<()> {
        if self.simulations < MIN_SIMULATIONS {
            return Err(LotteryError::InvalidSimulations {
                simulations: self.simulations,
                min: MIN_SIMULATIONS,
            });
        }

        if self.max_draws_per_round < MIN_DRAWS_PER_ROUND {
            return Err(LotteryError::InvalidDrawLimit {
                draws: self.max_draws_per_round,
                min: MIN_DRAWS_PER_ROUND,
            });
        }

        let max = Self::max_rounds(lottery, table);
        if self.rounds < MIN_ROUNDS || self.rounds > max {
            return Err(LotteryError::InvalidRounds {
                rounds: self.rounds,
                min: MIN_ROUNDS,
                max,
            });
        }

        Ok(())
    }
}
