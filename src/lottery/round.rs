//! Per-trial round resolution.
//!
//! Each round keeps drawing until a combination names a rank that has not
//! already won this trial and is still inside the round's window. Every
//! other draw is a redraw and is tallied against the round.

use super::ball::{Ball, Draw};
use super::config::LotteryConfig;
use super::draft_order::DraftOrder;
use super::error::{LotteryError, Result};
use super::machine::Machine;
use super::table::ResolutionTable;
use super::Rank;
use crate::core::constants::REDRAW_WARN_THRESHOLD;
use rand::Rng;
use tracing::{debug, warn};

/// What a single draw amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The combination belongs to no rank.
    Redraw,
    /// The rank already won an earlier round of this trial.
    DuplicateWinner(Rank),
    /// The rank holds a position an earlier round already finalized.
    LockedIn(Rank),
    /// The rank wins and moves from position `from` to `to` (1-based).
    Winner { rank: Rank, from: usize, to: usize },
}

impl DrawOutcome {
    pub fn is_redraw(&self) -> bool {
        !matches!(self, DrawOutcome::Winner { .. })
    }
}

/// Where a trial's resolver is between draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    AwaitingDraw { round: u32 },
    RoundComplete { round: u32, winner: Rank },
    AllRoundsComplete,
}

/// One machine cycle and its resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawResult {
    pub round: u32,
    pub draw: Draw,
    pub outcome: DrawOutcome,
}

/// Redraws within one round, split by cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawCounts {
    pub no_winner: u64,
    pub duplicate_winner: u64,
    pub locked_in: u64,
}

impl RedrawCounts {
    pub fn record(&mut self, outcome: DrawOutcome) {
        match outcome {
            DrawOutcome::Redraw => self.no_winner += 1,
            DrawOutcome::DuplicateWinner(_) => self.duplicate_winner += 1,
            DrawOutcome::LockedIn(_) => self.locked_in += 1,
            DrawOutcome::Winner { .. } => {}
        }
    }

    pub fn total(&self) -> u64 {
        self.no_winner + self.duplicate_winner + self.locked_in
    }
}

/// Result of one complete trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialOutcome {
    /// Final draft order, position 1 first
    pub draft_order: Vec<Rank>,
    /// Winning rank of each round, round 1 first
    pub winners: Vec<Rank>,
    /// Redraws of each round, round 1 first
    pub redraws: Vec<RedrawCounts>,
}

impl TrialOutcome {
    pub fn order_preserved(&self, initial: &[Rank]) -> bool {
        self.draft_order == initial
    }
}

/// Drives one trial's rounds against a shared resolution table.
#[derive(Debug)]
pub struct RoundResolver<'a> {
    table: &'a ResolutionTable,
    balls: Vec<Ball>,
    balls_to_draw: usize,
    max_ranking_jump: u32,
    rounds: u32,
    machine: Machine,
    draft_order: DraftOrder,
    winners: Vec<Rank>,
    state: ResolverState,
}

impl<'a> RoundResolver<'a> {
    /// Starts a trial from the roster's pre-lottery order.
    pub fn new(config: &LotteryConfig, table: &'a ResolutionTable, rounds: u32) -> Self {
        Self::with_draft_order(config, table, rounds, config.teams.initial_draft_order())
    }

    pub fn with_draft_order(
        config: &LotteryConfig,
        table: &'a ResolutionTable,
        rounds: u32,
        initial_order: Vec<Rank>,
    ) -> Self {
        let state = if rounds == 0 {
            ResolverState::AllRoundsComplete
        } else {
            ResolverState::AwaitingDraw { round: 1 }
        };

        Self {
            table,
            balls: config.balls(),
            balls_to_draw: usize::from(config.balls_to_draw),
            max_ranking_jump: config.max_ranking_jump,
            rounds,
            machine: Machine::new(),
            draft_order: DraftOrder::new(initial_order),
            winners: Vec::with_capacity(rounds as usize),
            state,
        }
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    pub fn draft_order(&self) -> &DraftOrder {
        &self.draft_order
    }

    /// Winners so far, round 1 first.
    pub fn winners(&self) -> &[Rank] {
        &self.winners
    }

    /// Runs one draw cycle. Returns `None` once every round has a winner.
    pub fn step(&mut self, rng: &mut impl Rng) -> Option<DrawResult> {
        let round = match self.state {
            ResolverState::AwaitingDraw { round } => round,
            ResolverState::RoundComplete { round, .. } => {
                self.state = ResolverState::AwaitingDraw { round: round + 1 };
                round + 1
            }
            ResolverState::AllRoundsComplete => return None,
        };

        let draw = self.machine.draw(&self.balls, self.balls_to_draw, rng);
        let winner = draw
            .combination()
            .ok()
            .and_then(|combination| self.table.lookup(&combination));

        let outcome = match winner {
            None => DrawOutcome::Redraw,
            Some(rank) if self.winners.contains(&rank) => DrawOutcome::DuplicateWinner(rank),
            Some(rank) => match self
                .draft_order
                .move_winner(round, rank, self.max_ranking_jump)
            {
                None => DrawOutcome::LockedIn(rank),
                Some((from, to)) => {
                    self.winners.push(rank);
                    self.state = if round >= self.rounds {
                        ResolverState::AllRoundsComplete
                    } else {
                        ResolverState::RoundComplete {
                            round,
                            winner: rank,
                        }
                    };
                    DrawOutcome::Winner { rank, from, to }
                }
            },
        };

        Some(DrawResult {
            round,
            draw,
            outcome,
        })
    }

    /// Draws until every round has a winner.
    ///
    /// Fails only if a single round needs `max_draws_per_round` draws, which
    /// a validated configuration never gets near.
    pub fn run(mut self, rng: &mut impl Rng, max_draws_per_round: u64) -> Result<TrialOutcome> {
        let mut redraws = vec![RedrawCounts::default(); self.rounds as usize];
        let mut draws_this_round = 0u64;

        while let Some(result) = self.step(rng) {
            draws_this_round += 1;
            let counts = &mut redraws[(result.round - 1) as usize];

            match result.outcome {
                DrawOutcome::Winner { rank, from, to } => {
                    debug!(
                        round = result.round,
                        draw = %result.draw,
                        rank,
                        from,
                        to,
                        "lottery winner"
                    );
                    if counts.total() >= REDRAW_WARN_THRESHOLD {
                        warn!(
                            round = result.round,
                            redraws = counts.total(),
                            "round needed an unusual number of redraws"
                        );
                    }
                    draws_this_round = 0;
                }
                outcome => {
                    counts.record(outcome);
                    debug!(
                        round = result.round,
                        draw = %result.draw,
                        ?outcome,
                        "redraw required"
                    );
                    if draws_this_round >= max_draws_per_round {
                        return Err(LotteryError::RedrawLimitExceeded {
                            round: result.round,
                            draws: draws_this_round,
                        });
                    }
                }
            }
        }

        Ok(TrialOutcome {
            draft_order: self.draft_order.into_vec(),
            winners: self.winners,
            redraws,
        })
    }
}
