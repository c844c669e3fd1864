//! Statistics accumulated across lottery trials.

use crate::lottery::{Rank, TrialOutcome};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts gathered over every trial of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LotteryStats {
    /// Trials folded in so far
    pub simulations: u64,
    pub rounds: u32,

    /// round -> winning rank -> wins
    pub round_winner_stats: BTreeMap<u32, BTreeMap<Rank, u64>>,

    /// round -> redraws
    pub redraws: BTreeMap<u32, u64>,

    /// final position (1-based) -> rank -> trials
    pub draft_order_stats: BTreeMap<usize, BTreeMap<Rank, u64>>,

    /// Trials whose final order matched the pre-lottery order
    pub original_draft_order_retained: u64,
}

impl LotteryStats {
    pub fn new(rounds: u32) -> Self {
        Self {
            rounds,
            ..Default::default()
        }
    }

    pub fn record_round_winner(&mut self, round: u32, rank: Rank) {
        *self
            .round_winner_stats
            .entry(round)
            .or_default()
            .entry(rank)
            .or_insert(0) += 1;
    }

    pub fn record_redraw(&mut self, round: u32) {
        self.record_redraws(round, 1);
    }

    pub fn record_redraws(&mut self, round: u32, count: u64) {
        *self.redraws.entry(round).or_insert(0) += count;
    }

    pub fn record_final_position(&mut self, position: usize, rank: Rank) {
        *self
            .draft_order_stats
            .entry(position)
            .or_default()
            .entry(rank)
            .or_insert(0) += 1;
    }

    pub fn record_order_preserved(&mut self, preserved: bool) {
        if preserved {
            self.original_draft_order_retained += 1;
        }
    }

    /// Folds one finished trial into the totals.
    pub fn record_trial(&mut self, outcome: &TrialOutcome, initial_order: &[Rank]) {
        self.simulations += 1;

        for (round, &rank) in (1..).zip(&outcome.winners) {
            self.record_round_winner(round, rank);
        }
        for (round, counts) in (1..).zip(&outcome.redraws) {
            self.record_redraws(round, counts.total());
        }
        for (position, &rank) in (1..).zip(&outcome.draft_order) {
            self.record_final_position(position, rank);
        }
        self.record_order_preserved(outcome.order_preserved(initial_order));
    }

    pub fn round_wins(&self, round: u32, rank: Rank) -> u64 {
        self.round_winner_stats
            .get(&round)
            .and_then(|wins| wins.get(&rank))
            .copied()
            .unwrap_or(0)
    }

    /// Share of trials `rank` won `round`, as a percentage.
    pub fn round_win_percentage(&self, round: u32, rank: Rank) -> f64 {
        self.percent_of_simulations(self.round_wins(round, rank))
    }

    pub fn redraws_for(&self, round: u32) -> u64 {
        self.redraws.get(&round).copied().unwrap_or(0)
    }

    pub fn final_position_count(&self, position: usize, rank: Rank) -> u64 {
        self.draft_order_stats
            .get(&position)
            .and_then(|ranks| ranks.get(&rank))
            .copied()
            .unwrap_or(0)
    }

    /// Share of trials that ended with `rank` at `position`, as a percentage.
    pub fn final_position_percentage(&self, position: usize, rank: Rank) -> f64 {
        self.percent_of_simulations(self.final_position_count(position, rank))
    }

    /// Share of trials that left the draft order untouched, as a percentage.
    pub fn order_preserved_rate(&self) -> f64 {
        self.percent_of_simulations(self.original_draft_order_retained)
    }

    fn percent_of_simulations(&self, count: u64) -> f64 {
        if self.simulations == 0 {
            return 0.0;
        }
        count as f64 / self.simulations as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lottery::RedrawCounts;

    #[test]
    fn test_direct_accumulation() {
        let mut stats = LotteryStats::new(2);
        stats.simulations = 4;
        stats.record_round_winner(1, 3);
        stats.record_round_winner(1, 3);
        stats.record_round_winner(2, 7);
        stats.record_redraw(1);
        stats.record_redraw(1);
        stats.record_final_position(1, 3);
        stats.record_order_preserved(true);
        stats.record_order_preserved(false);

        assert_eq!(stats.round_wins(1, 3), 2);
        assert_eq!(stats.round_wins(2, 3), 0);
        assert_eq!(stats.round_wins(9, 3), 0);
        assert!((stats.round_win_percentage(1, 3) - 50.0).abs() < 1e-9);
        assert_eq!(stats.redraws_for(1), 2);
        assert_eq!(stats.redraws_for(2), 0);
        assert_eq!(stats.final_position_count(1, 3), 1);
        assert!((stats.final_position_percentage(1, 3) - 25.0).abs() < 1e-9);
        assert!((stats.order_preserved_rate() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_record_trial() {
        let outcome = TrialOutcome {
            draft_order: vec![3, 1, 2, 4],
            winners: vec![3],
            redraws: vec![RedrawCounts {
                no_winner: 2,
                duplicate_winner: 0,
                locked_in: 1,
            }],
        };
        let mut stats = LotteryStats::new(1);
        stats.record_trial(&outcome, &[1, 2, 3, 4]);
        stats.record_trial(&outcome, &[1, 2, 3, 4]);

        assert_eq!(stats.simulations, 2);
        assert_eq!(stats.round_wins(1, 3), 2);
        assert_eq!(stats.redraws_for(1), 6);
        assert_eq!(stats.final_position_count(1, 3), 2);
        assert_eq!(stats.final_position_count(4, 4), 2);
        assert_eq!(stats.original_draft_order_retained, 0);
        assert!((stats.final_position_percentage(2, 1) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_preserved_order_is_counted() {
        let outcome = TrialOutcome {
            draft_order: vec![1, 2, 3],
            winners: vec![1],
            redraws: vec![RedrawCounts::default()],
        };
        let mut stats = LotteryStats::new(1);
        stats.record_trial(&outcome, &[1, 2, 3]);
        assert_eq!(stats.original_draft_order_retained, 1);
        assert!((stats.order_preserved_rate() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats_report_zero() {
        let stats = LotteryStats::new(2);
        assert_eq!(stats.round_win_percentage(1, 1), 0.0);
        assert_eq!(stats.order_preserved_rate(), 0.0);
    }
}
