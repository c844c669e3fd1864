//! Combination resolution table.
//!
//! Walks the combinations in lexicographic order and hands out consecutive
//! runs to ranks 1, 2, ..., R, each run `floor(odds% * C(N,K) / 100)` long.
//! Whatever is left at the end of the walk resolves to a redraw.

use super::combination::{Combination, CombinationSpace};
use super::error::{LotteryError, Result};
use super::odds::OddsTable;
use super::Rank;
use crate::core::constants::MAX_COMBINATION_TABLE_SIZE;
use std::collections::BTreeMap;
use tracing::debug;

/// Immutable mapping from every combination to a winning rank or a redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionTable {
    space: CombinationSpace,
    slots: Vec<Option<Rank>>,
    assigned: BTreeMap<Rank, u64>,
}

impl ResolutionTable {
    pub fn build(odds: &OddsTable, space: CombinationSpace) -> Result<Self> {
        let total = space.size();
        if total == 0 || total > MAX_COMBINATION_TABLE_SIZE {
            return Err(LotteryError::InvalidMachine {
                message: format!(
                    "{} balls drawn {} at a time give {} combinations (limit {})",
                    space.ball_count(),
                    space.balls_to_draw(),
                    total,
                    MAX_COMBINATION_TABLE_SIZE
                ),
            });
        }

        let mut slots = Vec::with_capacity(total as usize);
        let mut assigned = BTreeMap::new();

        for entry in odds.iter() {
            let count = entry.percentage.share_of(total);
            slots.extend(std::iter::repeat(Some(entry.rank)).take(count as usize));
            assigned.insert(entry.rank, count);
        }
        // A validated table never exceeds 100%, so this only ever pads.
        slots.resize(total as usize, None);

        let table = Self {
            space,
            slots,
            assigned,
        };
        debug!(
            combinations = total,
            redraw = table.redraw_count(),
            "built combination resolution table"
        );
        Ok(table)
    }

    /// Rank owning `combination`, or `None` for a redraw.
    pub fn lookup(&self, combination: &Combination) -> Option<Rank> {
        self.space
            .index_of(combination)
            .and_then(|index| self.slots.get(index).copied().flatten())
    }

    pub fn space(&self) -> CombinationSpace {
        self.space
    }

    /// Number of entries, always `C(N, K)`.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Combinations owned by `rank`.
    pub fn assigned_count(&self, rank: Rank) -> u64 {
        self.assigned.get(&rank).copied().unwrap_or(0)
    }

    /// Combinations that resolve to a redraw.
    pub fn redraw_count(&self) -> u64 {
        self.slots.iter().filter(|slot| slot.is_none()).count() as u64
    }

    /// Ranks that own at least one combination and so can win a round.
    pub fn assignable_ranks(&self) -> usize {
        self.assigned.values().filter(|&&count| count > 0).count()
    }

    /// Every combination with its resolution, in lexicographic order.
    pub fn entries(&self) -> impl Iterator<Item = (Combination, Option<Rank>)> + '_ {
        self.space.iter().zip(self.slots.iter().copied())
    }
}
