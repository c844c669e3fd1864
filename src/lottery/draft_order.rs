//! Draft order and the bounded-jump move applied to each lottery winner.

use super::Rank;
use std::fmt;

/// Ranks in draft position order. Position 1 picks first.
///
/// During round `r` positions `1..r` are final; only the window starting at
/// position `r` may still change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftOrder {
    order: Vec<Rank>,
}

impl DraftOrder {
    pub fn new(order: Vec<Rank>) -> Self {
        Self { order }
    }

    pub fn as_slice(&self) -> &[Rank] {
        &self.order
    }

    pub fn into_vec(self) -> Vec<Rank> {
        self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 1-based position of `rank`.
    pub fn position_of(&self, rank: Rank) -> Option<usize> {
        self.order.iter().position(|&r| r == rank).map(|i| i + 1)
    }

    /// The positions round `round` may still rearrange.
    pub fn window(&self, round: u32) -> &[Rank] {
        &self.order[self.window_start(round)..]
    }

    fn window_mut(&mut self, round: u32) -> &mut [Rank] {
        let start = self.window_start(round);
        &mut self.order[start..]
    }

    fn window_start(&self, round: u32) -> usize {
        (round as usize).saturating_sub(1).min(self.order.len())
    }

    /// Position a winning `rank` lands on when `top` is the position being
    /// filled this round. Ranks within `max_jump` of the top go straight to
    /// it; everyone else moves up exactly `max_jump` places, never past `top`.
    pub fn target_position(rank: Rank, top: usize, max_jump: u32) -> usize {
        if rank <= max_jump {
            top
        } else {
            ((rank - max_jump) as usize).max(top)
        }
    }

    /// Moves `rank` to its bounded-jump target for round `round`, shifting
    /// the ranks it passes down one place each.
    ///
    /// Returns the 1-based `(from, to)` positions, or `None` if `rank` is not
    /// in the round's window (it is locked into an earlier position).
    pub fn move_winner(&mut self, round: u32, rank: Rank, max_jump: u32) -> Option<(usize, usize)> {
        let top = round as usize;
        if top == 0 {
            return None;
        }

        let window = self.window_mut(round);
        let found = window.iter().position(|&r| r == rank)?;

        // Non-winners only ever drift down, so the target is never below them.
        let offset = (Self::target_position(rank, top, max_jump) - top).min(found);
        window[offset..=found].rotate_right(1);

        Some((top + found, top + offset))
    }

    /// True if the order matches `initial` position for position.
    pub fn is_unchanged(&self, initial: &[Rank]) -> bool {
        self.order == initial
    }
}

impl fmt::Display for DraftOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rank) in self.order.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", rank)?;
        }
        Ok(())
    }
}
