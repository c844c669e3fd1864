//! Weighted draft lottery: balls, odds, the combination table and the
//! per-round resolution rules.

pub mod ball;
pub mod combination;
pub mod config;
pub mod draft_order;
pub mod error;
pub mod machine;
pub mod odds;
pub mod round;
pub mod table;
pub mod teams;

/// A team's pre-lottery position, 1 being the worst record.
pub type Rank = u32;

pub use ball::{ball_pool, Ball, Draw};
pub use combination::{binomial, Combination, CombinationSpace, Combinations};
pub use config::LotteryConfig;
pub use draft_order::DraftOrder;
pub use error::{LotteryError, Result};
pub use machine::Machine;
pub use odds::{OddsEntry, OddsTable, Percentage};
pub use round::{DrawOutcome, DrawResult, RedrawCounts, ResolverState, RoundResolver, TrialOutcome};
pub use table::ResolutionTable;
pub use teams::{LotteryTeam, LotteryTeams};
