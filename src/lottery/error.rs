//! Error types for lottery configuration and resolution.

use std::path::PathBuf;
use thiserror::Error;

use super::odds::Percentage;
use super::Rank;

#[derive(Debug, Error)]
pub enum LotteryError {
    #[error("odds for rank {rank} must be greater than 0% and at most 100% (got {percentage})")]
    InvalidOdds { rank: Rank, percentage: f64 },

    #[error("rank {rank} is missing (ranks must cover 1..={expected})")]
    MissingRank { rank: Rank, expected: usize },

    #[error("rank {rank} appears more than once")]
    DuplicateRank { rank: Rank },

    #[error("odds add up to {total}, which exceeds 100%")]
    OddsExceedTotal { total: Percentage },

    #[error("invalid lottery machine: {message}")]
    InvalidMachine { message: String },

    #[error("invalid roster: {message}")]
    InvalidRoster { message: String },

    #[error("rounds must be between {min} and {max} (got {rounds})")]
    InvalidRounds { rounds: u32, min: u32, max: u32 },

    #[error("simulations must be at least {min} (got {simulations})")]
    InvalidSimulations { simulations: u64, min: u64 },

    #[error("draw limit per round must be at least {min} (got {draws})")]
    InvalidDrawLimit { draws: u64, min: u64 },

    #[error("invalid combination: {message}")]
    InvalidCombination { message: String },

    #[error("round {round} gave up after {draws} draws without a winner")]
    RedrawLimitExceeded { round: u32, draws: u64 },

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse lottery config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LotteryError>;
