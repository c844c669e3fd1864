//! Published lottery odds.
//!
//! Reference: 2023 NHL draft lottery odds (first round), sportsnet.ca.

use super::error::{LotteryError, Result};
use super::Rank;
use crate::core::constants::{FULL_PERCENTAGE, PERCENTAGE_SCALE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A percentage with two decimal places of precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percentage(u32);

impl Percentage {
    pub const ZERO: Percentage = Percentage(0);
    pub const FULL: Percentage = Percentage(FULL_PERCENTAGE);

    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    /// Rounds `percent` to the nearest hundredth. Negative, NaN and
    /// infinite values are rejected.
    pub fn from_percent(percent: f64) -> Option<Self> {
        if !percent.is_finite() || percent < 0.0 {
            return None;
        }
        let hundredths = (percent * f64::from(PERCENTAGE_SCALE)).round();
        (hundredths <= f64::from(u32::MAX)).then_some(Self(hundredths as u32))
    }

    pub fn hundredths(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / f64::from(PERCENTAGE_SCALE)
    }

    /// `floor(self / 100 * total)`, computed without floating point.
    pub fn share_of(self, total: u64) -> u64 {
        (u128::from(total) * u128::from(self.0) / u128::from(FULL_PERCENTAGE)) as u64
    }
}

impl TryFrom<f64> for Percentage {
    type Error = String;

    fn try_from(value: f64) -> std::result::Result<Self, Self::Error> {
        Self::from_percent(value).ok_or_else(|| format!("{} is not a valid percentage", value))
    }
}

impl From<Percentage> for f64 {
    fn from(value: Percentage) -> Self {
        value.as_f64()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_f64())
    }
}

/// Odds of a single pre-lottery rank winning a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsEntry {
    pub rank: Rank,
    pub percentage: Percentage,
}

/// First-round odds by rank, in hundredths of a percent. Truncating each
/// rank's share of the 1001 combinations leaves exactly one for a redraw.
pub const FIRST_ROUND_ODDS: [(Rank, u32); 16] = [
    (1, 1850),
    (2, 1350),
    (3, 1150),
    (4, 950),
    (5, 850),
    (6, 750),
    (7, 650),
    (8, 600),
    (9, 500),
    (10, 350),
    (11, 300),
    (12, 250),
    (13, 200),
    (14, 150),
    (15, 50),
    (16, 50),
];

/// Validated odds covering every rank in `1..=R` exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<OddsEntry>", into = "Vec<OddsEntry>")]
pub struct OddsTable {
    entries: Vec<OddsEntry>,
}

impl OddsTable {
    /// Validates and sorts `entries` by rank.
    pub fn new(mut entries: Vec<OddsEntry>) -> Result<Self> {
        let expected = entries.len();
        let mut seen = BTreeSet::new();

        for entry in &entries {
            if entry.percentage == Percentage::ZERO || entry.percentage > Percentage::FULL {
                return Err(LotteryError::InvalidOdds {
                    rank: entry.rank,
                    percentage: entry.percentage.as_f64(),
                });
            }
            if !seen.insert(entry.rank) {
                return Err(LotteryError::DuplicateRank { rank: entry.rank });
            }
        }

        if expected == 0 {
            return Err(LotteryError::MissingRank { rank: 1, expected });
        }
        if let Some(rank) = (1..=expected as Rank).find(|r| !seen.contains(r)) {
            return Err(LotteryError::MissingRank { rank, expected });
        }

        entries.sort_by_key(|e| e.rank);
        let table = Self { entries };

        let total = table.total();
        if total > Percentage::FULL {
            return Err(LotteryError::OddsExceedTotal { total });
        }

        Ok(table)
    }

    /// The 2023 first-round odds for the sixteen non-playoff teams.
    pub fn first_round_2023() -> Self {
        Self {
            entries: FIRST_ROUND_ODDS
                .iter()
                .map(|&(rank, hundredths)| OddsEntry {
                    rank,
                    percentage: Percentage::from_hundredths(hundredths),
                })
                .collect(),
        }
    }

    /// Odds for `rank`, or zero for a rank the table does not know about.
    pub fn percentage_for(&self, rank: Rank) -> Percentage {
        self.entries
            .iter()
            .find(|e| e.rank == rank)
            .map(|e| e.percentage)
            .unwrap_or(Percentage::ZERO)
    }

    /// Sum of all odds, saturating. At most 100% for a validated table.
    pub fn total(&self) -> Percentage {
        let hundredths: u64 = self
            .entries
            .iter()
            .map(|e| u64::from(e.percentage.hundredths()))
            .sum();
        Percentage::from_hundredths(u32::try_from(hundredths).unwrap_or(u32::MAX))
    }

    /// Odds not assigned to any rank (the redraw share).
    pub fn redraw_percentage(&self) -> Percentage {
        Percentage::from_hundredths(FULL_PERCENTAGE.saturating_sub(self.total().hundredths()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &OddsEntry> {
        self.entries.iter()
    }

    pub fn ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        self.entries.iter().map(|e| e.rank)
    }

    /// Number of ranks, `R`.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for OddsTable {
    fn default() -> Self {
        Self::first_round_2023()
    }
}

impl TryFrom<Vec<OddsEntry>> for OddsTable {
    type Error = LotteryError;

    fn try_from(entries: Vec<OddsEntry>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<OddsTable> for Vec<OddsEntry> {
    fn from(table: OddsTable) -> Self {
        table.entries
    }
}
