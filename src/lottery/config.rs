//! Lottery configuration: machine shape, odds and roster.

use super::ball::{ball_pool, Ball};
use super::combination::CombinationSpace;
use super::error::{LotteryError, Result};
use super::odds::OddsTable;
use super::table::ResolutionTable;
use super::teams::LotteryTeams;
use crate::core::constants::{
    BALLS_TO_DRAW, BALL_COUNT, MAX_BALL_COUNT, MAX_COMBINATION_TABLE_SIZE, MAX_RANKING_JUMP,
    MAX_ROUNDS, MIN_ROUNDS,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Everything that describes one season's lottery.
///
/// The default is the 2023 lottery: 14 balls, 4 drawn, 16 teams, winners
/// may jump at most 10 places, up to 3 lottery rounds. A TOML description
/// that leaves out `max_rounds` gets 3 or its number of ranks, whichever is
/// smaller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LotteryFile")]
pub struct LotteryConfig {
    /// Balls in the machine (N)
    pub ball_count: u8,

    /// Balls drawn per cycle (K)
    pub balls_to_draw: u8,

    /// Most places a lottery winner may move up
    pub max_ranking_jump: u32,

    /// Most lottery rounds a simulation may ask for
    pub max_rounds: u32,

    pub odds: OddsTable,

    pub teams: LotteryTeams,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            ball_count: BALL_COUNT,
            balls_to_draw: BALLS_TO_DRAW,
            max_ranking_jump: MAX_RANKING_JUMP,
            max_rounds: MAX_ROUNDS,
            odds: OddsTable::default(),
            teams: LotteryTeams::default(),
        }
    }
}

/// On-disk form of [`LotteryConfig`]; every field is optional.
#[derive(Deserialize)]
#[serde(default)]
struct LotteryFile {
    ball_count: u8,
    balls_to_draw: u8,
    max_ranking_jump: u32,
    max_rounds: Option<u32>,
    odds: OddsTable,
    teams: LotteryTeams,
}

impl Default for LotteryFile {
    fn default() -> Self {
        let defaults = LotteryConfig::default();
        Self {
            ball_count: defaults.ball_count,
            balls_to_draw: defaults.balls_to_draw,
            max_ranking_jump: defaults.max_ranking_jump,
            max_rounds: None,
            odds: defaults.odds,
            teams: defaults.teams,
        }
    }
}

impl From<LotteryFile> for LotteryConfig {
    fn from(file: LotteryFile) -> Self {
        let max_rounds = file
            .max_rounds
            .unwrap_or_else(|| MAX_ROUNDS.min(file.odds.len() as u32));
        Self {
            ball_count: file.ball_count,
            balls_to_draw: file.balls_to_draw,
            max_ranking_jump: file.max_ranking_jump,
            max_rounds,
            odds: file.odds,
            teams: file.teams,
        }
    }
}

impl LotteryConfig {
    /// Parses and validates a TOML lottery description. Missing fields take
    /// their 2023 defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| LotteryError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ball_count == 0 || self.ball_count > MAX_BALL_COUNT {
            return Err(LotteryError::InvalidMachine {
                message: format!(
                    "ball_count must be between 1 and {} (got {})",
                    MAX_BALL_COUNT, self.ball_count
                ),
            });
        }
        if self.balls_to_draw == 0 || self.balls_to_draw > self.ball_count {
            return Err(LotteryError::InvalidMachine {
                message: format!(
                    "balls_to_draw must be between 1 and {} (got {})",
                    self.ball_count, self.balls_to_draw
                ),
            });
        }
        let combinations = self.space().size();
        if combinations > MAX_COMBINATION_TABLE_SIZE {
            return Err(LotteryError::InvalidMachine {
                message: format!(
                    "{} combinations exceeds the limit of {}",
                    combinations, MAX_COMBINATION_TABLE_SIZE
                ),
            });
        }

        if self.odds.len() != self.teams.len() {
            return Err(LotteryError::InvalidRoster {
                message: format!(
                    "{} teams but odds for {} ranks",
                    self.teams.len(),
                    self.odds.len()
                ),
            });
        }

        let ranks = self.odds.len() as u32;
        if self.max_rounds < MIN_ROUNDS || self.max_rounds > ranks {
            return Err(LotteryError::InvalidRounds {
                rounds: self.max_rounds,
                min: MIN_ROUNDS,
                max: ranks,
            });
        }

        Ok(())
    }

    pub fn space(&self) -> CombinationSpace {
        CombinationSpace::new(self.ball_count, self.balls_to_draw)
    }

    /// The balls loaded before every draw.
    pub fn balls(&self) -> Vec<Ball> {
        ball_pool(self.ball_count)
    }

    /// Builds the resolution table shared by every trial.
    pub fn build_table(&self) -> Result<ResolutionTable> {
        ResolutionTable::build(&self.odds, self.space())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = LotteryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.space().size(), 1001);
        assert_eq!(config.balls().len(), 14);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = LotteryConfig::from_toml_str("").unwrap();
        assert_eq!(config, LotteryConfig::default());
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
            ball_count = 6
            balls_to_draw = 2
            max_ranking_jump = 1
            max_rounds = 2

            [[odds]]
            rank = 1
            percentage = 60.0

            [[odds]]
            rank = 2
            percentage = 40.0

            [[teams]]
            ranking = 1
            team = "AAA"

            [[teams]]
            ranking = 2
            team = "BBB"
        "#;
        let config = LotteryConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.space().size(), 15);
        assert_eq!(config.teams.team_for(2), Some("BBB"));
        let table = config.build_table().unwrap();
        assert_eq!(table.assigned_count(1), 9);
        assert_eq!(table.assigned_count(2), 6);
    }

    #[test]
    fn test_toml_without_max_rounds_fits_small_roster() {
        let toml = r#"
            ball_count = 6
            balls_to_draw = 2

            [[odds]]
            rank = 1
            percentage = 60.0

            [[odds]]
            rank = 2
            percentage = 40.0

            [[teams]]
            ranking = 1
            team = "AAA"

            [[teams]]
            ranking = 2
            team = "BBB"
        "#;
        let config = LotteryConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.max_rounds, 2);
    }

    #[test]
    fn test_explicit_max_rounds_is_still_checked() {
        let toml = r#"
            max_rounds = 3

            [[odds]]
            rank = 1
            percentage = 60.0

            [[teams]]
            ranking = 1
            team = "AAA"
        "#;
        assert!(matches!(
            LotteryConfig::from_toml_str(toml),
            Err(LotteryError::InvalidRounds { rounds: 3, max: 1, .. })
        ));
    }

    #[test]
    fn test_toml_rejects_invalid_odds() {
        let toml = r#"
            [[odds]]
            rank = 1
            percentage = 0.0
        "#;
        assert!(matches!(
            LotteryConfig::from_toml_str(toml),
            Err(LotteryError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_validate_machine_shape() {
        let config = LotteryConfig {
            balls_to_draw: 15,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LotteryError::InvalidMachine { .. })));

        let config = LotteryConfig {
            ball_count: 64,
            balls_to_draw: 32,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LotteryError::InvalidMachine { .. })));
    }

    #[test]
    fn test_validate_roster_matches_odds() {
        let config = LotteryConfig {
            teams: LotteryTeams::new(vec![super::super::teams::LotteryTeam {
                ranking: 1,
                team: "ANA".to_string(),
            }])
            .unwrap(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LotteryError::InvalidRoster { .. })));
    }

    #[test]
    fn test_validate_max_rounds() {
        let config = LotteryConfig {
            max_rounds: 17,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LotteryError::InvalidRounds { .. })));
    }
}
