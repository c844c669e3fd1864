//! Lottery-eligible teams, keyed by pre-lottery rank.
//!
//! Teams are only used to label reports; the draft order itself tracks ranks.

use super::error::{LotteryError, Result};
use super::Rank;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 2023 final standings, worst record first.
pub const STANDINGS_2023: [&str; 16] = [
    "ANA", "CBJ", "CHI", "SJS", "MTL", "ARI", "PHI", "WSH", "DET", "STL", "VAN", "OTT", "BUF",
    "PIT", "NSH", "CGY",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryTeam {
    pub ranking: Rank,
    pub team: String,
}

/// Teams covering every rank in `1..=R` exactly once, sorted by rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LotteryTeam>", into = "Vec<LotteryTeam>")]
pub struct LotteryTeams {
    teams: Vec<LotteryTeam>,
}

impl LotteryTeams {
    pub fn new(mut teams: Vec<LotteryTeam>) -> Result<Self> {
        let expected = teams.len();
        if expected == 0 {
            return Err(LotteryError::InvalidRoster {
                message: "no teams".to_string(),
            });
        }

        let mut seen = BTreeSet::new();
        for team in &teams {
            if team.team.trim().is_empty() {
                return Err(LotteryError::InvalidRoster {
                    message: format!("rank {} has no team name", team.ranking),
                });
            }
            if !seen.insert(team.ranking) {
                return Err(LotteryError::DuplicateRank { rank: team.ranking });
            }
        }
        if let Some(rank) = (1..=expected as Rank).find(|r| !seen.contains(r)) {
            return Err(LotteryError::MissingRank { rank, expected });
        }

        teams.sort_by_key(|t| t.ranking);
        Ok(Self { teams })
    }

    pub fn standings_2023() -> Self {
        Self {
            teams: STANDINGS_2023
                .iter()
                .zip(1..)
                .map(|(team, ranking)| LotteryTeam {
                    ranking,
                    team: team.to_string(),
                })
                .collect(),
        }
    }

    pub fn team_for(&self, ranking: Rank) -> Option<&str> {
        self.teams
            .iter()
            .find(|t| t.ranking == ranking)
            .map(|t| t.team.as_str())
    }

    /// Team name for display, falling back to the rank number.
    pub fn label_for(&self, ranking: Rank) -> String {
        self.team_for(ranking)
            .map(str::to_string)
            .unwrap_or_else(|| ranking.to_string())
    }

    /// The pre-lottery draft order: ranks `1..=R` in positional order.
    pub fn initial_draft_order(&self) -> Vec<Rank> {
        self.teams.iter().map(|t| t.ranking).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LotteryTeam> {
        self.teams.iter()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

impl Default for LotteryTeams {
    fn default() -> Self {
        Self::standings_2023()
    }
}

impl TryFrom<Vec<LotteryTeam>> for LotteryTeams {
    type Error = LotteryError;

    fn try_from(teams: Vec<LotteryTeam>) -> Result<Self> {
        Self::new(teams)
    }
}

impl From<LotteryTeams> for Vec<LotteryTeam> {
    fn from(teams: LotteryTeams) -> Self {
        teams.teams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(ranking: Rank, name: &str) -> LotteryTeam {
        LotteryTeam {
            ranking,
            team: name.to_string(),
        }
    }

    #[test]
    fn test_standings_2023() {
        let teams = LotteryTeams::standings_2023();
        assert_eq!(teams.len(), 16);
        assert_eq!(teams.team_for(1), Some("ANA"));
        assert_eq!(teams.team_for(16), Some("CGY"));
        assert_eq!(teams.team_for(17), None);
        assert_eq!(teams.label_for(17), "17");
        assert_eq!(teams.initial_draft_order(), (1..=16).collect::<Vec<_>>());
    }

    #[test]
    fn test_new_sorts_by_ranking() {
        let teams = LotteryTeams::new(vec![team(2, "CBJ"), team(1, "ANA")]).unwrap();
        assert_eq!(teams.initial_draft_order(), vec![1, 2]);
    }

    #[test]
    fn test_new_rejects_bad_rosters() {
        assert!(LotteryTeams::new(Vec::new()).is_err());
        assert!(matches!(
            LotteryTeams::new(vec![team(1, "ANA"), team(1, "CBJ")]),
            Err(LotteryError::DuplicateRank { rank: 1 })
        ));
        assert!(matches!(
            LotteryTeams::new(vec![team(1, "ANA"), team(3, "CBJ")]),
            Err(LotteryError::MissingRank { rank: 2, .. })
        ));
        assert!(matches!(
            LotteryTeams::new(vec![team(1, "  ")]),
            Err(LotteryError::InvalidRoster { .. })
        ));
    }
}
