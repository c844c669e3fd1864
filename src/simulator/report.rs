//! Simulation report generation.

use super::stats::LotteryStats;
use crate::lottery::{LotteryConfig, LotteryTeams, OddsTable, Rank};
use serde::Serialize;

/// Aggregated results of a run, with the roster and odds needed to label them.
#[derive(Debug, Clone, Serialize)]
pub struct LotteryReport {
    pub stats: LotteryStats,
    pub teams: LotteryTeams,
    pub odds: OddsTable,

    /// Final draft order of the last trial
    pub last_draft_order: Vec<Rank>,
}

impl LotteryReport {
    pub fn new(stats: LotteryStats, lottery: &LotteryConfig, last_draft_order: Vec<Rank>) -> Self {
        Self {
            stats,
            teams: lottery.teams.clone(),
            odds: lottery.odds.clone(),
            last_draft_order,
        }
    }

    fn simulation_label(&self) -> String {
        let suffix = if self.stats.simulations == 1 {
            "simulation"
        } else {
            "simulations"
        };
        format!("{} {}", self.stats.simulations, suffix)
    }

    /// Winners of each round next to the published odds.
    pub fn round_winners_text(&self) -> String {
        let mut report = String::new();

        for round in 1..=self.stats.rounds {
            report.push_str(&format!(
                "[ Round {} Lottery Winners ] ({})\n\n",
                round,
                self.simulation_label()
            ));
            report.push_str(&format!(
                "{:^6} {:^6} {:^10} {:^9} {:^9}\n",
                "Rank", "Team", "Wins", "Pct.", "Odds"
            ));
            report.push_str(&format!(
                "{:-<6} {:-<6} {:-<10} {:-<9} {:-<9}\n",
                "", "", "", "", ""
            ));

            for team in self.teams.iter() {
                let wins = self.stats.round_wins(round, team.ranking);
                report.push_str(&format!(
                    "{:^6} {:^6} {:^10} {:^9.3} {:^9}\n",
                    team.ranking,
                    team.team,
                    wins,
                    self.stats.round_win_percentage(round, team.ranking),
                    self.odds.percentage_for(team.ranking).to_string()
                ));
            }

            report.push_str(&format!("{} redraws\n\n", self.stats.redraws_for(round)));
        }

        report
    }

    /// How often each team ended up in each draft position.
    pub fn draft_order_text(&self) -> String {
        let mut report = String::new();
        let positions = self.teams.len();

        report.push_str(&format!(
            "[ Draft Order Statistics ] ({})\n\n",
            self.simulation_label()
        ));
        report.push_str(&format!(
            "Original draft order retained: {:.3}%\n\n",
            self.stats.order_preserved_rate()
        ));

        let mut header = format!("{:^4}", "Team");
        for position in 1..=positions {
            header.push_str(&format!(" {:^6}", position));
        }
        report.push_str(&header);
        report.push('\n');
        report.push_str(&"-".repeat(header.chars().count()));
        report.push('\n');

        for team in self.teams.iter() {
            report.push_str(&format!("{:^4}", team.team));
            for position in 1..=positions {
                if self.stats.final_position_count(position, team.ranking) == 0 {
                    report.push_str(&format!(" {:^6}", "-"));
                } else {
                    report.push_str(&format!(
                        " {:^6.2}",
                        self.stats.final_position_percentage(position, team.ranking)
                    ));
                }
            }
            report.push('\n');
        }

        report
    }

    /// One trial's final order with each team's movement.
    pub fn final_order_text(&self) -> String {
        let mut report = String::new();

        report.push_str("[ Draft Order ]\n\n");
        report.push_str(&format!("{:^3} {:^4} {:^3}\n", "#", "Team", "+/-"));
        report.push_str(&format!("{:^3} {:^4} {:^3}\n", "---", "----", "---"));

        for (position, &rank) in (1i64..).zip(&self.last_draft_order) {
            let change = i64::from(rank) - position;
            let change = if change == 0 {
                "-".to_string()
            } else {
                format!("{:+}", change)
            };
            report.push_str(&format!(
                "{:^3} {:^4} {:^3}\n",
                position,
                self.teams.label_for(rank),
                change
            ));
        }

        report
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = self.round_winners_text();
        report.push_str(&self.draft_order_text());
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> LotteryReport {
        let mut stats = LotteryStats::new(1);
        stats.simulations = 2;
        stats.record_round_winner(1, 1);
        stats.record_round_winner(1, 14);
        stats.record_redraw(1);
        for (position, rank) in (1..).zip([1, 2, 3, 14, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 15, 16]) {
            stats.record_final_position(position, rank);
        }
        for position in 1..=16 {
            stats.record_final_position(position, position as Rank);
        }
        stats.record_order_preserved(true);

        LotteryReport::new(
            stats,
            &LotteryConfig::default(),
            vec![1, 2, 3, 14, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 15, 16],
        )
    }

    #[test]
    fn test_round_winners_text() {
        let text = sample_report().round_winners_text();
        assert!(text.contains("[ Round 1 Lottery Winners ] (2 simulations)"));
        assert!(text.contains("ANA"));
        assert!(text.contains("18.5%"));
        assert!(text.contains("1 redraws"));
    }

    #[test]
    fn test_draft_order_text() {
        let text = sample_report().draft_order_text();
        assert!(text.contains("Original draft order retained: 50.000%"));
        assert!(text.contains("100.00"));
        assert!(text.contains("50.00"));
        assert_eq!(text.lines().filter(|l| l.starts_with("PIT")).count(), 1);
    }

    #[test]
    fn test_final_order_text_shows_movement() {
        let text = sample_report().final_order_text();
        let pit = text.lines().find(|l| l.contains("PIT")).unwrap();
        assert!(pit.contains("+10"));
        let sjs = text.lines().find(|l| l.contains("SJS")).unwrap();
        assert!(sjs.contains("-1"));
    }

    #[test]
    fn test_json_contains_stats() {
        let json = sample_report().to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stats"]["simulations"], 2);
        assert_eq!(value["stats"]["round_winner_stats"]["1"]["14"], 1);
        assert_eq!(value["teams"][0]["team"], "ANA");
        assert_eq!(value["odds"][0]["percentage"], 18.5);
    }
}
