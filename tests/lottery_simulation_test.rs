//! Integration test: full simulation runs
//!
//! Runs the 2023 lottery end to end through `run_simulation` and checks the
//! aggregated statistics against the published odds.

use draft_lottery::lottery::{LotteryTeam, LotteryTeams, OddsEntry, OddsTable, Percentage};
use draft_lottery::{run_simulation, LotteryConfig, LotteryError, SimConfig};

fn seeded(simulations: u64, rounds: u32, seed: u64) -> SimConfig {
    SimConfig {
        simulations,
        rounds,
        seed: Some(seed),
        verbosity: 0,
        ..Default::default()
    }
}

// =============================================================================
// Round winner frequencies
// =============================================================================

#[test]
fn test_first_round_frequency_tracks_odds() {
    let lottery = LotteryConfig::default();
    let report = run_simulation(&lottery, &seeded(1000, 2, 2023)).unwrap();

    // Only {11,12,13,14} redraws in round 1, so rank 1 wins 185 of 1000 draws.
    let pct = report.stats.round_win_percentage(1, 1);
    assert!(
        (14.0..=23.0).contains(&pct),
        "rank 1 won round 1 in {:.2}% of trials",
        pct
    );
}

#[test]
fn test_every_round_has_one_winner_per_trial() {
    let report = run_simulation(&LotteryConfig::default(), &seeded(500, 3, 7)).unwrap();

    for round in 1..=3 {
        let wins: u64 = report.stats.round_winner_stats[&round].values().sum();
        assert_eq!(wins, 500, "round {} winners", round);
    }
}

#[test]
fn test_final_positions_form_a_permutation_matrix() {
    let report = run_simulation(&LotteryConfig::default(), &seeded(400, 2, 99)).unwrap();
    let stats = &report.stats;

    for position in 1..=16 {
        let total: u64 = stats.draft_order_stats[&position].values().sum();
        assert_eq!(total, 400, "position {}", position);
    }
    for rank in 1..=16 {
        let total: u64 = (1..=16)
            .map(|position| stats.final_position_count(position, rank))
            .sum();
        assert_eq!(total, 400, "rank {}", rank);
    }
}

#[test]
fn test_no_team_drops_two_places_in_one_round() {
    let report = run_simulation(&LotteryConfig::default(), &seeded(300, 1, 5)).unwrap();

    // A single winner jumps the teams it passes, each of which drops one place.
    for rank in 1..16 {
        let below = report.stats.final_position_count(rank as usize + 2, rank);
        assert_eq!(below, 0, "rank {} fell two places", rank);
    }
}

#[test]
fn test_order_retained_only_when_top_seeds_win() {
    let report = run_simulation(&LotteryConfig::default(), &seeded(1000, 2, 11)).unwrap();
    let stats = &report.stats;

    // Retention needs rank 1 to win round 1 and rank 2 to win round 2.
    assert!(stats.original_draft_order_retained <= stats.round_wins(1, 1));
    assert!(stats.order_preserved_rate() < 20.0);
}

// =============================================================================
// Reproducibility
// =============================================================================

#[test]
fn test_same_seed_same_report() {
    let lottery = LotteryConfig::default();
    let a = run_simulation(&lottery, &seeded(200, 2, 31337)).unwrap();
    let b = run_simulation(&lottery, &seeded(200, 2, 31337)).unwrap();

    assert_eq!(a.stats, b.stats);
    assert_eq!(a.last_draft_order, b.last_draft_order);
    assert_eq!(a.to_json(), b.to_json());
}

#[test]
fn test_different_seeds_diverge() {
    let lottery = LotteryConfig::default();
    let a = run_simulation(&lottery, &seeded(200, 2, 1)).unwrap();
    let b = run_simulation(&lottery, &seeded(200, 2, 2)).unwrap();

    assert_ne!(a.stats, b.stats);
}

// =============================================================================
// Configuration errors surface before any trial runs
// =============================================================================

#[test]
fn test_rejects_zero_simulations() {
    let result = run_simulation(&LotteryConfig::default(), &seeded(0, 2, 1));
    assert!(matches!(result, Err(LotteryError::InvalidSimulations { .. })));
}

#[test]
fn test_rejects_zero_draw_limit_before_running() {
    let config = SimConfig {
        max_draws_per_round: 0,
        ..seeded(1000, 3, 1)
    };
    let result = run_simulation(&LotteryConfig::default(), &config);
    assert!(matches!(
        result,
        Err(LotteryError::InvalidDrawLimit { draws: 0, .. })
    ));
}

#[test]
fn test_rejects_rounds_past_lottery_limit() {
    let result = run_simulation(&LotteryConfig::default(), &seeded(10, 4, 1));
    assert!(matches!(
        result,
        Err(LotteryError::InvalidRounds { rounds: 4, max: 3, .. })
    ));
}

#[test]
fn test_rejects_rounds_the_table_cannot_finish() {
    // 10 balls, 1 drawn: ranks 4..=6 truncate to zero combinations, leaving
    // three ranks that can win.
    let odds = OddsTable::new(
        (1..=6)
            .map(|rank| OddsEntry {
                rank,
                percentage: Percentage::from_hundredths(if rank <= 3 { 3000 } else { 100 }),
            })
            .collect(),
    )
    .unwrap();
    let teams = LotteryTeams::new(
        (1..=6)
            .map(|ranking| LotteryTeam {
                ranking,
                team: format!("T{}", ranking),
            })
            .collect(),
    )
    .unwrap();
    let lottery = LotteryConfig {
        ball_count: 10,
        balls_to_draw: 1,
        max_ranking_jump: 2,
        max_rounds: 6,
        odds,
        teams,
    };

    assert!(run_simulation(&lottery, &seeded(10, 2, 1)).is_ok());
    assert!(matches!(
        run_simulation(&lottery, &seeded(10, 3, 1)),
        Err(LotteryError::InvalidRounds { max: 2, .. })
    ));
}

// =============================================================================
// Report rendering
// =============================================================================

#[test]
fn test_report_text_names_every_team() {
    let report = run_simulation(&LotteryConfig::default(), &seeded(50, 2, 8)).unwrap();
    let text = report.to_text();

    assert!(text.contains("[ Round 1 Lottery Winners ] (50 simulations)"));
    assert!(text.contains("[ Round 2 Lottery Winners ] (50 simulations)"));
    assert!(text.contains("Original draft order retained:"));
    for team in ["ANA", "CBJ", "CHI", "SJS", "NSH", "CGY"] {
        assert!(text.contains(team), "missing {}", team);
    }
}

#[test]
fn test_report_json_round_trips_counts() {
    let report = run_simulation(&LotteryConfig::default(), &seeded(25, 2, 3)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();

    assert_eq!(json["stats"]["simulations"], 25);
    assert_eq!(json["stats"]["rounds"], 2);
    assert_eq!(json["last_draft_order"].as_array().unwrap().len(), 16);
}
