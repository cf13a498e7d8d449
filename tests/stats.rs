//! Integration tests for applying match results to player stats.

use foosball_tournament_web::{
    apply_result, is_shutout, GameMatch, MatchStatus, Player, Team, TeamSide, TournamentSettings,
};

/// Four participants (P0..P3) plus one bystander (P4).
fn roster() -> Vec<Player> {
    (0..5).map(|i| Player::new(format!("P{i}"))).collect()
}

/// P0 attacks / P1 defends for team 1; P2 attacks / P3 defends for team 2.
fn finished(players: &[Player], team_1_score: u32, team_2_score: u32) -> GameMatch {
    let mut m = GameMatch::new(
        Team::new(players[0].id, players[1].id),
        Team::new(players[2].id, players[3].id),
    );
    m.team_1.score = team_1_score;
    m.team_2.score = team_2_score;
    m.status = MatchStatus::Completed;
    m.winner = Some(if team_1_score > team_2_score {
        TeamSide::One
    } else {
        TeamSide::Two
    });
    m
}

fn settings(shutout_bonus: u32) -> TournamentSettings {
    TournamentSettings {
        winning_score: 10,
        shutout_bonus,
        is_position_mode: true,
    }
}

#[test]
fn participants_gain_one_game_and_bystanders_are_untouched() {
    let players = roster();
    let m = finished(&players, 10, 6);
    let updated = apply_result(&players, &m, &settings(1));

    assert_eq!(updated.len(), players.len());
    for p in &updated[..4] {
        assert_eq!(p.games_played, 1);
        assert_eq!(p.wins + p.losses, p.games_played);
        assert_eq!(p.attack_played + p.defense_played, p.games_played);
    }
    assert_eq!(updated[4], players[4]);
    let total: u32 = updated.iter().map(|p| p.games_played).sum();
    assert_eq!(total, 4);
}

#[test]
fn wins_goals_and_roles_are_recorded() {
    let players = roster();
    let m = finished(&players, 7, 10);
    let updated = apply_result(&players, &m, &settings(1));

    let (p0, p1, p2, p3) = (&updated[0], &updated[1], &updated[2], &updated[3]);
    assert_eq!((p0.wins, p0.losses), (0, 1));
    assert_eq!((p2.wins, p2.losses), (1, 0));
    assert_eq!((p0.goals_scored, p0.goals_conceded), (7, 10));
    assert_eq!((p3.goals_scored, p3.goals_conceded), (10, 7));
    assert_eq!((p0.attack_played, p0.defense_played), (1, 0));
    assert_eq!((p1.attack_played, p1.defense_played), (0, 1));
    assert_eq!(p0.points, 0);
    assert_eq!(p1.points, 0);
    assert_eq!(p2.points, 1);
    assert_eq!(p3.points, 1);
    assert_eq!(p2.shutout_wins, 0);
    assert_eq!(p3.stats().goal_difference, 3);
    assert_eq!(p0.stats().goal_difference, -3);
}

#[test]
fn shutout_adds_bonus_and_counter_for_winners_only() {
    let players = roster();
    let m = finished(&players, 10, 0);
    assert!(is_shutout(&m));
    let updated = apply_result(&players, &m, &settings(1));

    for p in &updated[..2] {
        assert_eq!(p.points, 2);
        assert_eq!(p.shutout_wins, 1);
    }
    for p in &updated[2..4] {
        assert_eq!(p.points, 0);
        assert_eq!(p.shutout_wins, 0);
    }
}

#[test]
fn shutout_counts_even_without_bonus_points() {
    let players = roster();
    let m = finished(&players, 0, 10);
    let updated = apply_result(&players, &m, &settings(0));
    assert_eq!(updated[2].points, 1);
    assert_eq!(updated[2].shutout_wins, 1);

    let updated = apply_result(&players, &m, &settings(2));
    assert_eq!(updated[3].points, 3);
}

#[test]
fn unfinished_match_is_a_no_op() {
    let players = roster();
    let mut m = finished(&players, 10, 4);
    m.status = MatchStatus::Active;
    assert_eq!(apply_result(&players, &m, &settings(1)), players);

    let mut m = finished(&players, 10, 4);
    m.winner = None;
    assert_eq!(apply_result(&players, &m, &settings(1)), players);
    assert!(!is_shutout(&m));
}

#[test]
fn unknown_participant_is_skipped() {
    let mut players = roster();
    let m = finished(&players, 10, 3);
    let missing = players.remove(3);
    let updated = apply_result(&players, &m, &settings(1));
    assert_eq!(updated.len(), 4);
    assert!(updated.iter().all(|p| p.id != missing.id));
    assert_eq!(updated[0].wins, 1);
    assert_eq!(updated[2].losses, 1);
}

#[test]
fn input_slice_is_not_mutated() {
    let players = roster();
    let before = players.clone();
    let m = finished(&players, 10, 2);
    let _ = apply_result(&players, &m, &settings(1));
    assert_eq!(players, before);
}

#[test]
fn counters_saturate_instead_of_overflowing() {
    let mut players = roster();
    players[0].goals_scored = u32::MAX - 3;
    players[0].games_played = u32::MAX;
    players[0].wins = u32::MAX;
    players[0].points = u32::MAX - 1;
    players[2].goals_conceded = u32::MAX;
    let m = finished(&players, 10, 0);
    let updated = apply_result(&players, &m, &settings(2));
    assert_eq!(updated[0].goals_scored, u32::MAX);
    assert_eq!(updated[0].games_played, u32::MAX);
    assert_eq!(updated[0].wins, u32::MAX);
    assert_eq!(updated[0].points, u32::MAX);
    assert_eq!(updated[2].goals_conceded, u32::MAX);
    assert_eq!(updated[1].points, 3);
}
