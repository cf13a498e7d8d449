//! Integration tests for round (queue) generation.

use foosball_tournament_web::{
    generate_queue_with_rng, target_games, GameMatch, MatchStatus, Player, PlayerId, Role, Team,
    MAX_QUEUE_ITERATIONS,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

fn players(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("P{i}"))).collect()
}

fn with_games(mut p: Player, games: u32) -> Player {
    p.games_played = games;
    p.attack_played = games / 2;
    p.defense_played = games - games / 2;
    p
}

/// Games played per available player after the queue has been played.
fn games_after(players: &[Player], queue: &[GameMatch]) -> HashMap<PlayerId, u32> {
    let mut games: HashMap<PlayerId, u32> = players
        .iter()
        .filter(|p| p.is_available)
        .map(|p| (p.id, p.games_played))
        .collect();
    for m in queue {
        for id in m.participants() {
            *games.entry(id).or_insert(0) += 1;
        }
    }
    games
}

#[test]
fn target_pushes_level_pool_forward() {
    let ps: Vec<Player> = players(6).into_iter().map(|p| with_games(p, 3)).collect();
    assert_eq!(target_games(&ps), Some(4));
}

#[test]
fn target_brings_laggards_up_to_the_pack() {
    let mut ps = players(6);
    ps[0] = with_games(ps[0].clone(), 4);
    ps[1] = with_games(ps[1].clone(), 2);
    assert_eq!(target_games(&ps), Some(4));
}

#[test]
fn target_ignores_unavailable_players() {
    let mut ps = players(5);
    ps[0] = with_games(ps[0].clone(), 7);
    ps[0].is_available = false;
    assert_eq!(target_games(&ps), Some(1));
    ps[1].is_available = false;
    assert_eq!(target_games(&ps), None);
}

#[test]
fn fewer_than_four_available_gives_empty_queue() {
    let mut rng = StdRng::seed_from_u64(3);
    assert!(generate_queue_with_rng(&players(3), &[], &mut rng).is_empty());
}

#[test]
fn eight_fresh_players_get_one_game_each() {
    let ps = players(8);
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let queue = generate_queue_with_rng(&ps, &[], &mut rng);
        assert_eq!(queue.len(), 2);
        let games = games_after(&ps, &queue);
        assert!(games.values().all(|&g| g == 1));
        for m in &queue {
            assert_eq!(m.status, MatchStatus::Scheduled);
            assert!(m.has_distinct_participants());
        }
    }
}

#[test]
fn laggards_catch_up_without_anyone_passing_the_target() {
    let ps: Vec<Player> = players(8)
        .into_iter()
        .enumerate()
        .map(|(i, p)| with_games(p, if i < 4 { 2 } else { 1 }))
        .collect();
    let laggards: Vec<PlayerId> = ps[4..].iter().map(|p| p.id).collect();
    let mut rng = StdRng::seed_from_u64(11);
    let queue = generate_queue_with_rng(&ps, &[], &mut rng);
    assert_eq!(queue.len(), 1);
    assert!(laggards.iter().all(|id| queue[0].involves(*id)));
}

#[test]
fn never_exceeds_target_or_iteration_bound() {
    for n in 4..=13 {
        let ps = players(n);
        let target = target_games(&ps).unwrap();
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let queue = generate_queue_with_rng(&ps, &[], &mut rng);
            assert!(!queue.is_empty());
            assert!(queue.len() <= MAX_QUEUE_ITERATIONS);
            let games = games_after(&ps, &queue);
            assert!(games.values().all(|&g| g <= target), "n={n} seed={seed}");
        }
    }
}

#[test]
fn large_pool_stops_at_iteration_bound() {
    let ps = players(100);
    let mut rng = StdRng::seed_from_u64(5);
    let queue = generate_queue_with_rng(&ps, &[], &mut rng);
    assert_eq!(queue.len(), MAX_QUEUE_ITERATIONS);
}

#[test]
fn inputs_are_not_mutated() {
    let ps = players(9);
    let history = vec![GameMatch::new(
        Team::new(ps[0].id, ps[1].id),
        Team::new(ps[2].id, ps[3].id),
    )];
    let (ps_before, history_before) = (ps.clone(), history.clone());
    let mut rng = StdRng::seed_from_u64(8);
    let _ = generate_queue_with_rng(&ps, &history, &mut rng);
    assert_eq!(ps, ps_before);
    assert_eq!(history, history_before);
}

#[test]
fn simulated_roles_balance_over_the_queue() {
    // Attack-heavy players should be sent to defense once they are paired.
    let mut ps = players(8);
    for p in ps.iter_mut().take(4) {
        p.games_played = 2;
        p.attack_played = 2;
    }
    for p in ps.iter_mut().skip(4) {
        p.games_played = 2;
        p.defense_played = 2;
    }
    let mut rng = StdRng::seed_from_u64(21);
    let queue = generate_queue_with_rng(&ps, &[], &mut rng);
    for m in &queue {
        for team in [m.team_1, m.team_2] {
            let attacker = ps.iter().find(|p| p.id == team.attacker).unwrap();
            let defender = ps.iter().find(|p| p.id == team.defender).unwrap();
            assert!(defender.role_bias() >= attacker.role_bias());
            assert_eq!(m.role_of(team.defender), Some(Role::Defender));
        }
    }
}
