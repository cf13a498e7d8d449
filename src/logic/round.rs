//! Round generation: build a queue of matches that evens out games played.

use crate::logic::pairing::next_match_with_rng;
use crate::models::{GameMatch, Player, Role};
use rand::Rng;

/// Upper bound on matches produced by one call, so odd distributions still terminate.
pub const MAX_QUEUE_ITERATIONS: usize = 20;

/// Games every available player should reach by the end of the queue.
///
/// If everyone is level, push the whole pool one game forward; otherwise bring
/// laggards up to the current maximum. `None` with fewer than 4 available players.
pub fn target_games(players: &[Player]) -> Option<u32> {
    let available: Vec<u32> = players
        .iter()
        .filter(|p| p.is_available)
        .map(|p| p.games_played)
        .collect();
    if available.len() < 4 {
        return None;
    }
    let min = available.iter().copied().min()?;
    let max = available.iter().copied().max()?;
    Some(if min == max { max + 1 } else { max })
}

/// Queue using the thread-local RNG for pairing tie-breaks.
pub fn generate_queue(players: &[Player], history: &[GameMatch]) -> Vec<GameMatch> {
    generate_queue_with_rng(players, history, &mut rand::thread_rng())
}

/// Repeatedly pair against a simulated copy of the roster and history until every available
/// player reaches [`target_games`].
///
/// Inputs are never mutated. Once the queue holds a match, a pairing that would take someone past
/// the target ends generation; the first match is always accepted so every call makes progress.
pub fn generate_queue_with_rng<R: Rng + ?Sized>(
    players: &[Player],
    history: &[GameMatch],
    rng: &mut R,
) -> Vec<GameMatch> {
    let Some(target) = target_games(players) else {
        return Vec::new();
    };

    let mut sim_players = players.to_vec();
    let mut sim_history = history.to_vec();
    let mut queue = Vec::new();

    for _ in 0..MAX_QUEUE_ITERATIONS {
        if everyone_reached(&sim_players, target) {
            break;
        }
        let Some(next) = next_match_with_rng(&sim_players, &sim_history, rng) else {
            break;
        };
        let overshoots = sim_players
            .iter()
            .filter(|p| next.involves(p.id))
            .any(|p| p.games_played >= target);
        if overshoots && !queue.is_empty() {
            break;
        }
        simulate(&mut sim_players, &next);
        sim_history.push(next.clone());
        queue.push(next);
    }

    log::info!(
        "Generated {} match(es) towards {} game(s) per player",
        queue.len(),
        target
    );
    queue
}

fn everyone_reached(players: &[Player], target: u32) -> bool {
    players
        .iter()
        .filter(|p| p.is_available)
        .all(|p| p.games_played >= target)
}

/// Load the match onto the simulated players: one more game and one more turn in their role.
fn simulate(players: &mut [Player], game: &GameMatch) {
    for p in players.iter_mut() {
        match game.role_of(p.id) {
            Some(Role::Attacker) => {
                p.games_played += 1;
                p.attack_played += 1;
            }
            Some(Role::Defender) => {
                p.games_played += 1;
                p.defense_played += 1;
            }
            None => {}
        }
    }
}
