//! Scheduling: add matches to a tournament's queue.

use crate::logic::pairing::next_match_with_rng;
use crate::logic::round::generate_queue_with_rng;
use crate::models::{MatchId, MatchStatus, Tournament, TournamentError};
use rand::Rng;

/// Queue one balanced match. Fails with `NotEnoughPlayers` if fewer than 4 players are available.
pub fn schedule_next_match(tournament: &mut Tournament) -> Result<MatchId, TournamentError> {
    schedule_next_match_with_rng(tournament, &mut rand::thread_rng())
}

pub fn schedule_next_match_with_rng<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<MatchId, TournamentError> {
    let game = next_match_with_rng(&tournament.players, &tournament.matches, rng)
        .ok_or(TournamentError::NotEnoughPlayers)?;
    let id = game.id;
    tournament.matches.push(game);
    log::info!("Tournament {}: scheduled match {}", tournament.id, id);
    Ok(id)
}

/// Queue a full round that evens out games played. Returns the new match ids in play order.
pub fn schedule_round(tournament: &mut Tournament) -> Result<Vec<MatchId>, TournamentError> {
    schedule_round_with_rng(tournament, &mut rand::thread_rng())
}

pub fn schedule_round_with_rng<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<Vec<MatchId>, TournamentError> {
    let queue = generate_queue_with_rng(&tournament.players, &tournament.matches, rng);
    if queue.is_empty() {
        return Err(TournamentError::NotEnoughPlayers);
    }
    let ids = queue.iter().map(|m| m.id).collect();
    tournament.matches.extend(queue);
    Ok(ids)
}

/// Discard every scheduled match. Completed history and the live match are kept.
/// Returns how many matches were removed.
pub fn clear_queue(tournament: &mut Tournament) -> usize {
    let before = tournament.matches.len();
    tournament
        .matches
        .retain(|m| m.status != MatchStatus::Scheduled);
    let removed = before - tournament.matches.len();
    if removed > 0 {
        log::info!(
            "Tournament {}: cleared {} scheduled match(es)",
            tournament.id,
            removed
        );
    }
    removed
}
