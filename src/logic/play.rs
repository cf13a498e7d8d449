//! Playing a match: start, live score edits, finish or cancel.

use crate::logic::stats::apply_result;
use crate::models::{
    Club, GameMatch, LiveMatch, MatchId, MatchStatus, TeamSide, Tournament, TournamentError,
    TournamentId,
};

/// Start a scheduled match. Only one match can be live per tournament.
pub fn start_match(tournament: &mut Tournament, match_id: MatchId) -> Result<(), TournamentError> {
    if let Some(live) = &tournament.live {
        return Err(TournamentError::MatchInProgress(live.id()));
    }
    let idx = tournament
        .matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if tournament.matches[idx].status != MatchStatus::Scheduled {
        return Err(TournamentError::MatchNotScheduled(match_id));
    }
    let game = tournament.matches.remove(idx);
    tournament.live = Some(LiveMatch::activate(game)?);
    log::info!("Tournament {}: match {} started", tournament.id, match_id);
    Ok(())
}

fn live_mut(tournament: &mut Tournament) -> Result<&mut LiveMatch, TournamentError> {
    tournament
        .live
        .as_mut()
        .ok_or(TournamentError::NoActiveMatch)
}

/// Add `delta` goals (negative to correct) to one team of the live match.
pub fn adjust_score(
    tournament: &mut Tournament,
    side: TeamSide,
    delta: i32,
) -> Result<(u32, u32), TournamentError> {
    let settings = tournament.settings;
    live_mut(tournament)?.update_score(side, delta, &settings)
}

/// Overwrite both scores of the live match.
pub fn set_score(
    tournament: &mut Tournament,
    team_1: u32,
    team_2: u32,
) -> Result<(u32, u32), TournamentError> {
    let settings = tournament.settings;
    live_mut(tournament)?.set_scores(team_1, team_2, &settings)
}

/// Returns whether anything was undone.
pub fn undo_score(tournament: &mut Tournament) -> Result<bool, TournamentError> {
    Ok(live_mut(tournament)?.undo())
}

/// Returns whether anything was redone.
pub fn redo_score(tournament: &mut Tournament) -> Result<bool, TournamentError> {
    Ok(live_mut(tournament)?.redo())
}

/// Complete the live match, record it in the tournament history and update the roster stats.
///
/// On error (no live match, no team at the winning score) nothing changes.
pub fn finish_match(tournament: &mut Tournament) -> Result<GameMatch, TournamentError> {
    let settings = tournament.settings;
    let completed = tournament
        .live
        .as_ref()
        .ok_or(TournamentError::NoActiveMatch)?
        .finish(&settings)?;
    tournament.live = None;
    tournament.players = apply_result(&tournament.players, &completed, &settings);
    tournament.matches.push(completed.clone());
    log::info!(
        "Tournament {}: match {} finished {}-{}",
        tournament.id,
        completed.id,
        completed.team_1.score,
        completed.team_2.score
    );
    Ok(completed)
}

/// Finish the live match of a club tournament and credit the result to the lifetime ledger too.
pub fn finish_club_match(
    club: &mut Club,
    tournament_id: TournamentId,
) -> Result<GameMatch, TournamentError> {
    let tournament = club.tournament_mut(tournament_id)?;
    let settings = tournament.settings;
    let completed = finish_match(tournament)?;
    club.players = apply_result(&club.players, &completed, &settings);
    Ok(completed)
}

/// Cancel the live match. It is removed entirely and leaves no history.
pub fn cancel_match(tournament: &mut Tournament) -> Result<MatchId, TournamentError> {
    let live = tournament.live.take().ok_or(TournamentError::NoActiveMatch)?;
    let id = live.discard();
    log::info!("Tournament {}: match {} cancelled", tournament.id, id);
    Ok(id)
}
