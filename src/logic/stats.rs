//! Statistics updater: fold a completed match into player records.

use crate::models::{GameMatch, MatchStatus, Player, Role, TournamentSettings};

/// True when the losing team of a completed match scored nothing.
pub fn is_shutout(game: &GameMatch) -> bool {
    match game.winner {
        Some(side) => game.team(side.opponent()).score == 0,
        None => false,
    }
}

/// Return `players` with the result of `game` applied to its four participants.
///
/// Pure: works the same on tournament and lifetime records. Matches that are not completed
/// (or have no winner) leave the players unchanged. Participants missing from `players` are
/// skipped.
pub fn apply_result(
    players: &[Player],
    game: &GameMatch,
    settings: &TournamentSettings,
) -> Vec<Player> {
    let mut updated = players.to_vec();
    let winner = match (game.status, game.winner) {
        (MatchStatus::Completed, Some(winner)) => winner,
        _ => {
            log::debug!("Match {} is not completed, stats unchanged", game.id);
            return updated;
        }
    };
    let shutout = is_shutout(game);

    for pid in game.participants() {
        let Some(p) = updated.iter_mut().find(|p| p.id == pid) else {
            log::warn!("Match {} references unknown player {}, skipping", game.id, pid);
            continue;
        };
        let Some(side) = game.side_of(pid) else {
            continue;
        };
        let own = game.team(side);
        let other = game.team(side.opponent());

        // Counters saturate instead of overflowing.
        p.games_played = p.games_played.saturating_add(1);
        p.goals_scored = p.goals_scored.saturating_add(own.score);
        p.goals_conceded = p.goals_conceded.saturating_add(other.score);
        match own.role_of(pid) {
            Some(Role::Attacker) => p.attack_played = p.attack_played.saturating_add(1),
            Some(Role::Defender) => p.defense_played = p.defense_played.saturating_add(1),
            None => {}
        }
        if side == winner {
            p.wins = p.wins.saturating_add(1);
            p.points = p.points.saturating_add(1);
            if shutout {
                p.points = p.points.saturating_add(settings.shutout_bonus);
                p.shutout_wins = p.shutout_wins.saturating_add(1);
            }
        } else {
            p.losses = p.losses.saturating_add(1);
        }
    }
    updated
}
