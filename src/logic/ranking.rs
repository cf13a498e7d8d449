//! Standings order.

use crate::models::Player;
use serde::{Deserialize, Serialize};

/// How to order a leaderboard.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    /// Points, then wins, then goal difference; all descending.
    #[default]
    Points,
    /// Fewest games played first. No other tie-break.
    LeastPlayed,
}

/// Order players for display. Stable: exact ties keep their input order.
pub fn rank(players: &[Player], mode: RankingMode) -> Vec<Player> {
    let mut ranked = players.to_vec();
    match mode {
        RankingMode::Points => ranked.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| b.wins.cmp(&a.wins))
                .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        }),
        RankingMode::LeastPlayed => ranked.sort_by_key(|p| p.games_played),
    }
    ranked
}
