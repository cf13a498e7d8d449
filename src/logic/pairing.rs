//! Pairing engine: pick the next balanced 2v2 match from the available pool.
//!
//! 1. Filter to available players; fewer than 4 means no match.
//! 2. Shuffle, then stable-sort by `games_played` and take the first 4.
//! 3. Try the 3 ways to split 4 players into two pairs; keep the cheapest by teammate history.
//! 4. Within each pair, the player with the higher role bias defends.

use crate::models::{GameMatch, MatchStatus, Player, PlayerId, Team};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashMap;

/// The three ways to split four players into two unordered pairs (indices into the selected 4).
const SPLITS: [[(usize, usize); 2]; 3] = [[(0, 1), (2, 3)], [(0, 2), (1, 3)], [(0, 3), (1, 2)]];

/// How often each unordered pair of players has been (or is queued to be) on the same team.
#[derive(Clone, Debug, Default)]
pub struct TeammateCosts {
    counts: HashMap<(PlayerId, PlayerId), u32>,
}

impl TeammateCosts {
    /// Count teammates over scheduled and completed matches.
    pub fn from_history(history: &[GameMatch]) -> Self {
        let mut costs = Self::default();
        for m in history {
            if matches!(m.status, MatchStatus::Scheduled | MatchStatus::Completed) {
                costs.record(&m.team_1);
                costs.record(&m.team_2);
            }
        }
        costs
    }

    pub fn record(&mut self, team: &Team) {
        *self
            .counts
            .entry(pair_key(team.attacker, team.defender))
            .or_insert(0) += 1;
    }

    /// Symmetric: `cost(a, b) == cost(b, a)`.
    pub fn cost(&self, a: PlayerId, b: PlayerId) -> u32 {
        self.counts.get(&pair_key(a, b)).copied().unwrap_or(0)
    }
}

fn pair_key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Next match using the thread-local RNG for tie-breaks.
pub fn next_match(players: &[Player], history: &[GameMatch]) -> Option<GameMatch> {
    next_match_with_rng(players, history, &mut rand::thread_rng())
}

/// Next balanced match among available players, or `None` if fewer than 4 are available.
///
/// Ties (equal games played, equal split cost, equal role bias) are broken with `rng`.
pub fn next_match_with_rng<R: Rng + ?Sized>(
    players: &[Player],
    history: &[GameMatch],
    rng: &mut R,
) -> Option<GameMatch> {
    let mut available: Vec<&Player> = players.iter().filter(|p| p.is_available).collect();
    if available.len() < 4 {
        log::debug!(
            "Only {} available player(s), no match possible",
            available.len()
        );
        return None;
    }

    available.shuffle(rng);
    available.sort_by_key(|p| p.games_played);
    let selected = &available[..4];

    let costs = TeammateCosts::from_history(history);
    let split_cost = |split: &[(usize, usize); 2]| -> u32 {
        split
            .iter()
            .map(|&(a, b)| costs.cost(selected[a].id, selected[b].id))
            .sum()
    };
    let min_cost = SPLITS.iter().map(split_cost).min()?;
    let cheapest: Vec<&[(usize, usize); 2]> = SPLITS
        .iter()
        .filter(|split| split_cost(*split) == min_cost)
        .collect();
    let [(a1, b1), (a2, b2)] = **cheapest.choose(rng)?;

    let team_1 = assign_roles(selected[a1], selected[b1], rng);
    let team_2 = assign_roles(selected[a2], selected[b2], rng);
    log::debug!(
        "Paired {} & {} vs {} & {} (teammate cost {})",
        selected[a1].name,
        selected[b1].name,
        selected[a2].name,
        selected[b2].name,
        min_cost
    );
    Some(GameMatch::new(team_1, team_2))
}

/// The member with the higher role bias (more attack than defense so far) defends.
fn assign_roles<R: Rng + ?Sized>(a: &Player, b: &Player, rng: &mut R) -> Team {
    let a_defends = match a.role_bias().cmp(&b.role_bias()) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => rng.gen::<bool>(),
    };
    if a_defends {
        Team::new(b.id, a.id)
    } else {
        Team::new(a.id, b.id)
    }
}
