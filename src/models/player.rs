//! Player and PlayerStats data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// Statistics view of a player (for API / display).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub goals_scored: u32,
    pub goals_conceded: u32,
    pub goal_difference: i64,
    pub attack_played: u32,
    pub defense_played: u32,
    pub points: u32,
    pub shutout_wins: u32,
}

impl PlayerStats {
    pub fn from_player(p: &Player) -> Self {
        Self {
            games_played: p.games_played,
            wins: p.wins,
            losses: p.losses,
            goals_scored: p.goals_scored,
            goals_conceded: p.goals_conceded,
            goal_difference: p.goal_difference(),
            attack_played: p.attack_played,
            defense_played: p.defense_played,
            points: p.points,
            shutout_wins: p.shutout_wins,
        }
    }
}

/// A player record: identity plus cumulative stats.
///
/// The same shape is used for tournament-scoped records (stats within one tournament)
/// and lifetime records (stats across every tournament).
/// `wins + losses == games_played` and `attack_played + defense_played == games_played`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Opaque avatar reference (URL or storage key), owned by whoever renders it.
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub games_played: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub goals_scored: u32,
    #[serde(default)]
    pub goals_conceded: u32,
    #[serde(default)]
    pub attack_played: u32,
    #[serde(default)]
    pub defense_played: u32,
    #[serde(default)]
    pub points: u32,
    /// Wins where the losing team scored nothing ("unicorns").
    #[serde(default, alias = "unicorns")]
    pub shutout_wins: u32,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

impl Player {
    /// Create a new available player with the given name. Stats start at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Create a zeroed record for an existing identity (e.g. a lifetime player joining a tournament).
    pub fn with_id(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: None,
            games_played: 0,
            wins: 0,
            losses: 0,
            goals_scored: 0,
            goals_conceded: 0,
            attack_played: 0,
            defense_played: 0,
            points: 0,
            shutout_wins: 0,
            is_available: true,
        }
    }

    /// Current stats as a separate struct (for API responses).
    pub fn stats(&self) -> PlayerStats {
        PlayerStats::from_player(self)
    }

    /// `attack_played - defense_played`; positive means the player has attacked more.
    pub fn role_bias(&self) -> i64 {
        i64::from(self.attack_played) - i64::from(self.defense_played)
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_scored) - i64::from(self.goals_conceded)
    }
}
