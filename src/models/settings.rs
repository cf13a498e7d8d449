//! Tournament settings value object.

use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// Largest allowed shutout bonus.
pub const MAX_SHUTOUT_BONUS: u32 = 2;

/// Highest score a team can hold in a live match.
pub const MAX_SCORE: u32 = 999;

/// Per-tournament rules. Changing them never touches completed matches.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentSettings {
    /// Goals needed before a match can be finished.
    #[serde(default = "default_winning_score")]
    pub winning_score: u32,
    /// Extra points for the winners of a shutout (0, 1 or 2).
    #[serde(default = "default_shutout_bonus")]
    pub shutout_bonus: u32,
    /// Whether attacker/defender roles are shown to players. Roles are recorded either way.
    #[serde(default = "default_position_mode")]
    pub is_position_mode: bool,
}

fn default_winning_score() -> u32 {
    10
}

fn default_shutout_bonus() -> u32 {
    1
}

fn default_position_mode() -> bool {
    true
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            winning_score: default_winning_score(),
            shutout_bonus: default_shutout_bonus(),
            is_position_mode: default_position_mode(),
        }
    }
}

impl TournamentSettings {
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.winning_score == 0 {
            return Err(TournamentError::InvalidSettings(
                "winning score must be positive",
            ));
        }
        if self.winning_score > MAX_SCORE {
            return Err(TournamentError::InvalidSettings(
                "winning score must be at most 999",
            ));
        }
        if self.shutout_bonus > MAX_SHUTOUT_BONUS {
            return Err(TournamentError::InvalidSettings(
                "shutout bonus must be 0, 1 or 2",
            ));
        }
        Ok(())
    }
}
