//! Match (game), Team, roles and status for 2v2 games.

use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which side of the table: `team_1` or `team_2`. Also used as the winner of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    One,
    Two,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::One => TeamSide::Two,
            TeamSide::Two => TeamSide::One,
        }
    }
}

/// Position a player holds within a team.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Attacker,
    Defender,
}

/// Progress of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Queued, not started.
    Scheduled,
    /// Being played; the score is live.
    Active,
    /// Finished with a winner. Permanent history.
    Completed,
}

/// Two players in fixed roles plus the team's score.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub attacker: PlayerId,
    pub defender: PlayerId,
    #[serde(default)]
    pub score: u32,
}

impl Team {
    pub fn new(attacker: PlayerId, defender: PlayerId) -> Self {
        Self {
            attacker,
            defender,
            score: 0,
        }
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.attacker == player || self.defender == player
    }

    pub fn role_of(&self, player: PlayerId) -> Option<Role> {
        if self.attacker == player {
            Some(Role::Attacker)
        } else if self.defender == player {
            Some(Role::Defender)
        } else {
            None
        }
    }
}

/// A single 2v2 match.
///
/// All four participants are distinct; `winner` is set exactly when `status` is `Completed`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub team_1: Team,
    pub team_2: Team,
    pub status: MatchStatus,
    /// None unless completed.
    pub winner: Option<TeamSide>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GameMatch {
    /// New scheduled match at 0–0.
    pub fn new(team_1: Team, team_2: Team) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            team_1: Team { score: 0, ..team_1 },
            team_2: Team { score: 0, ..team_2 },
            status: MatchStatus::Scheduled,
            winner: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::One => &self.team_1,
            TeamSide::Two => &self.team_2,
        }
    }

    /// `(team_1.score, team_2.score)`.
    pub fn scores(&self) -> (u32, u32) {
        (self.team_1.score, self.team_2.score)
    }

    /// The four participant ids: team 1 attacker, team 1 defender, team 2 attacker, team 2 defender.
    pub fn participants(&self) -> [PlayerId; 4] {
        [
            self.team_1.attacker,
            self.team_1.defender,
            self.team_2.attacker,
            self.team_2.defender,
        ]
    }

    pub fn involves(&self, player: PlayerId) -> bool {
        self.team_1.contains(player) || self.team_2.contains(player)
    }

    pub fn side_of(&self, player: PlayerId) -> Option<TeamSide> {
        if self.team_1.contains(player) {
            Some(TeamSide::One)
        } else if self.team_2.contains(player) {
            Some(TeamSide::Two)
        } else {
            None
        }
    }

    pub fn role_of(&self, player: PlayerId) -> Option<Role> {
        self.team_1
            .role_of(player)
            .or_else(|| self.team_2.role_of(player))
    }

    /// True when the four participant ids are pairwise distinct.
    pub fn has_distinct_participants(&self) -> bool {
        let ids = self.participants();
        (0..ids.len()).all(|i| ids[i + 1..].iter().all(|other| *other != ids[i]))
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
