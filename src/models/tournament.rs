//! Tournament aggregate and TournamentError.

use crate::models::game::{GameMatch, MatchId, MatchStatus};
use crate::models::live_match::LiveMatch;
use crate::models::player::{Player, PlayerId};
use crate::models::settings::TournamentSettings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
///
/// All of them are recoverable; callers decide whether to retry, prompt or ignore.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TournamentError {
    /// Fewer than 4 available players, or nothing left to pair.
    #[error("Need at least 4 available players to schedule a match")]
    NotEnoughPlayers,
    #[error("Player not found")]
    PlayerNotFound(PlayerId),
    #[error("Match not found")]
    MatchNotFound(MatchId),
    #[error("No tournament")]
    TournamentNotFound,
    /// A player with this name already exists (names are unique, case-insensitive).
    #[error("A player with this name already exists")]
    DuplicatePlayerName,
    #[error("Player name must not be empty")]
    EmptyPlayerName,
    /// The player is referenced by a match of this tournament and cannot be removed.
    #[error("Player is part of a match in this tournament")]
    PlayerInUse(PlayerId),
    /// Only scheduled matches can be started.
    #[error("Match is not scheduled")]
    MatchNotScheduled(MatchId),
    /// Another match is already being played.
    #[error("A match is already in progress")]
    MatchInProgress(MatchId),
    #[error("No match in progress")]
    NoActiveMatch,
    /// Neither team has reached the winning score yet.
    #[error("Neither team has reached the winning score")]
    NotFinishable,
    /// The edit would leave both teams at or above the winning score.
    #[error("Both teams cannot reach the winning score")]
    ScoreConflict,
    #[error("Score must be between 0 and 999")]
    ScoreOutOfRange,
    #[error("Invalid settings: {0}")]
    InvalidSettings(&'static str),
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// One tournament: its roster (tournament-scoped stats), its matches and its rules.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Roster with stats counted within this tournament only.
    pub players: Vec<Player>,
    /// Scheduled queue and completed history, in insertion order. Excludes the live match.
    pub matches: Vec<GameMatch>,
    pub settings: TournamentSettings,
    /// The match currently being played, with its score history.
    pub live: Option<LiveMatch>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create an empty tournament.
    pub fn new(name: impl Into<String>, settings: TournamentSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            players: Vec::new(),
            matches: Vec::new(),
            settings,
            live: None,
            created_at: Utc::now(),
        }
    }

    /// Create a tournament with an initial roster.
    pub fn with_players(
        name: impl Into<String>,
        players: Vec<Player>,
        settings: TournamentSettings,
    ) -> Self {
        Self {
            players,
            ..Self::new(name, settings)
        }
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Look up a match in the queue/history or the live slot.
    pub fn get_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id).or_else(|| {
            self.live
                .as_ref()
                .map(LiveMatch::game)
                .filter(|m| m.id == id)
        })
    }

    /// Add a new player by name. Names must be unique (case-insensitive).
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId, TournamentError> {
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::EmptyPlayerName);
        }
        let player = Player::new(name_trimmed);
        let id = player.id;
        self.enroll(player)?;
        Ok(id)
    }

    /// Add an existing player record to the roster (a no-op if the id is already there).
    pub fn enroll(&mut self, player: Player) -> Result<(), TournamentError> {
        if self.get_player(player.id).is_some() {
            return Ok(());
        }
        let is_duplicate = self
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(player.name.trim()));
        if is_duplicate {
            return Err(TournamentError::DuplicatePlayerName);
        }
        self.players.push(player);
        Ok(())
    }

    /// Remove a player from the roster. Refused while any match of this tournament references them.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        let referenced = self.matches.iter().any(|m| m.involves(player_id))
            || self
                .live
                .as_ref()
                .is_some_and(|live| live.game().involves(player_id));
        if referenced {
            return Err(TournamentError::PlayerInUse(player_id));
        }
        self.players.remove(idx);
        Ok(())
    }

    /// Availability toggle: unavailable players are skipped by pairing.
    pub fn set_player_available(
        &mut self,
        player_id: PlayerId,
        available: bool,
    ) -> Result<(), TournamentError> {
        let p = self
            .get_player_mut(player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        p.is_available = available;
        Ok(())
    }

    /// Replace the rules. Completed matches keep the results they were scored with.
    pub fn update_settings(&mut self, settings: TournamentSettings) -> Result<(), TournamentError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn scheduled_matches(&self) -> impl Iterator<Item = &GameMatch> {
        self.matches
            .iter()
            .filter(|m| m.status == MatchStatus::Scheduled)
    }

    pub fn completed_matches(&self) -> impl Iterator<Item = &GameMatch> {
        self.matches
            .iter()
            .filter(|m| m.status == MatchStatus::Completed)
    }
}
