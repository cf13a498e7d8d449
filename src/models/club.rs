//! Club: lifetime player ledger plus every tournament played by those players.

use crate::models::player::{Player, PlayerId};
use crate::models::settings::TournamentSettings;
use crate::models::tournament::{Tournament, TournamentError, TournamentId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Club {
    /// Lifetime records. Never deleted: historical matches keep referring to them.
    pub players: Vec<Player>,
    pub tournaments: HashMap<TournamentId, Tournament>,
}

impl Club {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Register a new player. Names must be unique (case-insensitive).
    pub fn create_player(&mut self, name: impl Into<String>) -> Result<PlayerId, TournamentError> {
        let name = name.into();
        let name = validate_name(&self.players, None, &name)?;
        let player = Player::new(name);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Rename a player everywhere (lifetime ledger and every tournament roster).
    pub fn rename_player(
        &mut self,
        player_id: PlayerId,
        name: impl Into<String>,
    ) -> Result<(), TournamentError> {
        let name = name.into();
        let name = validate_name(&self.players, Some(player_id), &name)?.to_string();
        let p = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        p.name = name.clone();
        for t in self.tournaments.values_mut() {
            if let Some(p) = t.get_player_mut(player_id) {
                p.name = name.clone();
            }
        }
        Ok(())
    }

    /// Attach or clear the avatar reference, everywhere the player appears.
    pub fn set_avatar(
        &mut self,
        player_id: PlayerId,
        avatar: Option<String>,
    ) -> Result<(), TournamentError> {
        let p = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        p.avatar = avatar.clone();
        for t in self.tournaments.values_mut() {
            if let Some(p) = t.get_player_mut(player_id) {
                p.avatar = avatar.clone();
            }
        }
        Ok(())
    }

    pub fn tournament(&self, id: TournamentId) -> Result<&Tournament, TournamentError> {
        self.tournaments
            .get(&id)
            .ok_or(TournamentError::TournamentNotFound)
    }

    pub fn tournament_mut(&mut self, id: TournamentId) -> Result<&mut Tournament, TournamentError> {
        self.tournaments
            .get_mut(&id)
            .ok_or(TournamentError::TournamentNotFound)
    }

    /// Start a tournament with the given club players, each with a fresh tournament record.
    pub fn create_tournament(
        &mut self,
        name: impl Into<String>,
        settings: TournamentSettings,
        player_ids: &[PlayerId],
    ) -> Result<TournamentId, TournamentError> {
        settings.validate()?;
        let mut tournament = Tournament::new(name, settings);
        for &pid in player_ids {
            tournament.enroll(self.roster_record(pid)?)?;
        }
        let id = tournament.id;
        log::info!(
            "Created tournament {} with {} player(s)",
            id,
            tournament.players.len()
        );
        self.tournaments.insert(id, tournament);
        Ok(id)
    }

    pub fn add_player_to_tournament(
        &mut self,
        tournament_id: TournamentId,
        player_id: PlayerId,
    ) -> Result<(), TournamentError> {
        let record = self.roster_record(player_id)?;
        self.tournament_mut(tournament_id)?.enroll(record)
    }

    /// A zeroed tournament record sharing the lifetime player's identity.
    fn roster_record(&self, player_id: PlayerId) -> Result<Player, TournamentError> {
        let lifetime = self
            .get_player(player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        let mut record = Player::with_id(lifetime.id, lifetime.name.clone());
        record.avatar = lifetime.avatar.clone();
        Ok(record)
    }
}

fn validate_name<'a>(
    players: &[Player],
    except: Option<PlayerId>,
    name: &'a str,
) -> Result<&'a str, TournamentError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TournamentError::EmptyPlayerName);
    }
    let is_duplicate = players
        .iter()
        .filter(|p| Some(p.id) != except)
        .any(|p| p.name.eq_ignore_ascii_case(name));
    if is_duplicate {
        return Err(TournamentError::DuplicatePlayerName);
    }
    Ok(name)
}
