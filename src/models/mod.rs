//! Data structures for the foosball tournament: players, matches, settings, tournaments.

mod club;
mod game;
mod live_match;
mod player;
mod settings;
mod tournament;

pub use club::Club;
pub use game::{GameMatch, MatchId, MatchStatus, Role, Team, TeamSide};
pub use live_match::{LiveMatch, ScoreHistory};
pub use player::{Player, PlayerId, PlayerStats};
pub use settings::{TournamentSettings, MAX_SCORE, MAX_SHUTOUT_BONUS};
pub use tournament::{Tournament, TournamentError, TournamentId};
