//! Foosball tournament web app: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    adjust_score, apply_result, cancel_match, clear_queue, finish_club_match, finish_match,
    generate_queue, generate_queue_with_rng, is_shutout, next_match, next_match_with_rng, rank,
    redo_score, schedule_next_match, schedule_next_match_with_rng, schedule_round,
    schedule_round_with_rng, set_score, start_match, target_games, undo_score, RankingMode,
    TeammateCosts, MAX_QUEUE_ITERATIONS,
};
pub use models::{
    Club, GameMatch, LiveMatch, MatchId, MatchStatus, Player, PlayerId, PlayerStats, Role,
    ScoreHistory, Team, TeamSide, Tournament, TournamentError, TournamentId, TournamentSettings,
    MAX_SCORE, MAX_SHUTOUT_BONUS,
};
