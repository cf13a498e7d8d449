//! Tournament business logic: ranking, pairing, round generation, stats and match play.

pub mod pairing;
pub mod play;
pub mod ranking;
pub mod round;
pub mod schedule;
pub mod stats;

pub use pairing::{next_match, next_match_with_rng, TeammateCosts};
pub use play::{
    adjust_score, cancel_match, finish_club_match, finish_match, redo_score, set_score,
    start_match, undo_score,
};
pub use ranking::{rank, RankingMode};
pub use round::{generate_queue, generate_queue_with_rng, target_games, MAX_QUEUE_ITERATIONS};
pub use schedule::{
    clear_queue, schedule_next_match, schedule_next_match_with_rng, schedule_round,
    schedule_round_with_rng,
};
pub use stats::{apply_result, is_shutout};
