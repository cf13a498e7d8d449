//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).
//!
//! All state lives in memory in one `Club`; every mutation goes through the write lock, which
//! serializes score edits, undo/redo and finish for the live match of each tournament.

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use foosball_tournament_web::{
    adjust_score, cancel_match, clear_queue, finish_club_match, rank, redo_score,
    schedule_next_match, schedule_round, start_match, undo_score, Club, MatchId, Player, PlayerId,
    PlayerStats, RankingMode, TeamSide, TournamentError, TournamentId, TournamentSettings,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

type AppState = Data<RwLock<Club>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct AvatarBody {
    #[serde(default)]
    avatar: Option<String>,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    settings: TournamentSettings,
    #[serde(default)]
    player_ids: Vec<PlayerId>,
}

#[derive(Deserialize)]
struct EnrollBody {
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct AvailabilityBody {
    available: bool,
}

#[derive(Deserialize)]
struct ScoreBody {
    team: TeamSide,
    #[serde(default = "default_delta")]
    delta: i32,
}

fn default_delta() -> i32 {
    1
}

#[derive(Deserialize)]
struct RankingQuery {
    #[serde(default)]
    mode: RankingMode,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segment: player id (e.g. /api/players/{player_id})
#[derive(Deserialize)]
struct PlayerPath {
    player_id: PlayerId,
}

/// Path segments: tournament id and player id (e.g. /api/tournaments/{id}/players/{player_id})
#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player_id: PlayerId,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id})
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

/// One leaderboard entry: identity plus the stat block.
#[derive(Serialize)]
struct Standing {
    rank: usize,
    id: PlayerId,
    name: String,
    avatar: Option<String>,
    is_available: bool,
    stats: PlayerStats,
}

/// One CSV row of an exported leaderboard.
#[derive(Serialize)]
struct StandingRow<'a> {
    rank: usize,
    name: &'a str,
    points: u32,
    wins: u32,
    losses: u32,
    games_played: u32,
    goals_scored: u32,
    goals_conceded: u32,
    goal_difference: i64,
    shutout_wins: u32,
    attack_played: u32,
    defense_played: u32,
}

fn error_response(e: TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::TournamentNotFound
        | TournamentError::PlayerNotFound(_)
        | TournamentError::MatchNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn standings(players: &[Player], mode: RankingMode) -> Vec<Standing> {
    rank(players, mode)
        .into_iter()
        .enumerate()
        .map(|(i, p)| Standing {
            rank: i + 1,
            stats: p.stats(),
            id: p.id,
            name: p.name,
            avatar: p.avatar,
            is_available: p.is_available,
        })
        .collect()
}

fn standings_csv(rows: &[Standing]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        let s = &row.stats;
        writer.serialize(StandingRow {
            rank: row.rank,
            name: &row.name,
            points: s.points,
            wins: s.wins,
            losses: s.losses,
            games_played: s.games_played,
            goals_scored: s.goals_scored,
            goals_conceded: s.goals_conceded,
            goal_difference: s.goal_difference,
            shutout_wins: s.shutout_wins,
            attack_played: s.attack_played,
            defense_played: s.defense_played,
        })?;
    }
    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}

/// Download name for a tournament export: the name's letters, digits, `-` and `_`, or the
/// tournament id when nothing usable is left.
fn export_filename(name: &str, id: TournamentId) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if stem.is_empty() {
        format!("{id}.csv")
    } else {
        format!("{stem}.csv")
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "foosball-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Lifetime leaderboard of every club player.
#[get("/api/players")]
async fn api_list_players(state: AppState, query: Query<RankingQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(standings(&g.players, query.mode))
}

/// Register a club player.
#[post("/api/players")]
async fn api_create_player(state: AppState, body: Json<NameBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.create_player(body.name.trim()) {
        Ok(id) => HttpResponse::Ok().json(g.get_player(id)),
        Err(e) => error_response(e),
    }
}

#[put("/api/players/{player_id}/name")]
async fn api_rename_player(state: AppState, path: Path<PlayerPath>, body: Json<NameBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.rename_player(path.player_id, body.name.trim()) {
        Ok(()) => HttpResponse::Ok().json(g.get_player(path.player_id)),
        Err(e) => error_response(e),
    }
}

#[put("/api/players/{player_id}/avatar")]
async fn api_set_avatar(state: AppState, path: Path<PlayerPath>, body: Json<AvatarBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let avatar = body.into_inner().avatar;
    match g.set_avatar(path.player_id, avatar) {
        Ok(()) => HttpResponse::Ok().json(g.get_player(path.player_id)),
        Err(e) => error_response(e),
    }
}

/// Create a tournament with a roster of existing club players.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.create_tournament(body.name.trim(), body.settings, &body.player_ids) {
        Ok(id) => HttpResponse::Ok().json(g.tournament(id).ok()),
        Err(e) => error_response(e),
    }
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.tournament(path.id) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Add a club player to the tournament roster.
#[post("/api/tournaments/{id}/players")]
async fn api_add_player(state: AppState, path: Path<TournamentPath>, body: Json<EnrollBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.add_player_to_tournament(path.id, body.player_id) {
        Ok(()) => HttpResponse::Ok().json(g.tournament(path.id).ok()),
        Err(e) => error_response(e),
    }
}

/// Remove a player from the roster (refused while a match references them).
#[delete("/api/tournaments/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.tournament_mut(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(e),
    };
    match t.remove_player(path.player_id) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(e),
    }
}

#[put("/api/tournaments/{id}/players/{player_id}/availability")]
async fn api_set_availability(
    state: AppState,
    path: Path<TournamentPlayerPath>,
    body: Json<AvailabilityBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.tournament_mut(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(e),
    };
    match t.set_player_available(path.player_id, body.available) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(e),
    }
}

#[put("/api/tournaments/{id}/settings")]
async fn api_update_settings(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TournamentSettings>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.tournament_mut(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(e),
    };
    match t.update_settings(body.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(e),
    }
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>, query: Query<RankingQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.tournament(path.id) {
        Ok(t) => HttpResponse::Ok().json(standings(&t.players, query.mode)),
        Err(e) => error_response(e),
    }
}

/// Leaderboard as a CSV download.
#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<TournamentPath>, query: Query<RankingQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.tournament(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(e),
    };
    match standings_csv(&standings(&t.players, query.mode)) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", export_filename(&t.name, t.id)),
            ))
            .body(bytes),
        Err(e) => {
            log::error!("CSV export failed for tournament {}: {}", t.id, e);
            HttpResponse::InternalServerError().body("export error")
        }
    }
}

/// Queue one balanced match.
#[post("/api/tournaments/{id}/matches/next")]
async fn api_next_match(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.tournament_mut(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(e),
    };
    match schedule_next_match(t) {
        Ok(_) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(e),
    }
}

/// Queue a round that evens out games played.
#[post("/api/tournaments/{id}/matches/round")]
async fn api_generate_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.tournament_mut(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(e),
    };
    match schedule_round(t) {
        Ok(_) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(e),
    }
}

/// Drop every scheduled match.
#[delete("/api/tournaments/{id}/matches/queue")]
async fn api_clear_queue(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.tournament_mut(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(e),
    };
    clear_queue(t);
    HttpResponse::Ok().json(&*t)
}

#[post("/api/tournaments/{id}/matches/{match_id}/start")]
async fn api_start_match(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.tournament_mut(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(e),
    };
    match start_match(t, path.match_id) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(e),
    }
}

/// Add (or with a negative delta, remove) goals for one team of the live match.
#[post("/api/tournaments/{id}/live/score")]
async fn api_live_score(state: AppState, path: Path<TournamentPath>, body: Json<ScoreBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.tournament_mut(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(e),
    };
    match adjust_score(t, body.team, body.delta) {
        Ok(_) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(e),
    }
}

#[post("/api/tournaments/{id}/live/undo")]
async fn api_live_undo(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.tournament_mut(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(e),
    };
    match undo_score(t) {
        Ok(_) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(e),
    }
}

#[post("/api/tournaments/{id}/live/redo")]
async fn api_live_redo(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.tournament_mut(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(e),
    };
    match redo_score(t) {
        Ok(_) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(e),
    }
}

/// Finish the live match: tournament and lifetime stats are both updated.
#[post("/api/tournaments/{id}/live/finish")]
async fn api_live_finish(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match finish_club_match(&mut g, path.id) {
        Ok(_) => HttpResponse::Ok().json(g.tournament(path.id).ok()),
        Err(e) => error_response(e),
    }
}

/// Cancel the live match; it leaves no trace.
#[post("/api/tournaments/{id}/live/cancel")]
async fn api_live_cancel(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.tournament_mut(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(e),
    };
    match cancel_match(t) {
        Ok(_) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(Club::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_list_players)
            .service(api_create_player)
            .service(api_rename_player)
            .service(api_set_avatar)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_set_availability)
            .service(api_update_settings)
            .service(api_standings_csv)
            .service(api_standings)
            .service(api_next_match)
            .service(api_generate_round)
            .service(api_clear_queue)
            .service(api_start_match)
            .service(api_live_score)
            .service(api_live_undo)
            .service(api_live_redo)
            .service(api_live_finish)
            .service(api_live_cancel)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn export_filename_drops_header_breaking_characters() {
        let id = Uuid::new_v4();
        assert_eq!(export_filename("Friday Cup", id), "Friday_Cup.csv");
        assert_eq!(export_filename("Cup\r\n\"x\"", id), "Cupx.csv");
        assert_eq!(export_filename("\n\t", id), format!("{id}.csv"));
        let header = format!("attachment; filename=\"{}\"", export_filename("a\nb", id));
        assert!(actix_web::http::header::HeaderValue::from_str(&header).is_ok());
    }

    #[test]
    fn standings_carry_rank_and_goal_difference() {
        let mut a = Player::new("A");
        a.points = 1;
        a.goals_scored = 10;
        a.goals_conceded = 4;
        let b = Player::new("B");
        let rows = standings(&[b, a], RankingMode::Points);
        assert_eq!(rows[0].name, "A");
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].stats.goal_difference, 6);
        assert_eq!(rows[1].rank, 2);
    }
}
