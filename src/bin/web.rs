//! Single binary web server: JSON API over an in-memory tournament store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, INACTIVITY_HOURS (tournament eviction TTL, default 12).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tournament_maker::{
    generate_fixtures, reset_fixtures, stat_leaders, standings, standings_csv, validate_score,
    MemoryStore, Sport, StatCategory, Tournament, TournamentError, TournamentId, TournamentStore,
    TournamentType,
};

type AppState = Data<MemoryStore>;

/// Server settings from the environment.
struct Config {
    host: String,
    port: u16,
    inactivity_timeout: Duration,
}

impl Config {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let hours: u64 = std::env::var("INACTIVITY_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(12);
        Self {
            host,
            port,
            inactivity_timeout: inactivity_timeout(hours),
        }
    }
}

fn inactivity_timeout(hours: u64) -> Duration {
    Duration::from_secs(hours.saturating_mul(3600))
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(rename = "type", default)]
    kind: TournamentType,
    #[serde(default)]
    sport: Sport,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct SetScoreBody {
    score1: Option<i64>,
    score2: Option<i64>,
    /// When given, the update only applies if the tournament is still at this version.
    version: Option<u64>,
}

#[derive(Deserialize)]
struct IncrementStatBody {
    player: String,
    #[serde(default = "default_amount")]
    amount: u32,
}

fn default_amount() -> u32 {
    1
}

#[derive(Serialize)]
struct StatLeader {
    player: String,
    count: u32,
}

#[derive(Serialize)]
struct StatCountResponse {
    player: String,
    count: u32,
}

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TeamPath {
    id: TournamentId,
    team: String,
}

#[derive(Deserialize)]
struct PlayerPath {
    id: TournamentId,
    team: String,
    player: String,
}

#[derive(Deserialize)]
struct MatchPath {
    id: TournamentId,
    index: usize,
}

#[derive(Deserialize)]
struct StatPath {
    id: TournamentId,
    category: String,
}

fn error_response(e: TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::TournamentNotFound(_) => HttpResponse::NotFound().json(body),
        TournamentError::VersionConflict { .. } => HttpResponse::Conflict().json(body),
        TournamentError::StoreUnavailable => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn tournament_response(result: Result<Tournament, TournamentError>) -> HttpResponse {
    match result {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-maker",
    })
}

/// List tournaments (id, name, type, sport).
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    match state.list() {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => error_response(e),
    }
}

/// Create a tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let tournament = match Tournament::new(body.name.as_str(), body.kind, body.sport) {
        Ok(t) => t,
        Err(e) => return error_response(e),
    };
    tournament_response(state.create(tournament).and_then(|id| state.get(id)))
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    tournament_response(state.get(path.id))
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.delete(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(state: AppState, path: Path<TournamentPath>, body: Json<NameBody>) -> HttpResponse {
    tournament_response(state.update(path.id, None, &mut |t| t.add_team(body.name.as_str())))
}

#[delete("/api/tournaments/{id}/teams/{team}")]
async fn api_remove_team(state: AppState, path: Path<TeamPath>) -> HttpResponse {
    tournament_response(state.update(path.id, None, &mut |t| t.remove_team(&path.team)))
}

#[post("/api/tournaments/{id}/teams/{team}/players")]
async fn api_add_player(state: AppState, path: Path<TeamPath>, body: Json<NameBody>) -> HttpResponse {
    tournament_response(state.update(path.id, None, &mut |t| {
        t.add_player(&path.team, body.name.as_str())
    }))
}

#[delete("/api/tournaments/{id}/teams/{team}/players/{player}")]
async fn api_remove_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    tournament_response(state.update(path.id, None, &mut |t| {
        t.remove_player(&path.team, &path.player)
    }))
}

/// Generate fixtures for the tournament's type (only while none exist).
#[post("/api/tournaments/{id}/fixtures/generate")]
async fn api_generate_fixtures(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut rng = rand::thread_rng();
    tournament_response(state.update(path.id, None, &mut |t| generate_fixtures(t, &mut rng)))
}

/// Drop all fixtures and scores.
#[post("/api/tournaments/{id}/fixtures/reset")]
async fn api_reset_fixtures(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    tournament_response(state.update(path.id, None, &mut |t| {
        reset_fixtures(t);
        Ok(())
    }))
}

/// Set or clear one match's scores.
#[put("/api/tournaments/{id}/matches/{index}/score")]
async fn api_set_score(state: AppState, path: Path<MatchPath>, body: Json<SetScoreBody>) -> HttpResponse {
    let parse = |v: Option<i64>| v.map(validate_score).transpose();
    let (score1, score2) = match (parse(body.score1), parse(body.score2)) {
        (Ok(s1), Ok(s2)) => (s1, s2),
        (Err(e), _) | (_, Err(e)) => return error_response(e),
    };
    let result = match body.version {
        Some(version) => state.update(path.id, Some(version), &mut |t| {
            tournament_maker::set_score(t, path.index, score1, score2)
        }),
        None => state.set_score(path.id, path.index, score1, score2),
    };
    tournament_response(result)
}

/// Increment a player's counter in a stat category (amount defaults to 1).
#[post("/api/tournaments/{id}/stats/{category}")]
async fn api_increment_stat(
    state: AppState,
    path: Path<StatPath>,
    body: Json<IncrementStatBody>,
) -> HttpResponse {
    let category: StatCategory = match path.category.parse() {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };
    match state.increment_stat(path.id, category, &body.player, body.amount) {
        Ok(count) => HttpResponse::Ok().json(StatCountResponse {
            player: body.player.trim().to_string(),
            count,
        }),
        Err(e) => error_response(e),
    }
}

/// Leaderboard for one stat category.
#[get("/api/tournaments/{id}/stats/{category}")]
async fn api_stat_leaders(state: AppState, path: Path<StatPath>) -> HttpResponse {
    let category: StatCategory = match path.category.parse() {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };
    let t = match state.get(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(e),
    };
    let leaders: Vec<StatLeader> = stat_leaders(&t, category)
        .into_iter()
        .map(|(player, count)| StatLeader { player, count })
        .collect();
    HttpResponse::Ok().json(leaders)
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.get(path.id) {
        Ok(t) => HttpResponse::Ok().json(standings(&t)),
        Err(e) => error_response(e),
    }
}

/// Standings as a CSV download.
#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let t = match state.get(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(e),
    };
    match standings_csv(&standings(&t)) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}_standings.csv\"", t.name.replace('"', "")),
            ))
            .body(csv),
        Err(e) => {
            log::error!("Failed to write standings CSV for {}: {}", t.id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": "csv error" }))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(MemoryStore::new());

    // Background task: every 30 minutes, evict tournaments past the inactivity TTL
    let state_cleanup = state.clone();
    let ttl = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            if let Err(e) = state_cleanup.evict_inactive(ttl) {
                log::warn!("Eviction sweep failed: {}", e);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_list_tournaments)
            .service(api_create_tournament)
            .service(api_standings_csv)
            .service(api_standings)
            .service(api_get_tournament)
            .service(api_delete_tournament)
            .service(api_add_team)
            .service(api_remove_team)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_generate_fixtures)
            .service(api_reset_fixtures)
            .service(api_set_score)
            .service(api_increment_stat)
            .service(api_stat_leaders)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
