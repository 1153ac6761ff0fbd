//! Single binary web server: bracket API over REST plus a printable overview page.
//! Run with: cargo run --bin web
//! Settings from env: HOST (default 0.0.0.0), PORT (default 8080), DATA_FILE (default data/tournaments.json).

use actix_web::{
    delete, get, post, put,
    web::{self, Bytes, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use bracket_maker::config::ServerConfig;
use bracket_maker::logic::{default_seeds, ENTRANTS_COLUMN};
use bracket_maker::{
    add_entries, advance_round, create_tournament, export_csv, parse_csv_entrants, parse_lines,
    parse_spreadsheet_entrants, record_winner, render_printable, require_entrants, standings,
    winners, EntrantId, FileStore, MatchId, Tournament, TournamentError, TournamentId,
    TournamentRepository,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// In-memory state: every tournament plus the deleted ones. Authoritative until saved.
type AppState = Data<RwLock<TournamentRepository>>;
type Store = Data<FileStore>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct SaveResponse {
    saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    entrants: Vec<String>,
    /// Seed names in priority order. Defaults to the first four distinct entrants.
    #[serde(default)]
    seeds: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct AddEntriesBody {
    names: Vec<String>,
}

#[derive(Deserialize)]
struct SetMatchWinnerBody {
    match_id: MatchId,
    /// None clears the result.
    winner: Option<EntrantId>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "snake_case")]
enum ImportFormat {
    #[default]
    Csv,
    Lines,
    /// Raw .xlsx / .xls / .ods bytes.
    Xlsx,
}

#[derive(Deserialize)]
struct ImportQuery {
    #[serde(default)]
    format: ImportFormat,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::TournamentNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Apply `op` to one tournament and answer with the updated record (or the error, unchanged state).
fn mutate<F, T>(state: &AppState, id: TournamentId, op: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<T, TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.with_tournament(id, |t| op(&mut *t).map(|_| t.clone())) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Read-only access to one tournament.
fn view<F>(state: &AppState, id: TournamentId, render: F) -> HttpResponse
where
    F: FnOnce(&Tournament) -> HttpResponse,
{
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get(id) {
        Some(t) => render(t),
        None => error_response(&TournamentError::TournamentNotFound(id)),
    }
}

/// Save the current snapshot. The lock is released before writing; failures are warnings.
async fn persist(state: &AppState, store: &Store) -> SaveResponse {
    let snapshot = match state.read() {
        Ok(g) => g.snapshot(),
        Err(_) => {
            return SaveResponse {
                saved: false,
                warning: Some("lock error".to_string()),
            }
        }
    };
    match store.save(&snapshot).await {
        Ok(()) => SaveResponse {
            saved: true,
            warning: None,
        },
        Err(e) => {
            log::warn!("Save to {} failed: {}", store.path().display(), e);
            SaveResponse {
                saved: false,
                warning: Some(format!("Saved in memory only ({})", e)),
            }
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-maker",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// List live tournaments, newest first.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(g.all()),
        Err(_) => lock_error(),
    }
}

/// Create a tournament and its Round 1.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let seeds = body
        .seeds
        .unwrap_or_else(|| default_seeds(&body.entrants));
    let tournament = match create_tournament(&body.name, &body.entrants, &seeds, &mut rand::thread_rng()) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(tournament);
    response
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| HttpResponse::Ok().json(t))
}

/// Soft delete: move to the deleted list and save.
#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, store: Store, path: Path<TournamentPath>) -> HttpResponse {
    {
        let mut g = match state.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        if let Err(e) = g.delete(path.id) {
            return error_response(&e);
        }
    }
    HttpResponse::Ok().json(persist(&state, &store).await)
}

/// Merge late entries (bracket must still be at Round 1).
#[post("/api/tournaments/{id}/entries")]
async fn api_add_entries(state: AppState, path: Path<TournamentPath>, body: Json<AddEntriesBody>) -> HttpResponse {
    mutate(&state, path.id, |t| add_entries(t, &body.names))
}

/// Set or clear the winner of a match in the current round.
#[put("/api/tournaments/{id}/matches/winner")]
async fn api_set_match_winner(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SetMatchWinnerBody>,
) -> HttpResponse {
    mutate(&state, path.id, |t| record_winner(t, body.match_id, body.winner))
}

/// Close the current round: next round, or champion.
#[post("/api/tournaments/{id}/rounds/advance")]
async fn api_advance_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.id, advance_round)
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| HttpResponse::Ok().json(standings(t)))
}

#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| match export_csv(&standings(t)) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    })
}

/// Plain-text bracket sheet for printing.
#[get("/api/tournaments/{id}/print")]
async fn api_print(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    view(&state, path.id, |t| {
        HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(render_printable(&standings(t)))
    })
}

/// Semi finals and finals of completed tournaments.
#[get("/api/winners")]
async fn api_winners(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => {
            let list: Vec<_> = g.completed().filter_map(winners).collect();
            HttpResponse::Ok().json(list)
        }
        Err(_) => lock_error(),
    }
}

#[get("/api/deleted")]
async fn api_deleted(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(g.deleted()),
        Err(_) => lock_error(),
    }
}

/// Parse an uploaded entrants list (CSV or spreadsheet with a "Players" column, or one name per line).
#[post("/api/import")]
async fn api_import(query: Query<ImportQuery>, body: Bytes) -> HttpResponse {
    let names = match query.format {
        ImportFormat::Csv => parse_csv_entrants(&String::from_utf8_lossy(&body)),
        ImportFormat::Lines => parse_lines(&String::from_utf8_lossy(&body)),
        ImportFormat::Xlsx => parse_spreadsheet_entrants(&body),
    };
    match require_entrants(names) {
        Ok(entrants) => HttpResponse::Ok().json(serde_json::json!({ "entrants": entrants })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!("{} (expected a '{}' column)", e, ENTRANTS_COLUMN)
        })),
    }
}

#[post("/api/save")]
async fn api_save(state: AppState, store: Store) -> HttpResponse {
    HttpResponse::Ok().json(persist(&state, &store).await)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let store = FileStore::new(config.data_file.clone());
    let repo = match store.load().await {
        Ok(snapshot) => {
            log::info!(
                "Loaded {} tournament(s), {} deleted from {}",
                snapshot.tournaments.len(),
                snapshot.deleted.len(),
                store.path().display()
            );
            TournamentRepository::from_snapshot(snapshot)
        }
        Err(e) => {
            log::warn!("Could not load {}: {}; starting empty", store.path().display(), e);
            TournamentRepository::new()
        }
    };

    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(repo));
    let store = Data::new(store);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(store.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_list_tournaments)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_delete_tournament)
            .service(api_add_entries)
            .service(api_set_match_winner)
            .service(api_advance_round)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_print)
            .service(api_winners)
            .service(api_deleted)
            .service(api_import)
            .service(api_save)
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
