use anyhow::Result;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};

use pickset::app::pick_use_case::{PickSession, ScreenState};
use pickset::app::ports::{CatalogProvider, SubmissionSink};
use pickset::config::{Config, Preset};
use pickset::infra::HttpApi;
use pickset::storage::{HistoryStore, SessionStore};
use pickset::{Movie, PicksError, Player, SubmissionPayload};
use tempfile::tempdir;

#[derive(Clone, Default)]
struct Stub {
    received: Arc<Mutex<Vec<Value>>>,
    auth_headers: Arc<Mutex<Vec<String>>>,
    fail_submissions: bool,
}

async fn movies() -> Json<Value> {
    Json(json!([
        { "title": "Inception", "year": "2010", "genre": "Sci-Fi", "poster": "inception.jpg" },
        { "title": "The Matrix", "year": "1999", "genre": "Action", "poster": "matrix.jpg" },
        { "title": "Interstellar", "year": "2014", "genre": "Sci-Fi", "poster": "interstellar.jpg" }
    ]))
}

async fn players(headers: HeaderMap, body: String) -> (StatusCode, Json<Value>) {
    if !body.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "unexpected body" })));
    }
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "Bearer secret-token")
        .unwrap_or(false);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "missing token" })));
    }
    (
        StatusCode::OK,
        Json(json!([
            { "name": "Geno Smith", "position": "QB", "team": "SEA", "image_url": "geno.png" },
            { "name": "Kenneth Walker", "position": "RB", "team": "SEA" },
            { "name": "DK Metcalf", "position": "WR", "team": "SEA" }
        ])),
    )
}

async fn selections(State(stub): State<Stub>, headers: HeaderMap, Json(body): Json<Value>) -> StatusCode {
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        stub.auth_headers.lock().unwrap().push(auth.to_string());
    }
    if stub.fail_submissions {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    stub.received.lock().unwrap().push(body);
    StatusCode::CREATED
}

fn spawn_stub(stub: Stub) -> Result<SocketAddr> {
    let app = Router::new()
        .route("/api/movies", get(movies))
        .route("/api/generate/nfl-players", post(players))
        .route("/api/selections", post(selections))
        .with_state(stub);

    let listener = TcpListener::bind("127.0.0.1:0")?;
    listener.set_nonblocking(true)?;
    let addr = listener.local_addr()?;
    let server = axum::Server::from_tcp(listener)?.serve(app.into_make_service());
    tokio::spawn(server);
    Ok(addr)
}

fn config_for(addr: SocketAddr, preset: Preset) -> Config {
    let mut config = Config::default();
    config.api.base_url = format!("http://{}", addr);
    config.app.preset = preset.name().to_string();
    config
}

#[tokio::test]
async fn test_flick_pick_round_trip_against_stub_api() -> Result<()> {
    let stub = Stub::default();
    let addr = spawn_stub(stub.clone())?;
    let config = config_for(addr, Preset::FlickPick);
    let profile = config.app_profile()?;
    let api = HttpApi::from_config(&config, &profile)?.with_token(Some("secret-token".into()));

    let mut session = PickSession::<Movie>::new(profile.preset.name(), profile.categories.clone());
    session.load(&api).await?;
    assert_eq!(session.tracker().unwrap().catalog().len(), 3);

    session.toggle_by_key("Interstellar", "skip")?;
    session.toggle_by_key("Inception", "stream")?;
    session.toggle_by_key("The Matrix", "own")?;
    let receipt = session.submit(&api).await?;

    let received = stub.received.lock().unwrap().clone();
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0],
        json!([
            { "item": "Inception", "category": "stream" },
            { "item": "The Matrix", "category": "own" },
            { "item": "Interstellar", "category": "skip" }
        ])
    );
    assert_eq!(stub.auth_headers.lock().unwrap()[0], "Bearer secret-token");
    assert_eq!(receipt.selections.len(), 3);
    assert!(session.tracker().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_player_catalog_requires_token() -> Result<()> {
    let addr = spawn_stub(Stub::default())?;
    let config = config_for(addr, Preset::StartBenchCut);
    let profile = config.app_profile()?;

    let anonymous = HttpApi::from_config(&config, &profile)?;
    let mut session = PickSession::<Player>::new(profile.preset.name(), profile.categories.clone());
    let err = session.load(&anonymous).await.unwrap_err();
    assert!(matches!(err, PicksError::Api { status: 401, .. }));
    assert!(matches!(session.state(), ScreenState::Failed { .. }));

    // Token comes from an explicitly opened session store
    let dir = tempdir()?;
    let mut store = SessionStore::open(dir.path().join("session.json"))?;
    store.set_token("secret-token")?;
    let authed = HttpApi::from_config(&config, &profile)?.with_token(store.token().map(str::to_string));

    session.load(&authed).await?;
    let tracker = session.tracker().unwrap();
    assert_eq!(tracker.catalog().key(tracker.catalog().resolve_item("1")?), "Geno Smith");
    Ok(())
}

#[tokio::test]
async fn test_failed_submission_keeps_picks_for_retry() -> Result<()> {
    let stub = Stub {
        fail_submissions: true,
        ..Default::default()
    };
    let addr = spawn_stub(stub.clone())?;
    let config = config_for(addr, Preset::FlickPick);
    let profile = config.app_profile()?;
    let api = HttpApi::from_config(&config, &profile)?;

    let mut session = PickSession::<Movie>::new(profile.preset.name(), profile.categories.clone());
    session.load(&api).await?;
    for (item, category) in [("1", "own"), ("2", "stream"), ("3", "skip")] {
        session.toggle_by_key(item, category)?;
    }

    let err = session.submit(&api).await.unwrap_err();
    assert!(matches!(err, PicksError::Api { status: 500, .. }));
    assert!(session.can_submit());
    assert!(stub.received.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unreachable_api_reports_http_error() -> Result<()> {
    // Bind and drop to get a port nothing listens on
    let addr = TcpListener::bind("127.0.0.1:0")?.local_addr()?;
    let config = config_for(addr, Preset::FlickPick);
    let profile = config.app_profile()?;
    let api = HttpApi::from_config(&config, &profile)?;

    let catalog: pickset::Result<Vec<Movie>> = CatalogProvider::<Movie>::fetch_catalog(&api).await;
    assert!(matches!(catalog, Err(PicksError::Http(_))));

    let submitted = api.submit(&SubmissionPayload::default()).await;
    assert!(matches!(submitted, Err(PicksError::Http(_))));
    Ok(())
}

#[tokio::test]
async fn test_receipts_land_in_history() -> Result<()> {
    let addr = spawn_stub(Stub::default())?;
    let config = config_for(addr, Preset::FlickPick);
    let profile = config.app_profile()?;
    let api = HttpApi::from_config(&config, &profile)?;
    let dir = tempdir()?;
    let mut history = HistoryStore::open(dir.path().join("history.json"))?;

    let mut session = PickSession::<Movie>::new(profile.preset.name(), profile.categories.clone());
    session.load(&api).await?;
    for round in 0..2 {
        let (first, second) = if round == 0 { ("own", "stream") } else { ("stream", "own") };
        session.toggle_by_key("Inception", first)?;
        session.toggle_by_key("The Matrix", second)?;
        session.toggle_by_key("Interstellar", "skip")?;
        history.record(session.submit(&api).await?)?;
    }

    let recent = history.recent(5, Some("flick-pick"));
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].selections[0].category, "stream");
    Ok(())
}
