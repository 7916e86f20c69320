//! Shared helpers for the end-to-end tests.
//!
//! `test_server` runs the router in-process through `axum-test`;
//! `spawn_server` binds a real socket so peer addresses and websockets
//! behave as in production.

use std::net::SocketAddr;
use std::sync::Once;
use std::time::Duration;

use api::config::ServerConfig;
use api::state::AppState;
use axum_test::TestServer;
use serde_json::json;
use shared::models::game::responses::GameSnapshot;
use tokio::net::TcpListener;

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        rate_limit_window: Duration::ZERO,
        ..ServerConfig::default()
    }
}

pub fn test_server() -> (TestServer, AppState) {
    init_tracing();
    let state = AppState::new(&test_config());
    let server = TestServer::new(api::app(state.clone())).expect("Failed to start test server");
    (server, state)
}

/// Serves the app on an ephemeral port with peer addresses attached.
pub async fn spawn_server(config: ServerConfig) -> (SocketAddr, AppState) {
    init_tracing();
    let state = AppState::new(&config);
    let listener = TcpListener::bind(config.bind_address())
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    let app = api::app(state.clone()).into_make_service_with_connect_info::<SocketAddr>();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server crashed");
    });

    (addr, state)
}

pub async fn create_game(server: &TestServer, name: &str) -> GameSnapshot {
    let response = server
        .post("/api/game/create")
        .json(&json!({ "name": name }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<GameSnapshot>()
}

pub async fn join_game(server: &TestServer, game_id: &str, name: &str) -> GameSnapshot {
    let response = server
        .post(&format!("/api/game/{}/join", game_id))
        .json(&json!({ "name": name }))
        .await;
    response.assert_status_ok();
    response.json::<GameSnapshot>()
}

pub async fn make_move(
    server: &TestServer,
    game_id: &str,
    name: &str,
    player_move: &str,
) -> axum_test::TestResponse {
    server
        .post(&format!("/api/game/{}/move", game_id))
        .json(&json!({ "name": name, "move": player_move }))
        .await
}
