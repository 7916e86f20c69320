use axum::http::StatusCode;
use rps_tests::{create_game, test_server};
use serde_json::Value;

#[tokio::test]
async fn test_health_endpoint() {
    let (server, _) = test_server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["status"], "Healthy!");
    assert_eq!(body["games"], 0);
}

#[tokio::test]
async fn test_health_reports_game_count() {
    let (server, _) = test_server();
    create_game(&server, "Alice").await;
    create_game(&server, "Carol").await;

    let body = server.get("/health").await.json::<Value>();

    assert_eq!(body["games"], 2);
}
