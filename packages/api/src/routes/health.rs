use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check endpoint to verify API status
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let games = state.game_service.game_count().await;
    (StatusCode::OK, Json(json!({ "status": "Healthy!", "games": games })))
}
