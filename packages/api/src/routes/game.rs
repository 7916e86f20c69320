use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::info;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};
use shared::models::game::{
    requests::{MoveRequest, PlayerRequest},
    responses::GameSnapshot,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/game/create", post(create_game))
        .route("/api/game/{game_id}/join", post(join_game))
        .route("/api/game/{game_id}/move", post(make_move))
        .route("/api/game/{game_id}", get(get_game_state))
}

async fn create_game(
    State(state): State<AppState>,
    Json(payload): Json<PlayerRequest>,
) -> Result<(StatusCode, Json<GameSnapshot>), ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let game = state.game_service.create_game(&payload.name).await?;
    info!("Created game {} for {}", game.id, payload.name);

    Ok((StatusCode::CREATED, Json(GameSnapshot::from(&game))))
}

async fn join_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(payload): Json<PlayerRequest>,
) -> Result<Json<GameSnapshot>, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let game = state.game_service.join_game(game_id, &payload.name).await?;
    Ok(Json(GameSnapshot::from(&game)))
}

async fn make_move(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(payload): Json<MoveRequest>,
) -> Result<Json<GameSnapshot>, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let game = state
        .game_service
        .submit_move(game_id, &payload.name, &payload.player_move)
        .await?;
    Ok(Json(GameSnapshot::from(&game)))
}

async fn get_game_state(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let game = state.game_service.get_game_state(game_id).await?;
    Ok(Json(GameSnapshot::from(&game)))
}
