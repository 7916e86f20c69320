use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::models::game::responses::ErrorResponse;
use shared::services::errors::game_session_service_errors::GameSessionServiceError;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    GameSessionService(GameSessionServiceError),
    Validation(String),
}

impl From<GameSessionServiceError> for ApiError {
    fn from(error: GameSessionServiceError) -> Self {
        ApiError::GameSessionService(error)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::GameSessionService(
                GameSessionServiceError::InvalidArgument(_) | GameSessionServiceError::InvalidMove(_),
            ) => StatusCode::BAD_REQUEST,
            ApiError::GameSessionService(GameSessionServiceError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            ApiError::GameSessionService(GameSessionServiceError::Unauthorized(_)) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::GameSessionService(GameSessionServiceError::InvalidState(_)) => {
                StatusCode::CONFLICT
            }
            ApiError::GameSessionService(GameSessionServiceError::RepositoryError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::GameSessionService(err) => err.to_string(),
            ApiError::Validation(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {:?}", self);
        }

        let body = ErrorResponse {
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}
