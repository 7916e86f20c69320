use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

/// Builds the full router: health, game endpoints and the websocket hub,
/// behind rate limiting and CORS.
pub fn app(state: AppState) -> Router {
    // ToDo: Tighten this up
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::game::routes())
        .merge(routes::hub::routes())
        .layer(from_fn_with_state(
            state.rate_limiter.clone(),
            middleware::rate_limit::rate_limit,
        ))
        .layer(cors)
        .with_state(state)
}
