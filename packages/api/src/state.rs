use std::sync::Arc;

use shared::repositories::game_repository::InMemoryGameRepository;
use shared::services::game_session_service::GameSessionService;
use shared::services::notification_service::BroadcastGameNotifier;

use crate::config::ServerConfig;
use crate::middleware::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub game_service: Arc<GameSessionService>,
    pub notifier: Arc<BroadcastGameNotifier>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Wires the in-memory repository and the broadcast hub into a fresh
    /// game service.
    pub fn new(config: &ServerConfig) -> Self {
        let repository = Arc::new(InMemoryGameRepository::new());
        let notifier = Arc::new(BroadcastGameNotifier::new(config.hub_channel_capacity));
        let game_service = Arc::new(GameSessionService::new(repository, notifier.clone()));
        let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit_window));

        AppState {
            game_service,
            notifier,
            rate_limiter,
        }
    }
}
