pub mod models;
pub mod repositories;
pub mod rules;
pub mod services;

pub use models::game_session::{GamePhase, GameSession, GameStatus, Move, Player};
pub use repositories::game_repository::{GameRepository, InMemoryGameRepository};
pub use services::game_session_service::GameSessionService;
pub use services::notification_service::{BroadcastGameNotifier, GameNotifier};
