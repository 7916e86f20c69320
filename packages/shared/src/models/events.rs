use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::game::responses::GameSnapshot;
use crate::models::game_session::GameSession;

/// Emitted after every state-changing operation on a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameUpdatedEvent {
    pub game_id: Uuid,
    pub game_state: GameSnapshot,
    pub timestamp: DateTime<Utc>,
}

impl GameUpdatedEvent {
    pub fn new(session: &GameSession) -> Self {
        GameUpdatedEvent {
            game_id: session.id,
            game_state: GameSnapshot::from(session),
            timestamp: Utc::now(),
        }
    }
}

/// Server to client messages on the game hub, tagged by `event`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all_fields = "camelCase")]
pub enum HubMessage {
    ReceiveGameUpdate {
        game_id: Uuid,
        game: GameSnapshot,
        timestamp: DateTime<Utc>,
    },
    PlayerJoined {
        game_id: Uuid,
        message: String,
    },
    MoveMade {
        game_id: Uuid,
        player_name: String,
        #[serde(rename = "move")]
        player_move: String,
    },
    GameEnded {
        game_id: Uuid,
        message: String,
    },
    Pong {
        timestamp: DateTime<Utc>,
    },
    Error {
        message: String,
    },
}

impl From<GameUpdatedEvent> for HubMessage {
    fn from(event: GameUpdatedEvent) -> Self {
        HubMessage::ReceiveGameUpdate {
            game_id: event.game_id,
            game: event.game_state,
            timestamp: event.timestamp,
        }
    }
}

/// Client to server messages on the game hub, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "action",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum ClientAction {
    Ping,
    NotifyMove {
        player_name: String,
        #[serde(rename = "move")]
        player_move: String,
    },
    NotifyGameEnd {
        winner: String,
    },
}
