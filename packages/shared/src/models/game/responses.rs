use serde::{Deserialize, Serialize};

use crate::models::game_session::{GameSession, Player};

/// Presentation snapshot of a session, sent to HTTP callers and
/// websocket subscribers alike.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameSnapshot {
    pub id: String,
    pub status: String,
    pub player1: Option<PlayerSnapshot>,
    pub player2: Option<PlayerSnapshot>,
    pub winner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerSnapshot {
    pub name: String,
    #[serde(rename = "move")]
    pub player_move: Option<String>,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        PlayerSnapshot {
            name: player.name.clone(),
            player_move: player.current_move.map(|m| m.label().to_string()),
        }
    }
}

impl From<&GameSession> for GameSnapshot {
    fn from(session: &GameSession) -> Self {
        GameSnapshot {
            id: session.id.to_string(),
            status: session.status.as_str().to_string(),
            player1: session.player1.as_ref().map(PlayerSnapshot::from),
            player2: session.player2.as_ref().map(PlayerSnapshot::from),
            winner: session.winner.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
