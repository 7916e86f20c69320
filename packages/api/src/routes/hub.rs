use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
    routing::get,
    Router,
};
use chrono::Utc;
use futures::{SinkExt, StreamExt};
use tokio::sync::{broadcast::error::RecvError, mpsc};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};
use shared::models::events::{ClientAction, HubMessage};
use shared::services::notification_service::BroadcastGameNotifier;

const REPLY_BUFFER: usize = 16;

pub fn routes() -> Router<AppState> {
    Router::new().route("/gamehub/{game_id}", get(game_hub))
}

/// Upgrades to a websocket that follows one game. Unknown games are
/// rejected before the upgrade.
async fn game_hub(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    state.game_service.get_game_state(game_id).await?;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, game_id, state)))
}

async fn handle_socket(socket: WebSocket, game_id: Uuid, state: AppState) {
    let mut updates = state.notifier.subscribe(game_id);
    info!("Hub connection established for game {}", game_id);

    state.notifier.publish(
        game_id,
        HubMessage::PlayerJoined {
            game_id,
            message: format!("A new connection has joined the game {}", game_id),
        },
    );

    let (mut sender, mut receiver) = socket.split();
    let (reply_tx, mut reply_rx) = mpsc::channel::<HubMessage>(REPLY_BUFFER);

    let mut send_task = tokio::spawn(async move {
        loop {
            let message = tokio::select! {
                update = updates.recv() => match update {
                    Ok(message) => message,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Hub subscriber for game {} skipped {} updates", game_id, skipped);
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                },
                reply = reply_rx.recv() => match reply {
                    Some(message) => message,
                    None => break,
                },
            };

            let text = match serde_json::to_string(&message) {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to serialize hub message: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                debug!("Hub client for game {} went away", game_id);
                break;
            }
        }
    });

    let notifier = state.notifier.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            match message {
                Message::Text(text) => {
                    if let Some(reply) = handle_client_message(&notifier, game_id, text.as_str()) {
                        if reply_tx.send(reply).await.is_err() {
                            break;
                        }
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
            let _ = recv_task.await;
        }
        _ = &mut recv_task => {
            send_task.abort();
            let _ = send_task.await;
        }
    }

    info!("Hub connection for game {} closed", game_id);
    state.notifier.release(game_id);
}

/// Handles one client message. Relayed notifications go to every
/// subscriber of the game; the return value is a reply for the sender only.
pub fn handle_client_message(
    notifier: &BroadcastGameNotifier,
    game_id: Uuid,
    text: &str,
) -> Option<HubMessage> {
    match serde_json::from_str::<ClientAction>(text) {
        Ok(ClientAction::Ping) => Some(HubMessage::Pong {
            timestamp: Utc::now(),
        }),
        Ok(ClientAction::NotifyMove {
            player_name,
            player_move,
        }) => {
            notifier.publish(
                game_id,
                HubMessage::MoveMade {
                    game_id,
                    player_name,
                    player_move,
                },
            );
            None
        }
        Ok(ClientAction::NotifyGameEnd { winner }) => {
            notifier.publish(
                game_id,
                HubMessage::GameEnded {
                    game_id,
                    message: format!("The winner is {}", winner),
                },
            );
            None
        }
        Err(e) => {
            warn!("Unrecognised hub message for game {}: {}", game_id, e);
            Some(HubMessage::Error {
                message: "Unknown or malformed action".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_gets_direct_pong() {
        let notifier = BroadcastGameNotifier::default();

        let reply = handle_client_message(&notifier, Uuid::new_v4(), r#"{"action":"ping"}"#);

        assert!(matches!(reply, Some(HubMessage::Pong { .. })));
    }

    #[tokio::test]
    async fn test_move_notification_is_relayed_to_group() {
        let notifier = BroadcastGameNotifier::default();
        let game_id = Uuid::new_v4();
        let mut group = notifier.subscribe(game_id);

        let reply = handle_client_message(
            &notifier,
            game_id,
            r#"{"action":"notify_move","playerName":"Alice","move":"Rock"}"#,
        );

        assert!(reply.is_none());
        assert_eq!(
            group.recv().await.unwrap(),
            HubMessage::MoveMade {
                game_id,
                player_name: "Alice".to_string(),
                player_move: "Rock".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_game_end_notification_names_winner() {
        let notifier = BroadcastGameNotifier::default();
        let game_id = Uuid::new_v4();
        let mut group = notifier.subscribe(game_id);

        handle_client_message(
            &notifier,
            game_id,
            r#"{"action":"notify_game_end","winner":"Bob"}"#,
        );

        match group.recv().await.unwrap() {
            HubMessage::GameEnded { message, .. } => assert_eq!(message, "The winner is Bob"),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_garbage_gets_error_reply() {
        let notifier = BroadcastGameNotifier::default();

        let reply = handle_client_message(&notifier, Uuid::new_v4(), "not json");

        assert_eq!(
            reply,
            Some(HubMessage::Error {
                message: "Unknown or malformed action".to_string()
            })
        );
    }
}
