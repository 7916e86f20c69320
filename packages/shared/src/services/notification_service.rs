use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::events::{GameUpdatedEvent, HubMessage};
use crate::services::errors::game_session_service_errors::NotifierError;

#[cfg(test)]
use mockall::automock;

pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Receives a snapshot after every state change of a game and fans it
/// out to whoever follows that game.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GameNotifier: Send + Sync {
    /// Returns how many subscribers the update reached.
    async fn notify_game_updated(&self, event: GameUpdatedEvent) -> Result<usize, NotifierError>;
}

/// One broadcast channel per game id. Subscribers that fall more than
/// `capacity` messages behind skip the oldest ones.
pub struct BroadcastGameNotifier {
    channels: DashMap<Uuid, broadcast::Sender<HubMessage>>,
    capacity: usize,
}

impl Default for BroadcastGameNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl BroadcastGameNotifier {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn subscribe(&self, game_id: Uuid) -> broadcast::Receiver<HubMessage> {
        let receiver = self
            .channels
            .entry(game_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe();
        info!(
            "New subscriber for game {} ({} total)",
            game_id,
            self.subscriber_count(game_id)
        );
        receiver
    }

    /// Sends to every current subscriber of the game. A game nobody
    /// follows is not an error.
    pub fn publish(&self, game_id: Uuid, message: HubMessage) -> usize {
        let Some(sender) = self.channels.get(&game_id).map(|s| s.value().clone()) else {
            debug!("No subscribers for game {}, dropping message", game_id);
            return 0;
        };
        sender.send(message).unwrap_or(0)
    }

    pub fn subscriber_count(&self, game_id: Uuid) -> usize {
        self.channels
            .get(&game_id)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    /// Drops the channel of a game once its last subscriber is gone.
    pub fn release(&self, game_id: Uuid) {
        if self
            .channels
            .remove_if(&game_id, |_, sender| sender.receiver_count() == 0)
            .is_some()
        {
            debug!("Released channel for game {}", game_id);
        }
    }
}

#[async_trait]
impl GameNotifier for BroadcastGameNotifier {
    async fn notify_game_updated(&self, event: GameUpdatedEvent) -> Result<usize, NotifierError> {
        let game_id = event.game_id;
        let delivered = self.publish(game_id, HubMessage::from(event));
        debug!("Game {} update delivered to {} subscribers", game_id, delivered);
        Ok(delivered)
    }
}
