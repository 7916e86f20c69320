use crate::models::game_session::GameSession;
use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Inserts the session, or overwrites the stored copy with the same id.
    async fn save(&self, game: &GameSession) -> Result<(), GameRepositoryError>;

    async fn get_by_id(&self, game_id: Uuid) -> Result<GameSession, GameRepositoryError>;

    async fn count(&self) -> usize;
}

/// Volatile session store. Distinct ids live in different shards of the
/// map; writers to the same id are serialized by the shard lock.
#[derive(Default)]
pub struct InMemoryGameRepository {
    games: DashMap<Uuid, GameSession>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn save(&self, game: &GameSession) -> Result<(), GameRepositoryError> {
        match self.games.insert(game.id, game.clone()) {
            None => info!("Game successfully saved with ID: {}", game.id),
            Some(_) => debug!("Game with ID: {} already exists, overwriting", game.id),
        }
        debug!("Games in repository: {}", self.games.len());
        Ok(())
    }

    async fn get_by_id(&self, game_id: Uuid) -> Result<GameSession, GameRepositoryError> {
        match self.games.get(&game_id) {
            Some(entry) => Ok(entry.value().clone()),
            None => {
                warn!("Game not found with ID: {}", game_id);
                Err(GameRepositoryError::NotFound(game_id))
            }
        }
    }

    async fn count(&self) -> usize {
        self.games.len()
    }
}
