use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    models::{
        events::GameUpdatedEvent,
        game_session::{GameSession, GameStatus, Move, ParseMoveError, Player, TIE},
    },
    repositories::game_repository::GameRepository,
    rules::{self, Outcome},
    services::{
        errors::game_session_service_errors::{GameSessionServiceError, StateConflict},
        notification_service::GameNotifier,
    },
};

/// Drives the session state machine: create, join, submit a move, read.
///
/// Join and move submission re-read the session under a per-game lock, so
/// two players moving at once cannot overwrite each other's move.
#[derive(Clone)]
pub struct GameSessionService {
    repository: Arc<dyn GameRepository + Send + Sync>,
    notifier: Arc<dyn GameNotifier + Send + Sync>,
    session_locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl GameSessionService {
    pub fn new(
        repository: Arc<dyn GameRepository + Send + Sync>,
        notifier: Arc<dyn GameNotifier + Send + Sync>,
    ) -> Self {
        GameSessionService {
            repository,
            notifier,
            session_locks: Arc::new(DashMap::new()),
        }
    }

    pub async fn create_game(
        &self,
        player_name: &str,
    ) -> Result<GameSession, GameSessionServiceError> {
        validate_player_name(player_name)?;

        let game = GameSession::new(player_name);
        self.repository.save(&game).await?;
        self.session_locks.insert(game.id, Arc::default());
        info!(
            "Game successfully created with ID: {}, initiated by Player: {}",
            game.id, player_name
        );

        self.notify(&game).await;
        Ok(game)
    }

    pub async fn join_game(
        &self,
        game_id: Uuid,
        player_name: &str,
    ) -> Result<GameSession, GameSessionServiceError> {
        let _guard = self.lock_session(game_id).await?;
        let mut game = self.repository.get_by_id(game_id).await?;

        if game.player2.is_some() {
            return Err(GameSessionServiceError::InvalidState(StateConflict::GameFull));
        }
        validate_player_name(player_name)?;
        if game.has_participant(player_name) {
            return Err(GameSessionServiceError::InvalidState(
                StateConflict::DuplicateName(player_name.to_string()),
            ));
        }

        game.player2 = Some(Player::new(player_name));
        game.status = GameStatus::Joined;
        game.touch();

        self.repository.save(&game).await?;
        info!("Player {} joined game {}", player_name, game_id);

        self.notify(&game).await;
        Ok(game)
    }

    /// Records one player's move. The move token is checked before
    /// anything else, so a bad token never reaches the session.
    pub async fn submit_move(
        &self,
        game_id: Uuid,
        player_name: &str,
        move_token: &str,
    ) -> Result<GameSession, GameSessionServiceError> {
        let player_move: Move = move_token
            .parse()
            .map_err(|e: ParseMoveError| GameSessionServiceError::InvalidMove(e.to_string()))?;
        validate_player_name(player_name)?;

        let _guard = self.lock_session(game_id).await?;
        let mut game = self.repository.get_by_id(game_id).await?;

        let seat = game.seat_of(player_name).ok_or_else(|| {
            GameSessionServiceError::Unauthorized(format!(
                "Player {} is not part of the game",
                player_name
            ))
        })?;
        if game.status == GameStatus::Completed {
            return Err(GameSessionServiceError::InvalidState(
                StateConflict::GameCompleted,
            ));
        }

        if let Some(player) = game.player_mut(seat) {
            if player.has_moved() {
                return Err(GameSessionServiceError::InvalidState(
                    StateConflict::AlreadyMoved(player.name.clone()),
                ));
            }
            player.current_move = Some(player_move);
        }
        debug!("Player {} played {} in game {}", player_name, player_move, game_id);

        if let Some((first, second)) = game.moves() {
            let outcome = rules::resolve(first, second);
            game.winner = winner_label(&game, outcome);
            game.status = GameStatus::Completed;
            info!(
                "Game {} completed: {} vs {}, winner {:?}",
                game_id, first, second, game.winner
            );
        }
        game.touch();
        debug!("Game {} is now {:?}", game_id, game.phase());

        self.repository.save(&game).await?;
        self.notify(&game).await;
        Ok(game)
    }

    pub async fn get_game_state(
        &self,
        game_id: Uuid,
    ) -> Result<GameSession, GameSessionServiceError> {
        self.repository
            .get_by_id(game_id)
            .await
            .map_err(GameSessionServiceError::from)
    }

    pub async fn game_count(&self) -> usize {
        self.repository.count().await
    }

    /// Takes the per-game lock. Only games the repository knows about get
    /// a lock entry, so unknown ids fail fast with `NotFound`.
    async fn lock_session(
        &self,
        game_id: Uuid,
    ) -> Result<OwnedMutexGuard<()>, GameSessionServiceError> {
        let existing = self
            .session_locks
            .get(&game_id)
            .map(|lock| Arc::clone(lock.value()));

        let lock = match existing {
            Some(lock) => lock,
            None => {
                self.repository.get_by_id(game_id).await?;
                Arc::clone(self.session_locks.entry(game_id).or_default().value())
            }
        };
        Ok(lock.lock_owned().await)
    }

    /// Persistence has already happened; a failed delivery is only logged.
    async fn notify(&self, game: &GameSession) {
        match self
            .notifier
            .notify_game_updated(GameUpdatedEvent::new(game))
            .await
        {
            Ok(delivered) => debug!("Game {} update sent to {} subscribers", game.id, delivered),
            Err(e) => warn!("Failed to notify subscribers of game {}: {}", game.id, e),
        }
    }
}

fn validate_player_name(player_name: &str) -> Result<(), GameSessionServiceError> {
    if player_name.trim().is_empty() {
        return Err(GameSessionServiceError::InvalidArgument(
            "Player name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn winner_label(game: &GameSession, outcome: Outcome) -> Option<String> {
    match outcome {
        Outcome::Tie => Some(TIE.to_string()),
        Outcome::Player1Wins => game.player1.as_ref().map(|p| p.name.clone()),
        Outcome::Player2Wins => game.player2.as_ref().map(|p| p.name.clone()),
    }
}
