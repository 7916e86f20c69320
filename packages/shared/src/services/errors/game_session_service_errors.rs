use uuid::Uuid;

use crate::repositories::errors::game_repository_errors::GameRepositoryError;

/// Illegal transitions of the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateConflict {
    GameFull,
    DuplicateName(String),
    AlreadyMoved(String),
    GameCompleted,
}

impl std::fmt::Display for StateConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateConflict::GameFull => write!(f, "Game is already full"),
            StateConflict::DuplicateName(name) => write!(
                f,
                "A player named '{}' has already joined the game. Please use a unique name.",
                name
            ),
            StateConflict::AlreadyMoved(name) => {
                write!(f, "Player {} has already made a move", name)
            }
            StateConflict::GameCompleted => write!(f, "Game is already completed"),
        }
    }
}

#[derive(Debug)]
pub enum GameSessionServiceError {
    InvalidArgument(String),
    InvalidMove(String),
    NotFound(Uuid),
    Unauthorized(String),
    InvalidState(StateConflict),
    RepositoryError(GameRepositoryError),
}

impl std::fmt::Display for GameSessionServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameSessionServiceError::InvalidArgument(msg) => write!(f, "{}", msg),
            GameSessionServiceError::InvalidMove(msg) => write!(f, "{}", msg),
            GameSessionServiceError::NotFound(game_id) => {
                write!(f, "Game with ID {} not found", game_id)
            }
            GameSessionServiceError::Unauthorized(msg) => write!(f, "{}", msg),
            GameSessionServiceError::InvalidState(conflict) => write!(f, "{}", conflict),
            GameSessionServiceError::RepositoryError(err) => {
                write!(f, "Repository error: {}", err)
            }
        }
    }
}

impl std::error::Error for GameSessionServiceError {}

impl From<GameRepositoryError> for GameSessionServiceError {
    fn from(err: GameRepositoryError) -> Self {
        match err {
            GameRepositoryError::NotFound(game_id) => GameSessionServiceError::NotFound(game_id),
            other => GameSessionServiceError::RepositoryError(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierError {
    Delivery(String),
}

impl std::fmt::Display for NotifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifierError::Delivery(msg) => write!(f, "Delivery error: {}", msg),
        }
    }
}

impl std::error::Error for NotifierError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_not_found_maps_to_not_found() {
        let game_id = Uuid::new_v4();
        let err = GameSessionServiceError::from(GameRepositoryError::NotFound(game_id));

        assert!(matches!(err, GameSessionServiceError::NotFound(id) if id == game_id));
    }

    #[test]
    fn test_storage_failure_maps_to_repository_error() {
        let err = GameSessionServiceError::from(GameRepositoryError::Storage("disk".to_string()));

        assert!(matches!(err, GameSessionServiceError::RepositoryError(_)));
        assert_eq!(err.to_string(), "Repository error: Storage error: disk");
    }

    #[test]
    fn test_state_conflict_messages() {
        let full = GameSessionServiceError::InvalidState(StateConflict::GameFull);
        assert_eq!(full.to_string(), "Game is already full");

        let moved =
            GameSessionServiceError::InvalidState(StateConflict::AlreadyMoved("Bob".to_string()));
        assert_eq!(moved.to_string(), "Player Bob has already made a move");
    }
}
