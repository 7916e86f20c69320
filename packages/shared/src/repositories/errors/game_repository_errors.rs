use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameRepositoryError {
    NotFound(Uuid),
    Storage(String),
}

impl std::fmt::Display for GameRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameRepositoryError::NotFound(game_id) => {
                write!(f, "Game with ID {} not found", game_id)
            }
            GameRepositoryError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for GameRepositoryError {}
