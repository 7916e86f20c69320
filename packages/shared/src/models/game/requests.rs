use serde::{Deserialize, Serialize};

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 50;

/// Body of the create and join endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerRequest {
    #[serde(default)]
    pub name: String,
}

impl PlayerRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)
    }
}

/// Body of the move endpoint. `move` is a free-form token matched
/// case-insensitively against the move labels by the game service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveRequest {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "move", default)]
    pub player_move: String,
}

impl MoveRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        if self.player_move.trim().is_empty() {
            return Err("Move is required.".to_string());
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Player name is required.".to_string());
    }
    let length = name.chars().count();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
        return Err(format!(
            "Player name must be between {} and {} characters.",
            MIN_NAME_LENGTH, MAX_NAME_LENGTH
        ));
    }
    Ok(())
}
