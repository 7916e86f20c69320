use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Label stored as the winner when both players pick the same move.
pub const TIE: &str = "Tie";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    pub fn label(&self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMoveError {
    pub input: String,
}

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid move '{}'. Must be 'Rock', 'Paper' or 'Scissors'",
            self.input
        )
    }
}

impl std::error::Error for ParseMoveError {}

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Matches a move label ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Move::ALL
            .into_iter()
            .find(|candidate| candidate.label().eq_ignore_ascii_case(token))
            .ok_or_else(|| ParseMoveError {
                input: s.to_string(),
            })
    }
}

/// Stored lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Created,
    Joined,
    Completed,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Created => "Created",
            GameStatus::Joined => "Joined",
            GameStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived view of where a session is in its round. Never persisted;
/// `InProgress` only exists while at least one move is in and the
/// round is not yet resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Created,
    Joined,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub current_move: Option<Move>,
}

impl Player {
    pub fn new(name: &str) -> Self {
        Player {
            name: name.to_string(),
            current_move: None,
        }
    }

    /// Case-insensitive name comparison used for lookups and uniqueness.
    pub fn has_name(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }

    pub fn has_moved(&self) -> bool {
        self.current_move.is_some()
    }
}

pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Which of the two player slots a participant occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Player1,
    Player2,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub id: Uuid,
    pub player1: Option<Player>,
    pub player2: Option<Player>,
    pub status: GameStatus,
    pub winner: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GameSession {
    pub fn new(player_name: &str) -> Self {
        let now = Utc::now();
        GameSession {
            id: Uuid::new_v4(),
            player1: Some(Player::new(player_name)),
            player2: None,
            status: GameStatus::Created,
            winner: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_full(&self) -> bool {
        self.player1.is_some() && self.player2.is_some()
    }

    pub fn has_participant(&self, name: &str) -> bool {
        self.seat_of(name).is_some()
    }

    /// Resolves which slot `name` sits in, player1 first.
    pub fn seat_of(&self, name: &str) -> Option<Seat> {
        if self.player1.as_ref().is_some_and(|p| p.has_name(name)) {
            Some(Seat::Player1)
        } else if self.player2.as_ref().is_some_and(|p| p.has_name(name)) {
            Some(Seat::Player2)
        } else {
            None
        }
    }

    pub fn player_mut(&mut self, seat: Seat) -> Option<&mut Player> {
        match seat {
            Seat::Player1 => self.player1.as_mut(),
            Seat::Player2 => self.player2.as_mut(),
        }
    }

    /// Both submitted moves, once each player has one.
    pub fn moves(&self) -> Option<(Move, Move)> {
        let first = self.player1.as_ref()?.current_move?;
        let second = self.player2.as_ref()?.current_move?;
        Some((first, second))
    }

    pub fn phase(&self) -> GamePhase {
        let any_moved = [self.player1.as_ref(), self.player2.as_ref()]
            .into_iter()
            .flatten()
            .any(Player::has_moved);

        match self.status {
            GameStatus::Completed => GamePhase::Completed,
            _ if any_moved => GamePhase::InProgress,
            GameStatus::Joined => GamePhase::Joined,
            GameStatus::Created => GamePhase::Created,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
