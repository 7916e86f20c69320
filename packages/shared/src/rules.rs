//! Round resolution for rock/paper/scissors.

use crate::models::game_session::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Player1Wins,
    Player2Wins,
    Tie,
}

impl Outcome {
    /// The same round seen from the other seat.
    pub fn swapped(self) -> Self {
        match self {
            Outcome::Player1Wins => Outcome::Player2Wins,
            Outcome::Player2Wins => Outcome::Player1Wins,
            Outcome::Tie => Outcome::Tie,
        }
    }
}

/// Rock beats Scissors, Scissors beats Paper, Paper beats Rock.
pub fn beats(attacker: Move, defender: Move) -> bool {
    matches!(
        (attacker, defender),
        (Move::Rock, Move::Scissors) | (Move::Scissors, Move::Paper) | (Move::Paper, Move::Rock)
    )
}

pub fn resolve(player1: Move, player2: Move) -> Outcome {
    if player1 == player2 {
        Outcome::Tie
    } else if beats(player1, player2) {
        Outcome::Player1Wins
    } else {
        Outcome::Player2Wins
    }
}
