pub mod events;
pub mod game;
pub mod game_session;
