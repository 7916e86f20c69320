pub mod game_session_service_errors;
