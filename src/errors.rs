//! Error types for the game day runner

use std::fmt;

pub type Result<T> = std::result::Result<T, GameDayError>;

#[derive(Debug)]
pub enum GameDayError {
    /// IO operation failed
    Io(std::io::Error),

    /// HTTP client could not be built
    Http(reqwest::Error),

    /// JSON serialization/deserialization failed
    Json(serde_json::Error),

    /// Configuration error
    Config(String),

    /// Service name missing from the endpoint registry
    UnknownService(String),
}

impl fmt::Display for GameDayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameDayError::Io(err) => write!(f, "IO error: {}", err),
            GameDayError::Http(err) => write!(f, "HTTP error: {}", err),
            GameDayError::Json(err) => write!(f, "JSON error: {}", err),
            GameDayError::Config(msg) => write!(f, "Configuration error: {}", msg),
            GameDayError::UnknownService(name) => write!(f, "Unknown service: {}", name),
        }
    }
}

impl std::error::Error for GameDayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameDayError::Io(err) => Some(err),
            GameDayError::Http(err) => Some(err),
            GameDayError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameDayError {
    fn from(err: std::io::Error) -> Self {
        GameDayError::Io(err)
    }
}

impl From<reqwest::Error> for GameDayError {
    fn from(err: reqwest::Error) -> Self {
        GameDayError::Http(err)
    }
}

impl From<serde_json::Error> for GameDayError {
    fn from(err: serde_json::Error) -> Self {
        GameDayError::Json(err)
    }
}
