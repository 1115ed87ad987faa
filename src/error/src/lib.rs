//! Game error handling.
//!
//! Every failure the session can hit is folded into [`GameError`]. None of them
//! are fatal: the controller reports the message and keeps running with the
//! previous in-memory state.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the player while the game is running
#[derive(Debug, Error)]
pub enum GameError {
    /// Mana or item availability blocked the action
    #[error("Insufficient resource: {0}")]
    InsufficientResource(String),

    /// Out-of-range or non-numeric menu input
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// An operation needs an active character
    #[error("No active character")]
    MissingCharacter,

    /// Filesystem failure while reading or writing a snapshot
    #[error("Persistence error at {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Requested snapshot does not exist
    #[error("Save not found: {0}")]
    NotFound(String),

    /// Snapshot file exists but is not valid JSON for a character
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(#[from] serde_json::Error),

    /// Snapshot decoded but holds values the game cannot use
    #[error("Invalid character data: {0}")]
    InvalidCharacterData(String),
}

impl GameError {
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GameError::Persistence {
            path: path.into(),
            source,
        }
    }

    /// Whether a combat decision that raised this error still costs the turn
    pub fn consumes_turn(&self) -> bool {
        matches!(self, GameError::InvalidSelection(_))
    }
}

/// Turn a game error into a message suitable for the console
pub fn handle_error(error: &GameError) -> String {
    match error {
        GameError::MissingCharacter => "Create or load a character first.".to_string(),
        GameError::NotFound(name) => format!("Save '{}' was not found.", name),
        GameError::Persistence { path, source } => match source.kind() {
            std::io::ErrorKind::NotFound => format!("File {} does not exist.", path.display()),
            std::io::ErrorKind::PermissionDenied => {
                format!("No permission to access {}.", path.display())
            }
            _ => format!("Could not access {}: {}", path.display(), source),
        },
        GameError::MalformedSnapshot(e) => format!("Save file is corrupted: {}", e),
        GameError::InsufficientResource(reason) => reason.clone(),
        GameError::InvalidSelection(reason) => format!("Invalid option: {}", reason),
        _ => error.to_string(),
    }
}
