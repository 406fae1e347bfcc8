//! Error handling for the SpaceRain client
//!
//! Every failure that can reach the analysis session is one of these
//! variants; its `Display` text is what the user sees.

use spacerain_shared::ValidationError;
use thiserror::Error;

/// Message used when a transport failure carries no description
pub const GENERIC_NETWORK_MESSAGE: &str = "Could not reach the analysis service";

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    // Pre-flight errors
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("A submission is already in progress")]
    SubmissionInFlight,

    // Request errors
    #[error("Error {status}: {reason}")]
    Transport { status: u16, reason: String },

    #[error("{0}")]
    Network(String),

    #[error("Could not read the analysis response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Build a network error, falling back to a generic message
    pub fn network(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            ClientError::Network(GENERIC_NETWORK_MESSAGE.to_string())
        } else {
            ClientError::Network(message)
        }
    }

    /// Whether resubmitting the same draft may succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ClientError::Transport { .. } | ClientError::Network(_) | ClientError::Decode(_)
        )
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(e: config::ConfigError) -> Self {
        ClientError::Configuration(e.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
