//! Error types for the Q-learning core

use thiserror::Error;

/// Core error type for Q-learning operations
#[derive(Error, Debug)]
pub enum RLError {
    /// A learning, discount or exploration factor outside its range
    #[error("Invalid {name}: {value} is outside {range}")]
    InvalidFactor {
        /// Factor name
        name: &'static str,
        /// Rejected value
        value: f64,
        /// Accepted range, for display
        range: &'static str,
    },

    /// A quality value that is NaN or infinite
    #[error("Invalid quality: {0} is not a finite number")]
    InvalidQuality(f64),

    /// The environment offered a state without legal actions
    #[error("State {state} has no legal actions")]
    NoLegalActions {
        /// Debug rendering of the offending state
        state: String,
    },

    /// An exploration strategy picked an action that is not a candidate
    #[error("Action {action} is not legal from state {state}")]
    IllegalAction {
        /// Debug rendering of the chosen action
        action: String,
        /// Debug rendering of the state
        state: String,
    },

    /// Environment-related errors
    #[error("Environment error: {0}")]
    Environment(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl RLError {
    /// Whether the error is a broken collaborator contract rather than a
    /// configuration or infrastructure failure
    #[must_use]
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::NoLegalActions { .. } | Self::IllegalAction { .. }
        )
    }
}

/// Result type alias for Q-learning operations
pub type Result<T> = std::result::Result<T, RLError>;
