//! Environment construction errors

use thiserror::Error;

use qlearn_core::RLError;

/// Errors raised while building an environment
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvError {
    /// Not enough cells to hold both the start and the goal
    #[error("Environment of size {width}x{height} is too small")]
    TooSmall {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// A cell outside the environment bounds
    #[error("Cell ({x}, {y}) is out of bounds")]
    OutOfBounds {
        /// Column
        x: usize,
        /// Row
        y: usize,
    },

    /// The start or goal placed on a wall
    #[error("Cell ({x}, {y}) is a wall")]
    Blocked {
        /// Column
        x: usize,
        /// Row
        y: usize,
    },

    /// A reward that is NaN or infinite
    #[error("Reward {0} is not a finite number")]
    InvalidReward(f64),
}

impl From<EnvError> for RLError {
    fn from(err: EnvError) -> Self {
        RLError::Environment(err.to_string())
    }
}

/// Result type alias for environment construction
pub type Result<T> = std::result::Result<T, EnvError>;
