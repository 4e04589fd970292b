//! One-dimensional corridor
//!
//! The agent starts in the leftmost cell and has to walk right to the goal in
//! the last cell. Every cell but the goal costs one point.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use qlearn_core::{ActionExecutor, Reward, State, StateProvider};

use crate::error::{EnvError, Result};
use crate::runner::GoalEnvironment;

/// Reward for arriving in any cell but the goal
pub const STEP_REWARD: f64 = -1.0;

/// Reward for arriving in the goal cell
pub const GOAL_REWARD: f64 = 10.0;

/// Corridor moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stride {
    /// Towards the start, bounded by the first cell
    Left,
    /// Towards the goal
    Right,
}

/// A cell of the corridor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    index: usize,
    goal: usize,
}

impl Position {
    /// Zero-based cell index
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether this is the goal cell
    #[must_use]
    pub fn is_goal(&self) -> bool {
        self.index == self.goal
    }

    fn after(self, stride: Stride) -> Self {
        let index = match stride {
            Stride::Left => self.index.saturating_sub(1),
            Stride::Right => (self.index + 1).min(self.goal),
        };
        Self { index, ..self }
    }
}

impl State for Position {
    type Action = Stride;

    fn reward(&self) -> Reward {
        if self.is_goal() {
            Reward(GOAL_REWARD)
        } else {
            Reward(STEP_REWARD)
        }
    }

    fn actions(&self) -> Vec<Stride> {
        vec![Stride::Left, Stride::Right]
    }
}

/// Corridor environment
#[derive(Debug)]
pub struct Corridor {
    length: usize,
    position: Mutex<Position>,
}

impl Corridor {
    /// Create a corridor of `length` cells, standing in the first one
    pub fn new(length: usize) -> Result<Self> {
        if length < 2 {
            return Err(EnvError::TooSmall {
                width: length,
                height: 1,
            });
        }
        Ok(Self {
            length,
            position: Mutex::new(Self::start(length)),
        })
    }

    /// Number of cells
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Current position
    #[must_use]
    pub fn position(&self) -> Position {
        *self.lock()
    }

    fn start(length: usize) -> Position {
        Position {
            index: 0,
            goal: length - 1,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Position> {
        self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl StateProvider<Position> for Corridor {
    async fn current_state(&self) -> qlearn_core::Result<Position> {
        Ok(self.position())
    }
}

#[async_trait]
impl ActionExecutor<Stride> for Corridor {
    async fn execute(&self, action: Stride) -> qlearn_core::Result<()> {
        let mut position = self.lock();
        let next = position.after(action);
        trace!(from = position.index, to = next.index, ?action, "Corridor move");
        *position = next;
        Ok(())
    }
}

impl GoalEnvironment<Position> for Corridor {
    fn is_goal(&self, state: &Position) -> bool {
        state.is_goal()
    }

    fn restart(&self) {
        debug!(length = self.length, "Corridor restart");
        *self.lock() = Self::start(self.length);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_single_cell() {
        assert!(matches!(Corridor::new(1), Err(EnvError::TooSmall { .. })));
        assert!(Corridor::new(2).is_ok());
    }

    #[test]
    fn test_rewards() {
        let corridor = Corridor::new(4).unwrap();
        let start = corridor.position();
        assert_eq!(start.reward(), Reward(STEP_REWARD));
        assert!(!start.is_goal());
        assert_eq!(start.actions(), vec![Stride::Left, Stride::Right]);
    }

    #[tokio::test]
    async fn test_moves_are_bounded() {
        let corridor = Corridor::new(3).unwrap();
        corridor.execute(Stride::Left).await.unwrap();
        assert_eq!(corridor.position().index(), 0);

        for _ in 0..5 {
            corridor.execute(Stride::Right).await.unwrap();
        }
        let state = corridor.current_state().await.unwrap();
        assert_eq!(state.index(), 2);
        assert!(corridor.is_goal(&state));
        assert_eq!(state.reward(), Reward(GOAL_REWARD));

        corridor.execute(Stride::Left).await.unwrap();
        assert_eq!(corridor.position().index(), 1);
    }

    #[tokio::test]
    async fn test_restart_returns_to_first_cell() {
        let corridor = Corridor::new(5).unwrap();
        corridor.execute(Stride::Right).await.unwrap();
        corridor.execute(Stride::Right).await.unwrap();
        corridor.restart();
        assert_eq!(corridor.position().index(), 0);
    }
}
