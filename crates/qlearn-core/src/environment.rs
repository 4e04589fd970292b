//! Collaborator contracts between the agent and its environment

use async_trait::async_trait;

use crate::{Action, State};

/// Source of the current environment state
#[async_trait]
pub trait StateProvider<S: State>: Send + Sync {
    /// Observe the current state.
    ///
    /// Observation must not change the environment and may be repeated freely.
    async fn current_state(&self) -> crate::Result<S>;
}

/// Performs the effect of an action on the environment
#[async_trait]
pub trait ActionExecutor<A: Action>: Send + Sync {
    /// Execute `action` once
    async fn execute(&self, action: A) -> crate::Result<()>;
}
