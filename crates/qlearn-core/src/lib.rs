//! Tabular Q-learning core
//!
//! This crate provides the decision/update loop of a tabular Q-learning
//! agent and the quality table it learns into. Environments plug in through
//! two contracts: a [`StateProvider`] to observe the current state and an
//! [`ActionExecutor`] to carry out the chosen action.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod agent;
pub mod config;
pub mod dispatch;
pub mod environment;
pub mod episode;
pub mod error;
pub mod exploration;
pub mod factors;
pub mod quality;
pub mod reward;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod update;

#[cfg(test)]
mod testing;

// Re-export core traits and types
pub use action::Action;
pub use agent::{Agent, AgentMetrics};
pub use config::AgentConfig;
pub use dispatch::DispatchMode;
pub use environment::{ActionExecutor, StateProvider};
pub use episode::{Episode, Step};
pub use error::{RLError, Result};
pub use exploration::{Decision, EpsilonGreedy, ExplorationStrategy};
pub use factors::{DiscountFactor, ExplorationFactor, LearningRate};
pub use quality::{Quality, RankedCandidates, StateActionQuality};
pub use reward::Reward;
pub use state::State;
pub use store::{QualityStore, QualityTable, SharedQualityStore};
pub use update::{BellmanUpdate, IdentityUpdate, UpdateRule, UpdateStrategy};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ActionExecutor, Agent, AgentConfig, DispatchMode, Quality, QualityStore, QualityTable,
        Result, Reward, State, StateProvider, Step,
    };
}
