//! Reference environments for the qlearn agent
//!
//! This crate provides:
//! - A one-dimensional corridor
//! - A grid world with walls and configurable rewards
//! - An episode runner for goal-directed environments

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod corridor;
pub mod error;
pub mod grid;
pub mod runner;

pub use corridor::{Corridor, Position, Stride};
pub use error::EnvError;
pub use grid::{Cell, GridCell, GridLayout, GridMove, GridWorld};
pub use runner::{run_episode, EpisodeSummary, GoalEnvironment};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{run_episode, Corridor, GoalEnvironment, GridLayout, GridWorld};
    pub use qlearn_core::prelude::*;
}
