//! Episode history of the agent loop

use crate::State;

/// The state an action was taken from, and that action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<S: State> {
    /// State observed at the start of the cycle
    pub state: S,
    /// Action dispatched from that state
    pub action: S::Action,
}

impl<S: State> Step<S> {
    /// Create a new step
    pub fn new(state: S, action: S::Action) -> Self {
        Self { state, action }
    }
}

/// What the agent remembers between decision cycles.
///
/// Reward observed in a cycle is credited to the step taken in the cycle
/// before it, so the loop needs at most one previous step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Episode<S: State> {
    /// Nothing to credit yet: fresh agent or just reset
    NoHistory,
    /// The previous cycle's step, awaiting its reward
    HasHistory(Step<S>),
}

impl<S: State> Default for Episode<S> {
    fn default() -> Self {
        Self::NoHistory
    }
}

impl<S: State> Episode<S> {
    /// Move on to a new step, returning the history it replaces
    #[must_use]
    pub fn advance(self, step: Step<S>) -> (Self, Option<Step<S>>) {
        let previous = match self {
            Self::NoHistory => None,
            Self::HasHistory(previous) => Some(previous),
        };
        (Self::HasHistory(step), previous)
    }

    /// The last recorded step, if any
    #[must_use]
    pub fn last_step(&self) -> Option<&Step<S>> {
        match self {
            Self::NoHistory => None,
            Self::HasHistory(step) => Some(step),
        }
    }
}
