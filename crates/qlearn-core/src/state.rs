//! State representation

use std::fmt::Debug;
use std::hash::Hash;

use crate::{Action, Reward};

/// An observed environment state.
///
/// States are immutable snapshots owned by the environment. The agent keeps
/// them only as table keys and as the previous step of an episode.
pub trait State: Clone + Debug + Eq + Hash + Send + Sync + 'static {
    /// Actions that can be taken from this state
    type Action: Action;

    /// Reward for having arrived in this state
    fn reward(&self) -> Reward;

    /// Actions legal from this state.
    ///
    /// An environment with nothing to do must offer an explicit wait action;
    /// an empty list is a protocol violation.
    fn actions(&self) -> Vec<Self::Action>;
}
