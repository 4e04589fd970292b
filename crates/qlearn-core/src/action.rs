//! Action representation

use std::fmt::Debug;
use std::hash::Hash;

/// An executable unit of effect offered by a state.
///
/// Actions are compared by value and used as part of the quality table key,
/// so they must be cheap to clone and hashable. Any type meeting the bounds
/// is an action.
pub trait Action: Clone + Debug + Eq + Hash + Send + Sync + 'static {}

impl<T> Action for T where T: Clone + Debug + Eq + Hash + Send + Sync + 'static {}
