//! Quality values and ranked state-action candidates

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{RLError, State};

/// Learned estimate of expected cumulative reward for one state-action pair.
///
/// Always finite, so the ordering is total. Negative zero is stored as zero
/// to keep `Eq` and `Ord` consistent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Quality(f64);

impl Quality {
    /// Smallest representable quality
    pub const MIN: Self = Self(f64::MIN);
    /// Largest representable quality
    pub const MAX: Self = Self(f64::MAX);
    /// Zero quality, the default for unseen pairs
    pub const ZERO: Self = Self(0.0);

    /// Create a new quality, rejecting NaN and infinities
    pub fn new(value: f64) -> crate::Result<Self> {
        if value.is_finite() {
            Ok(Self(value + 0.0))
        } else {
            Err(RLError::InvalidQuality(value))
        }
    }

    /// Get the quality value
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Quality {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Quality {}

impl PartialOrd for Quality {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quality {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl TryFrom<f64> for Quality {
    type Error = RLError;

    fn try_from(value: f64) -> crate::Result<Self> {
        Self::new(value)
    }
}

impl From<Quality> for f64 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A state, one of its actions, and the quality currently stored for the pair.
///
/// Triplets compare by quality alone.
#[derive(Debug, Clone)]
pub struct StateActionQuality<S: State> {
    /// State the action is taken from
    pub state: S,
    /// Candidate action
    pub action: S::Action,
    /// Stored quality of the pair
    pub quality: Quality,
}

impl<S: State> StateActionQuality<S> {
    /// Create a new triplet
    pub fn new(state: S, action: S::Action, quality: Quality) -> Self {
        Self {
            state,
            action,
            quality,
        }
    }
}

impl<S: State> PartialEq for StateActionQuality<S> {
    fn eq(&self, other: &Self) -> bool {
        self.quality == other.quality
    }
}

impl<S: State> Eq for StateActionQuality<S> {}

impl<S: State> PartialOrd for StateActionQuality<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: State> Ord for StateActionQuality<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.quality.cmp(&other.quality)
    }
}

/// Candidates of one decision cycle, ranked by ascending quality.
///
/// Ranking is stable: candidates with equal quality keep the order in which
/// the state listed its actions. The set is never empty.
#[derive(Debug, Clone)]
pub struct RankedCandidates<S: State> {
    candidates: Vec<StateActionQuality<S>>,
}

impl<S: State> RankedCandidates<S> {
    /// Rank the given candidates; fails when there are none
    pub fn new(state: &S, mut candidates: Vec<StateActionQuality<S>>) -> crate::Result<Self> {
        if candidates.is_empty() {
            return Err(RLError::NoLegalActions {
                state: format!("{state:?}"),
            });
        }
        candidates.sort();
        Ok(Self { candidates })
    }

    /// The highest ranked candidate; among equal qualities the last listed wins
    #[must_use]
    pub fn best(&self) -> &StateActionQuality<S> {
        &self.candidates[self.candidates.len() - 1]
    }

    /// Whether `action` is one of the candidates
    #[must_use]
    pub fn contains(&self, action: &S::Action) -> bool {
        self.candidates.iter().any(|c| &c.action == action)
    }

    /// Candidates in ascending quality order
    #[must_use]
    pub fn as_slice(&self) -> &[StateActionQuality<S>] {
        &self.candidates
    }

    /// Iterate candidates in ascending quality order
    pub fn iter(&self) -> impl Iterator<Item = &StateActionQuality<S>> {
        self.candidates.iter()
    }

    /// Number of candidates
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Never true for a constructed set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
