//! Action selection from ranked candidates

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::{ExplorationFactor, RankedCandidates, State};

/// Outcome of one action selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision<A> {
    /// Picked at random
    Explore(A),
    /// Picked as the best ranked candidate
    Exploit(A),
}

impl<A> Decision<A> {
    /// The selected action
    pub fn action(&self) -> &A {
        match self {
            Self::Explore(action) | Self::Exploit(action) => action,
        }
    }

    /// Consume the decision, keeping the action
    pub fn into_action(self) -> A {
        match self {
            Self::Explore(action) | Self::Exploit(action) => action,
        }
    }

    /// Whether the action was picked at random
    pub fn is_exploration(&self) -> bool {
        matches!(self, Self::Explore(_))
    }
}

/// Chooses the next action among ranked candidates
pub trait ExplorationStrategy<S: State>: Send {
    /// Pick one of `candidates`
    fn next_action(&mut self, candidates: &RankedCandidates<S>) -> crate::Result<Decision<S::Action>>;
}

/// ε-greedy selection.
///
/// With probability ε picks uniformly among all candidates, otherwise picks
/// the best ranked one. Ties on the best quality go to the candidate the state
/// listed last, which keeps greedy selection deterministic.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    factor: ExplorationFactor,
    rng: StdRng,
}

impl EpsilonGreedy {
    /// Create a new ε-greedy strategy seeded from the OS
    #[must_use]
    pub fn new(factor: ExplorationFactor) -> Self {
        Self {
            factor,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible variant for a fixed seed
    #[must_use]
    pub fn with_seed(factor: ExplorationFactor, seed: u64) -> Self {
        Self {
            factor,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The configured exploration factor
    #[must_use]
    pub fn factor(&self) -> ExplorationFactor {
        self.factor
    }
}

impl<S: State> ExplorationStrategy<S> for EpsilonGreedy {
    fn next_action(&mut self, candidates: &RankedCandidates<S>) -> crate::Result<Decision<S::Action>> {
        let sample: f64 = self.rng.gen();
        if self.factor.should_explore(sample) {
            if let Some(candidate) = candidates.as_slice().choose(&mut self.rng) {
                return Ok(Decision::Explore(candidate.action.clone()));
            }
        }
        Ok(Decision::Exploit(candidates.best().action.clone()))
    }
}
