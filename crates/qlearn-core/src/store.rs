//! Quality table storage
//!
//! [`QualityStore`] maps state-action pairs to their learned [`Quality`] and
//! keeps, per state, a counted multiset of the stored qualities. The multiset
//! answers "best quality for this state" from its largest key instead of
//! scanning every action. Several actions may carry the same quality, so a
//! value is tracked with an occurrence count and overwriting one action only
//! drops one occurrence.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{Quality, State, StateActionQuality};

/// Read/write access to a quality table
pub trait QualityTable<S: State>: Send {
    /// Stored quality of the pair, or the default quality if never stored
    fn get(&self, state: &S, action: &S::Action) -> Quality;

    /// Store a quality, replacing any previous value for the pair
    fn put(&mut self, state: &S, action: &S::Action, quality: Quality);

    /// Highest quality stored for any action of `state`, or the default quality
    fn best_quality(&self, state: &S) -> Quality;

    /// The pair together with its current quality
    fn triplet(&self, state: &S, action: &S::Action) -> StateActionQuality<S> {
        StateActionQuality::new(state.clone(), action.clone(), self.get(state, action))
    }
}

/// Per-state table entry
#[derive(Debug, Clone)]
struct StateEntry<A> {
    qualities: HashMap<A, Quality>,
    ranking: BTreeMap<Quality, usize>,
}

impl<A> Default for StateEntry<A> {
    fn default() -> Self {
        Self {
            qualities: HashMap::new(),
            ranking: BTreeMap::new(),
        }
    }
}

impl<A: std::hash::Hash + Eq> StateEntry<A> {
    /// Store `quality` for `action`, returning the value it replaced
    fn insert(&mut self, action: A, quality: Quality) -> Option<Quality> {
        let previous = self.qualities.insert(action, quality);
        if let Some(old) = previous {
            self.forget(old);
        }
        *self.ranking.entry(quality).or_insert(0) += 1;
        previous
    }

    /// Drop exactly one occurrence of `quality` from the ranking
    fn forget(&mut self, quality: Quality) {
        if let Some(count) = self.ranking.get_mut(&quality) {
            *count -= 1;
            if *count == 0 {
                self.ranking.remove(&quality);
            }
        }
    }

    fn best(&self) -> Option<Quality> {
        self.ranking.last_key_value().map(|(quality, _)| *quality)
    }
}

/// In-memory quality table with a per-state best-value cache.
///
/// Entries are created on first `put` and never evicted.
#[derive(Debug, Clone)]
pub struct QualityStore<S: State> {
    entries: HashMap<S, StateEntry<S::Action>>,
    default_quality: Quality,
    len: usize,
}

impl<S: State> QualityStore<S> {
    /// Create an empty store returning `default_quality` for unseen pairs
    #[must_use]
    pub fn new(default_quality: Quality) -> Self {
        Self {
            entries: HashMap::new(),
            default_quality,
            len: 0,
        }
    }

    /// Quality reported for pairs that were never stored
    #[must_use]
    pub fn default_quality(&self) -> Quality {
        self.default_quality
    }

    /// Number of stored state-action pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been stored yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of states with at least one stored action
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.entries.len()
    }

    /// Iterate all stored pairs
    pub fn iter(&self) -> impl Iterator<Item = StateActionQuality<S>> + '_ {
        self.entries.iter().flat_map(|(state, entry)| {
            entry.qualities.iter().map(move |(action, quality)| {
                StateActionQuality::new(state.clone(), action.clone(), *quality)
            })
        })
    }
}

impl<S: State> Default for QualityStore<S> {
    fn default() -> Self {
        Self::new(Quality::ZERO)
    }
}

impl<S: State> QualityTable<S> for QualityStore<S> {
    fn get(&self, state: &S, action: &S::Action) -> Quality {
        self.entries
            .get(state)
            .and_then(|entry| entry.qualities.get(action))
            .copied()
            .unwrap_or(self.default_quality)
    }

    fn put(&mut self, state: &S, action: &S::Action, quality: Quality) {
        let entry = self.entries.entry(state.clone()).or_default();
        if entry.insert(action.clone(), quality).is_none() {
            self.len += 1;
        }
    }

    fn best_quality(&self, state: &S) -> Quality {
        self.entries
            .get(state)
            .and_then(StateEntry::best)
            .unwrap_or(self.default_quality)
    }
}

/// A [`QualityStore`] shared between agents behind a single lock.
///
/// Clones share the same table. Each operation holds the lock for its whole
/// duration, so point reads, writes and best-quality queries never interleave.
#[derive(Debug, Clone)]
pub struct SharedQualityStore<S: State> {
    inner: Arc<Mutex<QualityStore<S>>>,
}

impl<S: State> SharedQualityStore<S> {
    /// Wrap a store for sharing
    #[must_use]
    pub fn new(store: QualityStore<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QualityStore<S>> {
        // Every operation leaves the table consistent, poisoned or not
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stored state-action pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been stored yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current table
    #[must_use]
    pub fn snapshot(&self) -> QualityStore<S> {
        self.lock().clone()
    }
}

impl<S: State> From<QualityStore<S>> for SharedQualityStore<S> {
    fn from(store: QualityStore<S>) -> Self {
        Self::new(store)
    }
}

impl<S: State> QualityTable<S> for SharedQualityStore<S> {
    fn get(&self, state: &S, action: &S::Action) -> Quality {
        self.lock().get(state, action)
    }

    fn put(&mut self, state: &S, action: &S::Action, quality: Quality) {
        self.lock().put(state, action, quality);
    }

    fn best_quality(&self, state: &S) -> Quality {
        self.lock().best_quality(state)
    }

    fn triplet(&self, state: &S, action: &S::Action) -> StateActionQuality<S> {
        self.lock().triplet(state, action)
    }
}
