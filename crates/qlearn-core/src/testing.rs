//! Test doubles shared by the unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    ActionExecutor, Quality, QualityStore, QualityTable, RLError, Reward, State, StateProvider,
};

/// One-dimensional moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
    Stay,
}

/// A numbered tile whose reward is its number. Tile 0 cannot move left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile(pub u32);

impl State for Tile {
    type Action = Move;

    fn reward(&self) -> Reward {
        Reward(f64::from(self.0))
    }

    fn actions(&self) -> Vec<Move> {
        if self.0 == 0 {
            vec![Move::Right, Move::Stay]
        } else {
            vec![Move::Left, Move::Right, Move::Stay]
        }
    }
}

/// A state offering nothing to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dead;

impl State for Dead {
    type Action = Move;

    fn reward(&self) -> Reward {
        Reward(0.0)
    }

    fn actions(&self) -> Vec<Move> {
        Vec::new()
    }
}

/// Replays a fixed list of states, repeating the last one
pub struct ScriptedProvider<S> {
    states: Vec<S>,
    cursor: AtomicUsize,
    watched: Option<Arc<RecordingExecutor>>,
    completed_seen: Mutex<Vec<usize>>,
}

impl<S> ScriptedProvider<S> {
    pub fn new(states: Vec<S>) -> Self {
        Self {
            states,
            cursor: AtomicUsize::new(0),
            watched: None,
            completed_seen: Mutex::new(Vec::new()),
        }
    }

    /// Also record how many actions `executor` had completed at each observation
    pub fn watching(states: Vec<S>, executor: Arc<RecordingExecutor>) -> Self {
        Self {
            watched: Some(executor),
            ..Self::new(states)
        }
    }

    pub fn rewind(&self) {
        self.cursor.store(0, Ordering::SeqCst);
    }

    pub fn completed_at_observation(&self) -> Vec<usize> {
        self.completed_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl<S: State> StateProvider<S> for ScriptedProvider<S> {
    async fn current_state(&self) -> crate::Result<S> {
        if let Some(executor) = &self.watched {
            self.completed_seen.lock().unwrap().push(executor.completed());
        }
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.states
            .get(index)
            .or_else(|| self.states.last())
            .cloned()
            .ok_or_else(|| RLError::Environment("no scripted states".into()))
    }
}

/// Records executed moves, optionally slowly or failing
#[derive(Default)]
pub struct RecordingExecutor {
    executed: Mutex<Vec<Move>>,
    active: AtomicUsize,
    max_active: AtomicUsize,
    completed: AtomicUsize,
    delay: Option<Duration>,
    failure: Option<fn() -> RLError>,
}

impl RecordingExecutor {
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn failing(failure: fn() -> RLError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn executed(&self) -> Vec<Move> {
        self.executed.lock().unwrap().clone()
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActionExecutor<Move> for RecordingExecutor {
    async fn execute(&self, action: Move) -> crate::Result<()> {
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.executed.lock().unwrap().push(action);
        self.active.fetch_sub(1, Ordering::SeqCst);
        self.completed.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some(failure) => Err(failure()),
            None => Ok(()),
        }
    }
}

/// Quality table that remembers every write
pub struct RecordingStore {
    inner: QualityStore<Tile>,
    puts: Vec<(Tile, Move, Quality)>,
}

impl RecordingStore {
    pub fn new(default_quality: Quality) -> Self {
        Self {
            inner: QualityStore::new(default_quality),
            puts: Vec::new(),
        }
    }

    pub fn puts(&self) -> &[(Tile, Move, Quality)] {
        &self.puts
    }
}

impl QualityTable<Tile> for RecordingStore {
    fn get(&self, state: &Tile, action: &Move) -> Quality {
        self.inner.get(state, action)
    }

    fn put(&mut self, state: &Tile, action: &Move, quality: Quality) {
        self.puts.push((*state, *action, quality));
        self.inner.put(state, action, quality);
    }

    fn best_quality(&self, state: &Tile) -> Quality {
        self.inner.best_quality(state)
    }
}
