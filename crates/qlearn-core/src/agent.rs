//! The Q-learning agent loop

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::dispatch::Dispatcher;
use crate::{
    ActionExecutor, AgentConfig, Decision, DispatchMode, Episode, EpsilonGreedy,
    ExplorationStrategy, QualityStore, QualityTable, RLError, RankedCandidates, State,
    StateProvider, Step, UpdateStrategy,
};

/// Agent metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMetrics {
    /// Completed decision cycles
    pub cycles: u64,
    /// Quality updates written to the table
    pub updates: u64,
    /// Actions picked at random
    pub explorations: u64,
    /// Actions picked greedily
    pub exploitations: u64,
    /// Dispatched actions that failed or were cancelled
    pub dispatch_failures: u64,
    /// Calls to [`Agent::reset`]
    pub resets: u64,
}

/// Tabular Q-learning agent.
///
/// Each call to [`advance`](Self::advance) observes the environment, picks
/// and dispatches an action, and credits the observed reward to the step taken
/// in the previous cycle.
pub struct Agent<S: State, Q: QualityTable<S> = QualityStore<S>> {
    config: AgentConfig,
    provider: Arc<dyn StateProvider<S>>,
    store: Q,
    update: Box<dyn UpdateStrategy>,
    exploration: Box<dyn ExplorationStrategy<S>>,
    dispatcher: Dispatcher<S::Action>,
    episode: Episode<S>,
    metrics: AgentMetrics,
}

impl<S: State> Agent<S> {
    /// Create an agent with its own empty quality store
    pub fn new(
        config: AgentConfig,
        provider: Arc<dyn StateProvider<S>>,
        executor: Arc<dyn ActionExecutor<S::Action>>,
    ) -> Self {
        let store = QualityStore::new(config.default_quality);
        Self::with_store(config, provider, executor, store)
    }
}

impl<S: State, Q: QualityTable<S>> Agent<S, Q> {
    /// Create an agent learning into `store`.
    ///
    /// The store's own default quality takes precedence over the configured one.
    pub fn with_store(
        config: AgentConfig,
        provider: Arc<dyn StateProvider<S>>,
        executor: Arc<dyn ActionExecutor<S::Action>>,
        store: Q,
    ) -> Self {
        let exploration = match config.seed {
            Some(seed) => EpsilonGreedy::with_seed(config.exploration_factor, seed),
            None => EpsilonGreedy::new(config.exploration_factor),
        };
        info!(
            learning_rate = config.learning_rate.value(),
            discount_factor = config.discount_factor.value(),
            exploration_factor = config.exploration_factor.value(),
            dispatch = ?config.dispatch,
            update_rule = ?config.update_rule,
            "Creating Q-learning agent"
        );
        Self {
            update: config.update_rule.strategy(),
            exploration: Box::new(exploration),
            dispatcher: Dispatcher::new(config.dispatch, executor),
            episode: Episode::NoHistory,
            metrics: AgentMetrics::default(),
            provider,
            store,
            config,
        }
    }

    /// Replace the exploration strategy
    #[must_use]
    pub fn with_exploration(mut self, exploration: impl ExplorationStrategy<S> + 'static) -> Self {
        self.exploration = Box::new(exploration);
        self
    }

    /// Replace the update strategy
    #[must_use]
    pub fn with_update_strategy(mut self, update: impl UpdateStrategy + 'static) -> Self {
        self.update = Box::new(update);
        self
    }

    /// Run one decision cycle and return the step it took.
    ///
    /// Fails on protocol violations by the environment (no legal actions, an
    /// illegal choice) and on updates that leave the finite range. Failed
    /// action execution is not an error.
    pub async fn advance(&mut self) -> crate::Result<Step<S>> {
        self.dispatcher.settle().await;
        let current = self.provider.current_state().await?;

        let candidates = self.rank(&current)?;
        let decision = self.exploration.next_action(&candidates)?;
        if !candidates.contains(decision.action()) {
            return Err(RLError::IllegalAction {
                action: format!("{:?}", decision.action()),
                state: format!("{current:?}"),
            });
        }
        match &decision {
            Decision::Explore(_) => self.metrics.explorations += 1,
            Decision::Exploit(_) => self.metrics.exploitations += 1,
        }
        debug!(
            state = ?current,
            action = ?decision.action(),
            explored = decision.is_exploration(),
            "Selected action"
        );

        let action = decision.into_action();
        self.dispatcher.dispatch(action.clone()).await;

        let step = Step::new(current, action);
        let (episode, previous) = std::mem::take(&mut self.episode).advance(step.clone());
        self.episode = episode;
        self.metrics.cycles += 1;
        self.metrics.dispatch_failures = self.dispatcher.failures();
        if let Some(previous) = previous {
            self.learn(&previous, &step.state)?;
        }

        Ok(step)
    }

    /// Forget the previous step without touching the quality table.
    ///
    /// Call before the environment jumps to an unrelated state so the jump is
    /// not learned as a transition.
    pub fn reset(&mut self) {
        self.episode = Episode::NoHistory;
        self.metrics.resets += 1;
        info!("Agent episode reset");
    }

    /// Wait until no dispatched action is in flight
    pub async fn settle(&mut self) {
        self.dispatcher.settle().await;
        self.metrics.dispatch_failures = self.dispatcher.failures();
    }

    /// Whether a deferred action is still awaiting completion
    #[must_use]
    pub fn action_in_flight(&self) -> bool {
        self.dispatcher.in_flight()
    }

    /// The step taken in the most recent cycle since the last reset
    #[must_use]
    pub fn last_step(&self) -> Option<&Step<S>> {
        self.episode.last_step()
    }

    /// Current episode history
    #[must_use]
    pub fn episode(&self) -> &Episode<S> {
        &self.episode
    }

    /// Agent configuration
    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// How actions are dispatched
    #[must_use]
    pub fn dispatch_mode(&self) -> DispatchMode {
        self.dispatcher.mode()
    }

    /// Learned quality table
    #[must_use]
    pub fn store(&self) -> &Q {
        &self.store
    }

    /// Consume the agent, keeping its quality table.
    ///
    /// A deferred action still in flight is detached and runs to completion.
    pub fn into_store(self) -> Q {
        self.store
    }

    /// Agent metrics
    #[must_use]
    pub fn metrics(&self) -> AgentMetrics {
        self.metrics
    }

    fn rank(&self, state: &S) -> crate::Result<RankedCandidates<S>> {
        let candidates = state
            .actions()
            .iter()
            .map(|action| self.store.triplet(state, action))
            .collect();
        RankedCandidates::new(state, candidates)
    }

    /// Credit the reward of `current` to the step that led to it
    fn learn(&mut self, previous: &Step<S>, current: &S) -> crate::Result<()> {
        let reward = current.reward();
        let best_future = self.store.best_quality(current);
        let old = self.store.get(&previous.state, &previous.action);
        let new = self.update.next(
            old,
            self.config.learning_rate,
            reward,
            self.config.discount_factor,
            best_future,
        )?;
        trace!(
            state = ?previous.state,
            action = ?previous.action,
            reward = reward.value(),
            old = old.value(),
            new = new.value(),
            "Updated quality"
        );
        self.store.put(&previous.state, &previous.action, new);
        self.metrics.updates += 1;
        Ok(())
    }
}
