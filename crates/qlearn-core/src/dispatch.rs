//! Action dispatch
//!
//! Executes chosen actions either inline or on a background task. In the
//! deferred mode exactly one action may be in flight: its handle is kept
//! and awaited before the next state observation, so an action's effect is
//! always visible to the cycle that follows it.
//!
//! Dropping the dispatcher detaches an in-flight action, which still runs to
//! completion; its outcome is then no longer counted.
//!
//! A failed or cancelled action is logged and counted, never returned as an
//! error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::{Action, ActionExecutor};

/// How chosen actions are executed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Execute inline and wait for completion
    #[default]
    Direct,
    /// Execute on a spawned task, awaited at the start of the next cycle
    Deferred,
}

pub(crate) struct Dispatcher<A: Action> {
    mode: DispatchMode,
    executor: Arc<dyn ActionExecutor<A>>,
    pending: Option<JoinHandle<crate::Result<()>>>,
    failures: u64,
}

impl<A: Action> Dispatcher<A> {
    pub(crate) fn new(mode: DispatchMode, executor: Arc<dyn ActionExecutor<A>>) -> Self {
        Self {
            mode,
            executor,
            pending: None,
            failures: 0,
        }
    }

    pub(crate) fn mode(&self) -> DispatchMode {
        self.mode
    }

    pub(crate) fn failures(&self) -> u64 {
        self.failures
    }

    pub(crate) fn in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait for the in-flight action, if any
    pub(crate) async fn settle(&mut self) {
        let Some(handle) = self.pending.take() else {
            return;
        };
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                self.failures += 1;
                warn!(error = %err, "Deferred action failed");
            }
            Err(err) => {
                self.failures += 1;
                warn!(error = %err, "Deferred action did not complete");
            }
        }
    }

    /// Execute `action` according to the dispatch mode.
    ///
    /// Any previous deferred action is settled first.
    pub(crate) async fn dispatch(&mut self, action: A) {
        self.settle().await;
        match self.mode {
            DispatchMode::Direct => {
                if let Err(err) = self.executor.execute(action).await {
                    self.failures += 1;
                    warn!(error = %err, "Action failed");
                }
            }
            DispatchMode::Deferred => {
                let executor = Arc::clone(&self.executor);
                self.pending = Some(tokio::spawn(async move { executor.execute(action).await }));
            }
        }
    }
}
