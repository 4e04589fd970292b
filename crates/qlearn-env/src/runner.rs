//! Episode driver

use serde::{Deserialize, Serialize};
use tracing::debug;

use qlearn_core::{ActionExecutor, Agent, QualityTable, Reward, State, StateProvider};

/// An environment with a goal that ends each episode
pub trait GoalEnvironment<S: State>: StateProvider<S> + ActionExecutor<S::Action> {
    /// Whether `state` is the goal
    fn is_goal(&self, state: &S) -> bool;

    /// Put the environment back in its start state
    fn restart(&self);
}

/// Outcome of one episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Actions taken before the goal was observed
    pub steps: usize,
    /// Whether the goal was observed before the step limit
    pub reached_goal: bool,
    /// Sum of the rewards of every observed state
    pub total_reward: Reward,
}

/// Advance `agent` until it observes the goal of `env`, or until `max_steps`
/// transitions have been observed without reaching it.
///
/// Every cycle dispatches an action, so an episode cut off by the limit runs
/// `max_steps + 1` cycles. Either way the last action is awaited, the agent's episode is reset and the
/// environment restarted. The learned table is kept.
pub async fn run_episode<S, Q, E>(
    agent: &mut Agent<S, Q>,
    env: &E,
    max_steps: usize,
) -> qlearn_core::Result<EpisodeSummary>
where
    S: State,
    Q: QualityTable<S>,
    E: GoalEnvironment<S> + ?Sized,
{
    let mut steps = 0;
    let mut total_reward = Reward::ZERO;
    let reached_goal = loop {
        let step = agent.advance().await?;
        total_reward += step.state.reward();
        if env.is_goal(&step.state) {
            break true;
        }
        if steps == max_steps {
            break false;
        }
        steps += 1;
    };

    agent.settle().await;
    agent.reset();
    env.restart();
    debug!(steps, reached_goal, total_reward = total_reward.value(), "Episode finished");

    Ok(EpisodeSummary {
        steps,
        reached_goal,
        total_reward,
    })
}
