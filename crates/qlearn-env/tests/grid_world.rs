//! Learning a grid world with walls

use std::sync::Arc;

use approx::assert_relative_eq;
use qlearn_core::{Agent, AgentConfig, DispatchMode};
use qlearn_env::{run_episode, GridCell, GridLayout, GridWorld};

fn walled_grid() -> GridLayout {
    GridLayout::new(5, 5).with_walls([(1, 1), (2, 1), (3, 1), (1, 3), (2, 3), (3, 3)])
}

#[tokio::test]
async fn test_greedy_agent_finds_shortest_path() {
    let grid = Arc::new(GridWorld::new(walled_grid()).unwrap());
    let config = AgentConfig::new(1.0, 1.0, 0.0).unwrap();
    let mut agent: Agent<GridCell> = Agent::new(config, grid.clone(), grid.clone());

    let mut lengths = Vec::new();
    for _ in 0..60 {
        let summary = run_episode(&mut agent, grid.as_ref(), 500).await.unwrap();
        assert!(summary.reached_goal);
        lengths.push(summary.steps);
    }
    assert_eq!(lengths[40..], [8; 20]);

    // Eight ordinary cells, start included, then the goal
    let summary = run_episode(&mut agent, grid.as_ref(), 500).await.unwrap();
    assert_relative_eq!(summary.total_reward.value(), 2.0);
    assert_eq!(agent.metrics().dispatch_failures, 0);
}

#[tokio::test]
async fn test_exploring_deferred_agent_never_picks_illegal_moves() {
    let grid = Arc::new(GridWorld::new(walled_grid()).unwrap());
    let config = AgentConfig::new(0.5, 0.9, 0.3)
        .unwrap()
        .with_seed(5)
        .with_dispatch(DispatchMode::Deferred);
    let mut agent: Agent<GridCell> = Agent::new(config, grid.clone(), grid.clone());

    for _ in 0..20 {
        run_episode(&mut agent, grid.as_ref(), 300).await.unwrap();
    }
    let metrics = agent.metrics();
    assert_eq!(metrics.dispatch_failures, 0);
    assert!(metrics.explorations > 0);
    assert!(agent.store().len() <= 19 * 4);
}

#[tokio::test]
async fn test_boxed_in_start_waits() {
    let layout = GridLayout::new(3, 3).with_walls([(1, 0), (0, 1)]);
    let grid = Arc::new(GridWorld::new(layout).unwrap());
    let config = AgentConfig::new(1.0, 1.0, 0.0).unwrap();
    let mut agent: Agent<GridCell> = Agent::new(config, grid.clone(), grid.clone());

    let summary = run_episode(&mut agent, grid.as_ref(), 5).await.unwrap();
    assert!(!summary.reached_goal);
    assert_eq!(summary.steps, 5);
    assert_eq!(grid.position().cell(), (0, 0));
    assert_eq!(agent.metrics().dispatch_failures, 0);
    assert_eq!(agent.store().len(), 1);
}
