//! Example: Q-learning agent crossing a walled grid world
//!
//! Run with `RUST_LOG=debug` to see every decision cycle.

use std::sync::Arc;

use qlearn_core::telemetry::init_tracing;
use qlearn_core::{Agent, AgentConfig, DispatchMode};
use qlearn_env::{run_episode, GridCell, GridLayout, GridWorld};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    init_tracing()?;

    // A 6x6 grid with a wall to walk around and a pit to avoid
    let layout = GridLayout::new(6, 6)
        .with_walls([(1, 2), (2, 2), (3, 2), (4, 2)])
        .with_cell_reward((3, 4), -15.0);
    let grid = Arc::new(GridWorld::new(layout)?);

    let config = AgentConfig::new(0.5, 0.95, 0.1)?
        .with_seed(2024)
        .with_dispatch(DispatchMode::Deferred);
    let mut agent: Agent<GridCell> = Agent::new(config, grid.clone(), grid.clone());

    let num_episodes = 100;
    let mut lengths = Vec::with_capacity(num_episodes);
    for episode in 0..num_episodes {
        let summary = run_episode(&mut agent, grid.as_ref(), 1_000).await?;
        lengths.push(summary.steps);
        if episode % 10 == 9 {
            println!(
                "Episode {}: Steps = {}, Total Reward = {:.2}, Goal = {}",
                episode + 1,
                summary.steps,
                summary.total_reward.value(),
                summary.reached_goal
            );
        }
    }

    let tail = &lengths[num_episodes - 10..];
    let avg_steps = tail.iter().sum::<usize>() as f64 / tail.len() as f64;
    println!("\nAverage steps over the last {} episodes: {:.1}", tail.len(), avg_steps);

    let metrics = agent.metrics();
    println!(
        "Cycles = {}, Updates = {}, Explorations = {}, Table entries = {}",
        metrics.cycles,
        metrics.updates,
        metrics.explorations,
        agent.store().len()
    );

    Ok(())
}
