//! Grid world with walls
//!
//! Cells are addressed as `(x, y)` with `(0, 0)` in the top-left corner. Moves
//! into a wall or off the grid are not offered; a cell boxed in on every side
//! offers [`GridMove::Wait`] instead.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use qlearn_core::{ActionExecutor, RLError, Reward, State, StateProvider};

use crate::error::{EnvError, Result};
use crate::runner::GoalEnvironment;

/// Grid coordinates `(x, y)`
pub type Cell = (usize, usize);

/// Grid moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridMove {
    /// Towards row 0
    Up,
    /// Away from row 0
    Down,
    /// Towards column 0
    Left,
    /// Away from column 0
    Right,
    /// Stay in place; only offered when nothing else is
    Wait,
}

impl GridMove {
    const MOVES: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Cell reached from `(x, y)`, ignoring walls and the far bounds
    fn target(self, (x, y): Cell) -> Option<Cell> {
        match self {
            Self::Up => Some((x, y.checked_sub(1)?)),
            Self::Down => Some((x, y + 1)),
            Self::Left => Some((x.checked_sub(1)?, y)),
            Self::Right => Some((x + 1, y)),
            Self::Wait => Some((x, y)),
        }
    }
}

/// Shape and rewards of a grid world
#[derive(Debug, Clone)]
pub struct GridLayout {
    width: usize,
    height: usize,
    walls: HashSet<Cell>,
    start: Cell,
    goal: Cell,
    step_reward: f64,
    goal_reward: f64,
    cell_rewards: HashMap<Cell, f64>,
}

impl GridLayout {
    /// Open grid from the top-left to the bottom-right corner, costing one
    /// point per step and paying ten at the goal
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            walls: HashSet::new(),
            start: (0, 0),
            goal: (width.saturating_sub(1), height.saturating_sub(1)),
            step_reward: -1.0,
            goal_reward: 10.0,
            cell_rewards: HashMap::new(),
        }
    }

    /// Place the start cell
    #[must_use]
    pub fn with_start(self, start: Cell) -> Self {
        Self { start, ..self }
    }

    /// Place the goal cell
    #[must_use]
    pub fn with_goal(self, goal: Cell) -> Self {
        Self { goal, ..self }
    }

    /// Add walls
    #[must_use]
    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Cell>) -> Self {
        self.walls.extend(walls);
        self
    }

    /// Reward for entering an ordinary cell and for entering the goal
    #[must_use]
    pub fn with_rewards(self, step_reward: f64, goal_reward: f64) -> Self {
        Self {
            step_reward,
            goal_reward,
            ..self
        }
    }

    /// Override the reward of one cell
    #[must_use]
    pub fn with_cell_reward(mut self, cell: Cell, reward: f64) -> Self {
        self.cell_rewards.insert(cell, reward);
        self
    }

    /// Grid width
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Start cell
    #[must_use]
    pub fn start(&self) -> Cell {
        self.start
    }

    /// Goal cell
    #[must_use]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Whether `cell` is a wall
    #[must_use]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell)
    }

    fn contains(&self, (x, y): Cell) -> bool {
        x < self.width && y < self.height
    }

    fn is_open(&self, cell: Cell) -> bool {
        self.contains(cell) && !self.is_wall(cell)
    }

    /// Reward for entering `cell`
    #[must_use]
    pub fn reward_at(&self, cell: Cell) -> f64 {
        if cell == self.goal {
            self.goal_reward
        } else {
            self.cell_rewards
                .get(&cell)
                .copied()
                .unwrap_or(self.step_reward)
        }
    }

    /// Moves legal from `cell`, or only [`GridMove::Wait`] if there are none
    #[must_use]
    pub fn moves_from(&self, cell: Cell) -> Vec<GridMove> {
        let moves: Vec<_> = GridMove::MOVES
            .into_iter()
            .filter(|step| step.target(cell).is_some_and(|target| self.is_open(target)))
            .collect();
        if moves.is_empty() {
            vec![GridMove::Wait]
        } else {
            moves
        }
    }

    fn validate(&self) -> Result<()> {
        if self.width * self.height < 2 {
            return Err(EnvError::TooSmall {
                width: self.width,
                height: self.height,
            });
        }
        for cell in [self.start, self.goal]
            .into_iter()
            .chain(self.walls.iter().copied())
            .chain(self.cell_rewards.keys().copied())
        {
            if !self.contains(cell) {
                return Err(EnvError::OutOfBounds { x: cell.0, y: cell.1 });
            }
        }
        for (x, y) in [self.start, self.goal] {
            if self.is_wall((x, y)) {
                return Err(EnvError::Blocked { x, y });
            }
        }
        for reward in [self.step_reward, self.goal_reward]
            .into_iter()
            .chain(self.cell_rewards.values().copied())
        {
            if !reward.is_finite() {
                return Err(EnvError::InvalidReward(reward));
            }
        }
        Ok(())
    }
}

/// A position in a grid world.
///
/// Positions compare and hash by their coordinates only.
#[derive(Clone)]
pub struct GridCell {
    cell: Cell,
    layout: Arc<GridLayout>,
}

impl GridCell {
    /// Coordinates of the position
    #[must_use]
    pub fn cell(&self) -> Cell {
        self.cell
    }
}

impl fmt::Debug for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GridCell{:?}", self.cell)
    }
}

impl PartialEq for GridCell {
    fn eq(&self, other: &Self) -> bool {
        self.cell == other.cell
    }
}

impl Eq for GridCell {}

impl Hash for GridCell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cell.hash(state);
    }
}

impl State for GridCell {
    type Action = GridMove;

    fn reward(&self) -> Reward {
        Reward(self.layout.reward_at(self.cell))
    }

    fn actions(&self) -> Vec<GridMove> {
        self.layout.moves_from(self.cell)
    }
}

/// Grid world environment
#[derive(Debug)]
pub struct GridWorld {
    layout: Arc<GridLayout>,
    position: Mutex<Cell>,
}

impl GridWorld {
    /// Create a grid world standing on the layout's start cell
    pub fn new(layout: GridLayout) -> Result<Self> {
        layout.validate()?;
        debug!(
            width = layout.width,
            height = layout.height,
            walls = layout.walls.len(),
            "Creating grid world"
        );
        Ok(Self {
            position: Mutex::new(layout.start),
            layout: Arc::new(layout),
        })
    }

    /// The grid layout
    #[must_use]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Current position
    #[must_use]
    pub fn position(&self) -> GridCell {
        GridCell {
            cell: *self.lock(),
            layout: Arc::clone(&self.layout),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Cell> {
        self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl StateProvider<GridCell> for GridWorld {
    async fn current_state(&self) -> qlearn_core::Result<GridCell> {
        Ok(self.position())
    }
}

#[async_trait]
impl ActionExecutor<GridMove> for GridWorld {
    async fn execute(&self, action: GridMove) -> qlearn_core::Result<()> {
        let mut position = self.lock();
        if !self.layout.moves_from(*position).contains(&action) {
            return Err(RLError::IllegalAction {
                action: format!("{action:?}"),
                state: format!("{:?}", *position),
            });
        }
        let next = action.target(*position).unwrap_or(*position);
        trace!(from = ?*position, to = ?next, ?action, "Grid move");
        *position = next;
        Ok(())
    }
}

impl GoalEnvironment<GridCell> for GridWorld {
    fn is_goal(&self, state: &GridCell) -> bool {
        state.cell == self.layout.goal
    }

    fn restart(&self) {
        debug!(start = ?self.layout.start, "Grid world restart");
        *self.lock() = self.layout.start;
    }
}
