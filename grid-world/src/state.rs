use std::{fmt::Display, str::FromStr, sync::Arc};

use adversarial_search::{AgentIndex, GameState, IllegalActionError, MAXIMIZER};
use itertools::Itertools;
use tracing::trace;

use crate::{Direction, Layout, LayoutError, Position};

/// Pacman loses this many points for every move, including stopping
pub const TIME_PENALTY: i64 = 1;
/// Points for each food pellet eaten
pub const FOOD_POINTS: i64 = 10;
/// Bonus for eating the last food pellet
pub const WIN_POINTS: i64 = 500;
/// Lost when a ghost catches pacman
pub const LOSE_POINTS: i64 = 500;

/// How the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Outcome {
    Win,
    Lose,
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct Walls {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Walls {
    fn is_open(&self, position: Position) -> bool {
        position.row < self.height
            && position.col < self.width
            && !self.cells[position.row * self.width + position.col]
    }
}

/// One moment of a game. Generating a successor never touches `self`, the walls are shared
/// between every state of a game
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridState {
    walls: Arc<Walls>,
    food: Vec<bool>,
    food_left: usize,
    /// Pacman first, then every ghost
    agents: Vec<Position>,
    score: i64,
    outcome: Option<Outcome>,
}

impl GridState {
    /// The starting state for `layout`
    pub fn new(layout: Layout) -> Self {
        let Layout {
            width,
            height,
            walls,
            food,
            pacman,
            ghosts,
        } = layout;

        let food_left = food.iter().filter(|f| **f).count();
        let agents = std::iter::once(pacman).chain(ghosts).collect();

        Self {
            walls: Arc::new(Walls {
                width,
                height,
                cells: walls,
            }),
            food,
            food_left,
            agents,
            score: 0,
            outcome: None,
        }
    }

    #[allow(missing_docs)]
    pub fn pacman(&self) -> Position {
        self.agents[MAXIMIZER]
    }

    /// Ghost positions, in agent order
    pub fn ghosts(&self) -> &[Position] {
        &self.agents[1..]
    }

    #[allow(missing_docs)]
    pub fn food_left(&self) -> usize {
        self.food_left
    }

    /// Every cell that still has food on it
    pub fn food(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.walls.width;

        self.food
            .iter()
            .positions(|f| *f)
            .map(move |index| Position::new(index / width, index % width))
    }

    /// Pacman's score so far
    pub fn points(&self) -> i64 {
        self.score
    }

    #[allow(missing_docs)]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn food_index(&self, position: Position) -> usize {
        position.row * self.walls.width + position.col
    }

    fn pacman_moves(&mut self, to: Position) {
        self.agents[MAXIMIZER] = to;
        self.score -= TIME_PENALTY;

        let index = self.food_index(to);
        if self.food[index] {
            self.food[index] = false;
            self.food_left -= 1;
            self.score += FOOD_POINTS;

            if self.food_left == 0 {
                self.score += WIN_POINTS;
                self.outcome = Some(Outcome::Win);
                return;
            }
        }

        if self.ghosts().contains(&to) {
            self.caught();
        }
    }

    fn ghost_moves(&mut self, ghost: AgentIndex, to: Position) {
        self.agents[ghost] = to;

        if to == self.pacman() {
            self.caught();
        }
    }

    fn caught(&mut self) {
        self.score -= LOSE_POINTS;
        self.outcome = Some(Outcome::Lose);
    }
}

impl FromStr for GridState {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(GridState::new(s.parse()?))
    }
}

impl GameState for GridState {
    type Action = Direction;

    fn num_agents(&self) -> usize {
        self.agents.len()
    }

    /// Pacman may always stop. Ghosts have to keep moving unless they are boxed in
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Direction> {
        if self.outcome.is_some() {
            return vec![];
        }
        let Some(from) = self.agents.get(agent) else {
            return vec![];
        };

        let mut moves = Direction::MOVES
            .into_iter()
            .filter(|direction| {
                from.step(*direction)
                    .map_or(false, |to| self.walls.is_open(to))
            })
            .collect_vec();

        if agent == MAXIMIZER || moves.is_empty() {
            moves.push(Direction::Stop);
        }

        moves
    }

    /// Only pacman stopping is a no-op. A boxed in ghost has to wait, and the game still goes on
    fn is_noop(&self, agent: AgentIndex, action: &Direction) -> bool {
        agent == MAXIMIZER && *action == Direction::Stop
    }

    fn generate_successor(
        &self,
        agent: AgentIndex,
        action: Direction,
    ) -> Result<Self, IllegalActionError> {
        if !self.legal_actions(agent).contains(&action) {
            return Err(IllegalActionError::new(agent, &action));
        }
        let to = self.agents[agent]
            .step(action)
            .ok_or_else(|| IllegalActionError::new(agent, &action))?;

        let mut next = self.clone();
        if agent == MAXIMIZER {
            next.pacman_moves(to);
        } else {
            next.ghost_moves(agent, to);
        }

        if let Some(outcome) = next.outcome {
            trace!(agent, %action, ?outcome, score = next.score, "game over");
        }

        Ok(next)
    }

    fn is_win(&self) -> bool {
        self.outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.outcome == Some(Outcome::Lose)
    }

    /// Pacman's points for pacman, every ghost wants the opposite
    fn score(&self, agent: AgentIndex) -> f64 {
        if agent == MAXIMIZER {
            self.score as f64
        } else {
            -self.score as f64
        }
    }
}

impl Display for GridState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.walls.height {
            let line: String = (0..self.walls.width)
                .map(|col| {
                    let position = Position::new(row, col);

                    if !self.walls.is_open(position) {
                        '%'
                    } else if self.pacman() == position {
                        'P'
                    } else if self.ghosts().contains(&position) {
                        'G'
                    } else if self.food[self.food_index(position)] {
                        '.'
                    } else {
                        ' '
                    }
                })
                .collect();

            writeln!(f, "{line}")?;
        }

        Ok(())
    }
}
