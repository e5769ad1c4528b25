use std::time::Duration;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cell::Cell;
use crate::config::{ConfigError, GameConfig};
use crate::food::Food;
use crate::grid::Grid;
use crate::heading::Heading;
use crate::snake::{Collision, Outcome, Snake};

/// What a single [`GameState::step`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepEvent {
    /// The game had already ended; nothing changed.
    Idle,
    Moved,
    /// The snake ate, grew, and the food moved.
    Ate,
    /// The game ended on this step.
    Collided(Collision),
}

/// Read-only view of one tick handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub grid: Grid,
    /// Body cells, head first.
    pub body: Vec<Cell>,
    pub heading: Heading,
    pub food: Cell,
    pub score: u32,
    pub tick_interval: Duration,
    pub tick_count: u64,
    pub terminal: bool,
    pub death_reason: Option<Collision>,
}

impl Snapshot {
    #[must_use]
    pub fn head(&self) -> Option<Cell> {
        self.body.first().copied()
    }
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub tick_count: u64,
    grid: Grid,
    tick_interval: Duration,
    tick_interval_step: Duration,
    min_tick_interval: Duration,
    terminal: bool,
    death_reason: Option<Collision>,
    rng: StdRng,
}

impl GameState {
    /// Creates a state with an entropy-seeded food source.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = config.grid();
        info!(
            "new game on {}x{} grid, tick interval {}ms",
            grid.width, grid.height, config.initial_tick_interval_ms
        );

        Ok(Self {
            snake: Snake::new(config.start_body.clone(), config.start_heading),
            food: Food::new(config.initial_food()),
            score: 0,
            tick_count: 0,
            grid,
            tick_interval: config.initial_tick_interval(),
            tick_interval_step: config.tick_interval_step(),
            min_tick_interval: config.min_tick_interval(),
            terminal: false,
            death_reason: None,
            rng,
        })
    }

    /// Advances the simulation by one tick.
    ///
    /// Once the game is over this is a no-op.
    pub fn step(&mut self) -> StepEvent {
        if self.terminal {
            return StepEvent::Idle;
        }

        self.tick_count += 1;
        let result = self.snake.advance(self.grid, self.food.position);

        if let Outcome::Collided(collision) = result.outcome {
            self.terminal = true;
            self.death_reason = Some(collision);
            info!(
                "game over after {} ticks: {collision:?} collision, score {}",
                self.tick_count, self.score
            );
            return StepEvent::Collided(collision);
        }

        if !result.consumed {
            return StepEvent::Moved;
        }

        self.score += 1;
        self.food
            .relocate(&mut self.rng, self.grid, &self.snake.occupied_cells());
        self.tick_interval = self
            .tick_interval
            .saturating_sub(self.tick_interval_step)
            .max(self.min_tick_interval);
        debug!(
            "ate at {:?}: score {}, length {}, food now {:?}, interval {:?}",
            self.snake.head(),
            self.score,
            self.snake.len(),
            self.food.position,
            self.tick_interval
        );

        StepEvent::Ate
    }

    /// Forwards a steering request to the snake.
    ///
    /// Requests arriving after the game has ended are dropped.
    pub fn on_direction_input(&mut self, heading: Heading) {
        if !self.terminal {
            self.snake.set_heading(heading);
        }
    }

    /// Returns the read-only view consumed by renderers.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid,
            body: self.snake.segments().copied().collect(),
            heading: self.snake.current_heading(),
            food: self.food.position,
            score: self.score,
            tick_interval: self.tick_interval,
            tick_count: self.tick_count,
            terminal: self.terminal,
            death_reason: self.death_reason,
        }
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Delay before the next tick; shrinks as the score grows.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<Collision> {
        self.death_reason
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{GameState, StepEvent};
    use crate::cell::Cell;
    use crate::config::GameConfig;
    use crate::food::Food;
    use crate::heading::Heading;
    use crate::snake::{Collision, Snake};

    fn state() -> GameState {
        GameState::new_with_seed(&GameConfig::default(), 1).expect("default config is valid")
    }

    #[test]
    fn starts_with_configured_body_and_food() {
        let state = state();
        let snapshot = state.snapshot();

        assert_eq!(
            snapshot.body,
            vec![Cell::new(7, 5), Cell::new(6, 5), Cell::new(5, 5)]
        );
        assert_eq!(snapshot.food, Cell::new(20, 20));
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.tick_interval, Duration::from_millis(200));
        assert!(!snapshot.terminal);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GameConfig {
            grid_height: 1,
            ..GameConfig::default()
        };

        assert!(GameState::new_with_seed(&config, 1).is_err());
    }

    #[test]
    fn plain_move_keeps_score_and_interval() {
        let mut state = state();

        assert_eq!(state.step(), StepEvent::Moved);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.tick_interval(), Duration::from_millis(200));
    }

    #[test]
    fn eating_scores_and_speeds_up() {
        let mut state = state();
        state.food = Food::new(Cell::new(8, 5));

        assert_eq!(state.step(), StepEvent::Ate);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.tick_interval(), Duration::from_millis(197));
        assert!(!state.snake.occupies(state.food.position));
        assert!(state.grid().is_interior(state.food.position));
    }

    #[test]
    fn ten_meals_shave_thirty_milliseconds() {
        let mut state = state();

        for _ in 0..10 {
            state.food = Food::new(state.snake.candidate_head());
            assert_eq!(state.step(), StepEvent::Ate);
        }

        assert_eq!(state.score, 10);
        assert_eq!(state.tick_interval(), Duration::from_millis(170));
    }

    #[test]
    fn interval_never_drops_below_floor() {
        let config = GameConfig {
            initial_tick_interval_ms: 70,
            tick_interval_step_ms: 4,
            min_tick_interval_ms: 60,
            ..GameConfig::default()
        };
        let mut state = GameState::new_with_seed(&config, 2).expect("config is valid");

        for _ in 0..5 {
            state.food = Food::new(state.snake.candidate_head());
            state.step();
        }

        assert_eq!(state.score, 5);
        assert_eq!(state.tick_interval(), Duration::from_millis(60));
    }

    #[test]
    fn wall_collision_sets_terminal() {
        let mut state = state();
        state.snake = Snake::new(
            vec![Cell::new(38, 5), Cell::new(37, 5), Cell::new(36, 5)],
            Heading::Right,
        );

        assert_eq!(state.step(), StepEvent::Collided(Collision::Wall));
        assert!(state.is_terminal());
        assert_eq!(state.death_reason(), Some(Collision::Wall));
        assert_eq!(state.snake.head(), Cell::new(38, 5));
    }

    #[test]
    fn self_collision_sets_terminal() {
        let mut state = state();
        state.snake = Snake::new(
            vec![
                Cell::new(2, 2),
                Cell::new(3, 2),
                Cell::new(3, 3),
                Cell::new(2, 3),
                Cell::new(1, 3),
            ],
            Heading::Left,
        );
        state.on_direction_input(Heading::Down);

        assert_eq!(state.step(), StepEvent::Collided(Collision::Body));
        assert!(state.is_terminal());
    }

    #[test]
    fn terminal_state_is_idempotent() {
        let mut state = state();
        state.snake = Snake::new(vec![Cell::new(1, 1)], Heading::Up);
        state.step();
        assert!(state.is_terminal());

        let before = state.snapshot();
        state.on_direction_input(Heading::Right);
        assert_eq!(state.snake.pending_heading(), Heading::Up);
        for _ in 0..5 {
            assert_eq!(state.step(), StepEvent::Idle);
        }

        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn reverse_input_is_ignored() {
        let mut state = state();

        state.on_direction_input(Heading::Left);
        state.step();

        assert_eq!(state.snake.head(), Cell::new(8, 5));
    }

    #[test]
    fn seeded_games_place_food_identically() {
        let config = GameConfig::default();
        let mut first = GameState::new_with_seed(&config, 42).expect("config is valid");
        let mut second = GameState::new_with_seed(&config, 42).expect("config is valid");

        for _ in 0..3 {
            first.food = Food::new(first.snake.candidate_head());
            second.food = Food::new(second.snake.candidate_head());
            first.step();
            second.step();
            assert_eq!(first.food, second.food);
        }
    }
}
