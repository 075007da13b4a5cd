use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{Arena, GameConfig};
use crate::events::{FinalResult, GameObserver};
use crate::food::Food;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Idle,
    Running,
    Paused,
    Ended,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every playable cell; counted as a win.
    ArenaFilled,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The session was not running.
    Skipped,
    Moved,
    Ate { score: u32 },
    Ended(EndReason),
}

/// Owned copy of everything a renderer needs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameSnapshot {
    pub snake: Vec<Position>,
    pub food: Position,
    pub direction: Direction,
    pub score: u32,
    pub status: GameStatus,
}

/// Complete mutable game state for one session.
///
/// Only [`GameState::tick`] and the input gate operations mutate it. A new
/// game replaces the whole value.
#[derive(Debug, Clone)]
pub struct GameState<R = StdRng> {
    snake: Snake,
    food: Food,
    score: u32,
    tick_count: u64,
    pub(crate) status: GameStatus,
    pub(crate) player_name: Option<String>,
    end_reason: Option<EndReason>,
    result_taken: bool,
    config: GameConfig,
    arena: Arena,
    rng: R,
}

impl GameState<StdRng> {
    /// Creates an idle session seeded from the operating system.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Creates an idle session drawing food positions from `rng`.
    ///
    /// `config` is expected to have passed [`GameConfig::validate`].
    #[must_use]
    pub fn with_rng(config: GameConfig, mut rng: R) -> Self {
        let arena = config.arena();
        let snake = Snake::with_length(config.start, Direction::Right, config.start_length);
        let food = Food::spawn(&mut rng, arena, &snake).unwrap_or(Food::new(config.start));

        Self::from_parts(config, snake, food, rng)
    }

    /// Creates an idle session from an explicit snake and food placement.
    #[must_use]
    pub fn from_parts(config: GameConfig, snake: Snake, food: Food, rng: R) -> Self {
        Self {
            snake,
            food,
            score: 0,
            tick_count: 0,
            status: GameStatus::Idle,
            player_name: None,
            end_reason: None,
            result_taken: false,
            arena: config.arena(),
            config,
            rng,
        }
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        self.tick_observed(&mut ())
    }

    /// Advances simulation by one tick, firing signals on `observer`.
    pub fn tick_observed<O: GameObserver + ?Sized>(&mut self, observer: &mut O) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Skipped;
        }

        self.tick_count += 1;
        let direction = self.snake.commit_direction();
        let new_head = self.snake.head().offset(direction);

        // Checked against the body before the tail moves away.
        let collision = if !self.arena.is_playable(new_head) {
            Some(EndReason::WallCollision)
        } else if self.snake.occupies(new_head) {
            Some(EndReason::SelfCollision)
        } else {
            None
        };

        if let Some(reason) = collision {
            self.end(reason);
            observer.collision(reason);
            return TickOutcome::Ended(reason);
        }

        self.snake.push_head(new_head);

        if new_head != self.food.position {
            self.snake.drop_tail();
            return TickOutcome::Moved;
        }

        self.score = self.score.saturating_add(self.config.food_reward);
        observer.food_consumed(new_head, self.score);

        match Food::spawn(&mut self.rng, self.arena, &self.snake) {
            Some(food) => {
                debug!("food placed at ({}, {})", food.position.x, food.position.y);
                self.food = food;
                TickOutcome::Ate { score: self.score }
            }
            None => {
                self.end(EndReason::ArenaFilled);
                observer.arena_filled(self.score);
                TickOutcome::Ended(EndReason::ArenaFilled)
            }
        }
    }

    /// Replaces the pending direction for the next tick.
    ///
    /// Reversals of the current heading are never applied, whoever asks.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        self.snake.set_direction(direction)
    }

    /// Returns the final result once per ended session.
    ///
    /// Later calls return `None`, so a repeated game-over signal cannot submit
    /// the same score twice.
    pub fn take_final_result(&mut self) -> Option<FinalResult> {
        if self.result_taken {
            return None;
        }
        let reason = self.end_reason?;
        self.result_taken = true;

        Some(FinalResult {
            player_name: self.player_name.clone().unwrap_or_default(),
            score: self.score,
            reason,
        })
    }

    fn end(&mut self, reason: EndReason) {
        info!(
            "game over after {} ticks: {reason:?}, score {}",
            self.tick_count, self.score
        );
        self.status = GameStatus::Ended;
        self.end_reason = Some(reason);
    }
}

impl<R> GameState<R> {
    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Food {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    #[must_use]
    pub fn player_name(&self) -> Option<&str> {
        self.player_name.as_deref()
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn arena(&self) -> Arena {
        self.arena
    }

    /// Returns true before the first start of this session.
    #[must_use]
    pub fn is_start_screen(&self) -> bool {
        self.status == GameStatus::Idle
    }

    /// Copies the render-relevant state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.segments().copied().collect(),
            food: self.food.position,
            direction: self.snake.direction(),
            score: self.score,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    use crate::config::GameConfig;
    use crate::events::{Signal, SignalLog};
    use crate::food::Food;
    use crate::input::Direction;

    use super::{EndReason, GameState, GameStatus, TickOutcome};
    use crate::snake::{Position, Snake};

    fn config(width: u16, height: u16, border: u16) -> GameConfig {
        GameConfig {
            arena_width: width,
            arena_height: height,
            border_thickness: border,
            ..GameConfig::default()
        }
    }

    fn running(config: GameConfig, snake: Snake, food: Position) -> GameState<StdRng> {
        let mut state =
            GameState::from_parts(config, snake, Food::new(food), StdRng::seed_from_u64(9));
        state
            .request_start("tester")
            .expect("non-empty name should start the game");
        state
    }

    #[test]
    fn new_session_is_idle_and_food_avoids_snake() {
        let state = GameState::new_with_seed(GameConfig::default(), 1);

        assert_eq!(state.status(), GameStatus::Idle);
        assert_eq!(state.score(), 0);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.snake().head(), Position { x: 10, y: 10 });
        assert_eq!(state.snake().len(), 1);
        assert!(!state.snake().occupies(state.food().position));
    }

    #[test]
    fn tick_outside_running_is_ignored() {
        let mut state = GameState::new_with_seed(GameConfig::default(), 2);
        let before = state.snapshot();

        assert_eq!(state.tick(), TickOutcome::Skipped);
        assert_eq!(state.snapshot(), before);

        state.request_start("ann").expect("name is valid");
        state.request_pause_toggle();
        assert_eq!(state.tick(), TickOutcome::Skipped);
        assert_eq!(state.snapshot().snake, before.snake);
    }

    #[test]
    fn plain_move_shifts_body() {
        let snake = Snake::with_length(Position { x: 5, y: 5 }, Direction::Right, 3);
        let mut state = running(config(20, 20, 0), snake, Position { x: 0, y: 0 });

        assert_eq!(state.tick(), TickOutcome::Moved);

        let segments: Vec<_> = state.snake().segments().copied().collect();
        assert_eq!(
            segments,
            vec![
                Position { x: 6, y: 5 },
                Position { x: 5, y: 5 },
                Position { x: 4, y: 5 },
            ]
        );
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn eating_grows_scores_and_respawns_food() {
        let snake = Snake::new(Position { x: 10, y: 10 }, Direction::Right);
        let mut state = running(config(20, 20, 0), snake, Position { x: 11, y: 10 });

        assert_eq!(state.tick(), TickOutcome::Ate { score: 10 });

        assert_eq!(state.snake().len(), 2);
        assert_eq!(state.snake().head(), Position { x: 11, y: 10 });
        assert_eq!(state.snake().tail(), Position { x: 10, y: 10 });
        assert!(!state.snake().occupies(state.food().position));
        assert_eq!(state.status(), GameStatus::Running);
    }

    #[test]
    fn configured_reward_is_used() {
        let custom = GameConfig {
            food_reward: 3,
            ..config(20, 20, 0)
        };
        let snake = Snake::new(Position { x: 4, y: 4 }, Direction::Right);
        let mut state = running(custom, snake, Position { x: 5, y: 4 });

        state.tick();

        assert_eq!(state.score(), 3);
    }

    #[test]
    fn score_saturates_at_the_maximum_reward() {
        let custom = GameConfig {
            food_reward: u32::MAX,
            ..config(20, 20, 0)
        };
        let snake = Snake::new(Position { x: 0, y: 0 }, Direction::Right);
        let mut state = GameState::from_parts(
            custom,
            snake,
            Food::new(Position { x: 1, y: 0 }),
            StepRng::new(0, 0),
        );
        state.request_start("max").expect("name is valid");

        assert_eq!(state.tick(), TickOutcome::Ate { score: u32::MAX });
        // Zero generator respawns on the first free cell, right ahead.
        assert_eq!(state.food().position, Position { x: 2, y: 0 });
        assert_eq!(state.tick(), TickOutcome::Ate { score: u32::MAX });
        assert_eq!(state.score(), u32::MAX);
        assert_eq!(state.status(), GameStatus::Running);
    }

    #[test]
    fn respawn_uses_injected_generator() {
        let snake = Snake::new(Position { x: 1, y: 0 }, Direction::Right);
        let mut state = GameState::from_parts(
            config(4, 3, 0),
            snake,
            Food::new(Position { x: 2, y: 0 }),
            StepRng::new(0, 0),
        );
        state.request_start("zero").expect("name is valid");

        state.tick();

        // Row-major first cell not covered by [(2,0), (1,0)].
        assert_eq!(state.food().position, Position { x: 0, y: 0 });
    }

    #[test]
    fn wall_collision_ends_without_mutation() {
        let snake = Snake::new(Position { x: 0, y: 0 }, Direction::Left);
        let mut state = running(config(20, 20, 0), snake, Position { x: 5, y: 5 });
        let before = state.snapshot();

        assert_eq!(state.tick(), TickOutcome::Ended(EndReason::WallCollision));

        let after = state.snapshot();
        assert_eq!(after.status, GameStatus::Ended);
        assert_eq!(after.snake, before.snake);
        assert_eq!(after.food, before.food);
        assert_eq!(after.score, before.score);
    }

    #[test]
    fn border_cells_collide_as_walls() {
        let snake = Snake::new(Position { x: 2, y: 5 }, Direction::Left);
        let mut state = running(config(20, 20, 2), snake, Position { x: 10, y: 10 });

        assert_eq!(state.tick(), TickOutcome::Ended(EndReason::WallCollision));
    }

    #[test]
    fn self_collision_checks_pre_move_body() {
        // Moving into the cell the tail is about to leave still collides.
        let snake = Snake::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 2, y: 3 },
                Position { x: 1, y: 3 },
                Position { x: 1, y: 2 },
            ],
            Direction::Left,
        );
        let mut state = running(config(6, 6, 0), snake, Position { x: 5, y: 5 });

        assert_eq!(state.tick(), TickOutcome::Ended(EndReason::SelfCollision));
        assert_eq!(state.snake().len(), 4);
    }

    #[test]
    fn ended_session_ignores_ticks() {
        let snake = Snake::new(Position { x: 19, y: 3 }, Direction::Right);
        let mut state = running(config(20, 20, 0), snake, Position { x: 1, y: 1 });
        state.tick();
        let frozen = state.snapshot();

        for _ in 0..5 {
            assert_eq!(state.tick(), TickOutcome::Skipped);
        }

        assert_eq!(state.snapshot(), frozen);
        assert_eq!(state.tick_count(), 1);
    }

    #[test]
    fn filling_the_arena_is_a_win() {
        let snake = Snake::from_segments(
            vec![Position { x: 1, y: 0 }, Position { x: 0, y: 0 }],
            Direction::Down,
        );
        let tiny = GameConfig {
            start: Position { x: 0, y: 0 },
            ..config(2, 2, 0)
        };
        let mut state = running(tiny, snake, Position { x: 1, y: 1 });
        let mut log = SignalLog::default();

        state.set_direction(Direction::Down);
        assert_eq!(
            state.tick_observed(&mut log),
            TickOutcome::Ate { score: 10 }
        );
        assert_eq!(state.food().position, Position { x: 0, y: 1 });

        state.set_direction(Direction::Left);
        assert_eq!(
            state.tick_observed(&mut log),
            TickOutcome::Ended(EndReason::ArenaFilled)
        );

        assert_eq!(state.status(), GameStatus::Ended);
        assert_eq!(state.score(), 20);
        assert_eq!(state.snake().len(), 4);
        assert_eq!(log.signals.last(), Some(&Signal::ArenaFilled { score: 20 }));
    }

    #[test]
    fn signals_fire_for_food_and_collision() {
        let snake = Snake::new(Position { x: 18, y: 4 }, Direction::Right);
        let mut state = running(config(20, 20, 0), snake, Position { x: 19, y: 4 });
        let mut log = SignalLog::default();

        state.tick_observed(&mut log);
        state.tick_observed(&mut log);

        assert_eq!(
            log.signals,
            vec![
                Signal::FoodConsumed {
                    position: Position { x: 19, y: 4 },
                    score: 10,
                },
                Signal::Collision(EndReason::WallCollision),
            ]
        );
    }

    #[test]
    fn final_result_is_taken_once() {
        let snake = Snake::new(Position { x: 0, y: 3 }, Direction::Left);
        let mut state = running(config(10, 10, 0), snake, Position { x: 5, y: 5 });

        assert_eq!(state.take_final_result(), None);
        state.tick();

        let result = state
            .take_final_result()
            .expect("ended session has a result");
        assert_eq!(result.player_name, "tester");
        assert_eq!(result.score, 0);
        assert_eq!(result.reason, EndReason::WallCollision);
        assert_eq!(state.take_final_result(), None);
    }
}
