use log::debug;
use rand::Rng;
use thiserror::Error;

use crate::game::{GameState, GameStatus};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the grid displacement applied to the head per tick.
    #[must_use]
    pub fn vector(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Maps a unit vector back to a direction.
    #[must_use]
    pub fn from_vector(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Self::Up),
            (0, 1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            _ => None,
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Quit,
    Confirm,
}

/// Rejections reported back to the player.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum StartError {
    #[error("Please enter your name before starting the game!")]
    EmptyPlayerName,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

impl<R: Rng> GameState<R> {
    /// Forwards a steering request while the game is running.
    ///
    /// Returns false when the request was dropped (wrong state or reversal).
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        if !direction_change_is_valid(self.direction(), direction) {
            return false;
        }

        self.set_direction(direction)
    }

    /// Toggles between running and paused. Returns whether anything changed.
    pub fn request_pause_toggle(&mut self) -> bool {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            _ => return false,
        };
        debug!("pause toggled, status now {:?}", self.status);
        true
    }

    /// Starts an idle session for `name`.
    ///
    /// A blank name is rejected and leaves the session idle. Outside the idle
    /// state the request does nothing.
    pub fn request_start(&mut self, name: &str) -> Result<(), StartError> {
        if self.status != GameStatus::Idle {
            return Ok(());
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(StartError::EmptyPlayerName);
        }

        debug!("starting game for {name}");
        self.player_name = Some(name.to_owned());
        self.status = GameStatus::Running;
        Ok(())
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                let _ = self.request_direction(direction);
            }
            GameInput::Pause => {
                let _ = self.request_pause_toggle();
            }
            GameInput::Quit | GameInput::Confirm => {}
        }
    }
}
