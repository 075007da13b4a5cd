use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snake::Position;

const APP_DIR_NAME: &str = "arena-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default size of one grid cell in display units.
pub const DEFAULT_CELL_SIZE: u16 = 1;

/// Default arena width in display units.
pub const DEFAULT_ARENA_WIDTH: u16 = 50;

/// Default arena height in display units.
pub const DEFAULT_ARENA_HEIGHT: u16 = 30;

/// Default simulation tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Default score granted per food item.
pub const DEFAULT_FOOD_REWARD: u32 = 10;

/// Default head position of a fresh snake.
pub const DEFAULT_START: Position = Position { x: 10, y: 10 };

/// Default segment count of a fresh snake.
pub const DEFAULT_START_LENGTH: u16 = 1;

/// Render driver cadence in milliseconds.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

/// Rectangular grid with an optional inset wall border.
///
/// Cells within `border` cells of any edge are walls; everything else is
/// playable.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Arena {
    size: GridSize,
    border: u16,
}

impl Arena {
    #[must_use]
    pub fn new(size: GridSize, border: u16) -> Self {
        Self { size, border }
    }

    #[must_use]
    pub fn size(self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn border(self) -> u16 {
        self.border
    }

    /// Returns true when `position` is inside the grid but not in the border.
    #[must_use]
    pub fn is_playable(self, position: Position) -> bool {
        let border = i32::from(self.border);
        position.x >= border
            && position.y >= border
            && position.x < i32::from(self.size.width) - border
            && position.y < i32::from(self.size.height) - border
    }

    /// Returns true when `position` is a border wall cell.
    #[must_use]
    pub fn is_wall(self, position: Position) -> bool {
        position.is_within_bounds(self.size) && !self.is_playable(position)
    }

    /// Iterates playable cells in row-major order.
    pub fn playable_cells(self) -> impl Iterator<Item = Position> {
        let border = i32::from(self.border);
        let right = i32::from(self.size.width) - border;
        let bottom = i32::from(self.size.height) - border;

        (border..bottom).flat_map(move |y| (border..right).map(move |x| Position { x, y }))
    }

    /// Returns the number of playable cells.
    #[must_use]
    pub fn playable_cell_count(self) -> usize {
        let inset = 2 * usize::from(self.border);
        usize::from(self.size.width).saturating_sub(inset)
            * usize::from(self.size.height).saturating_sub(inset)
    }
}

/// Reasons a configuration cannot be used to create a session.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("cell size must be greater than zero")]
    ZeroCellSize,
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("starting snake length must be at least one")]
    ZeroStartLength,
    #[error("a {width}x{height} grid has no playable cells inside a border of {border}")]
    NoPlayableArea {
        width: u16,
        height: u16,
        border: u16,
    },
    #[error("starting snake at ({x}, {y}) with length {length} does not fit in the playable area")]
    StartOutOfBounds {
        x: i32,
        y: i32,
        length: u16,
    },
}

/// Session parameters accepted when a new game is created.
///
/// Arena dimensions are in display units and are divided by `cell_size` to
/// obtain the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub cell_size: u16,
    pub arena_width: u16,
    pub arena_height: u16,
    pub border_thickness: u16,
    pub tick_interval_ms: u64,
    pub food_reward: u32,
    pub start: Position,
    pub start_length: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            border_thickness: 0,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            food_reward: DEFAULT_FOOD_REWARD,
            start: DEFAULT_START,
            start_length: DEFAULT_START_LENGTH,
        }
    }
}

impl GameConfig {
    /// Returns the grid dimensions derived from arena size and cell size.
    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        let cell = self.cell_size.max(1);
        GridSize {
            width: self.arena_width / cell,
            height: self.arena_height / cell,
        }
    }

    #[must_use]
    pub fn arena(&self) -> Arena {
        Arena::new(self.grid_size(), self.border_thickness)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Checks that a session can be built from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.start_length == 0 {
            return Err(ConfigError::ZeroStartLength);
        }

        let arena = self.arena();
        if arena.playable_cell_count() == 0 {
            let size = arena.size();
            return Err(ConfigError::NoPlayableArea {
                width: size.width,
                height: size.height,
                border: self.border_thickness,
            });
        }

        // The body trails to the left of the start cell; all of it plus one
        // free cell for food must be playable.
        let tail = Position {
            x: self.start.x - (i32::from(self.start_length) - 1),
            y: self.start.y,
        };
        let fits = arena.is_playable(self.start)
            && arena.is_playable(tail)
            && arena.playable_cell_count() > usize::from(self.start_length);
        if !fits {
            return Err(ConfigError::StartOutOfBounds {
                x: self.start.x,
                y: self.start.y,
                length: self.start_length,
            });
        }

        Ok(())
    }

    /// Loads a configuration file, filling absent fields with defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the per-user configuration file, or defaults when there is none.
    pub fn load_user() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Returns the platform-correct user configuration path.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}
