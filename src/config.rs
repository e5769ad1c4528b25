use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cell::Cell;
use crate::grid::Grid;
use crate::heading::Heading;

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 40;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 30;

/// Default terminal columns drawn per grid cell.
pub const DEFAULT_CELL_COLUMNS: u16 = 2;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Interval shaved off per food eaten, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_STEP_MS: u64 = 3;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 60;

/// Problems found while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("grid {width}x{height} has no interior; both sides must be at least 3 cells")]
    NoInterior { width: u16, height: u16 },
    #[error("cells must be at least one terminal column wide")]
    ZeroCellColumns,
    #[error("minimum tick interval must be positive")]
    ZeroMinInterval,
    #[error("initial tick interval {initial_ms}ms is below the minimum {min_ms}ms")]
    IntervalBelowMinimum { initial_ms: u64, min_ms: u64 },
    #[error("starting body is empty")]
    EmptyStartBody,
    #[error("starting body segments {index} and {} are not adjacent", .index + 1)]
    StartBodyNotAdjacent { index: usize },
    #[error("starting body covers ({}, {}) more than once", .0.col, .0.row)]
    StartBodyOverlaps(Cell),
    #[error("starting body cell ({}, {}) is not inside the wall ring", .0.col, .0.row)]
    StartBodyOffInterior(Cell),
    #[error("starting heading {0:?} points back into the body")]
    StartHeadingReversesBody(Heading),
    #[error("initial food ({}, {}) is not inside the wall ring", .0.col, .0.row)]
    FoodNotInterior(Cell),
    #[error("initial food ({}, {}) lies on the starting body", .0.col, .0.row)]
    FoodOnStartBody(Cell),
}

/// Construction-time game constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_width: u16,
    pub grid_height: u16,
    /// Terminal columns per cell; only the renderer reads it.
    pub cell_columns: u16,
    pub initial_tick_interval_ms: u64,
    pub tick_interval_step_ms: u64,
    pub min_tick_interval_ms: u64,
    /// Starting body, head first.
    pub start_body: Vec<Cell>,
    pub start_heading: Heading,
    /// Fixed first food cell. When unset it is derived from the grid.
    pub initial_food: Option<Cell>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            cell_columns: DEFAULT_CELL_COLUMNS,
            initial_tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            tick_interval_step_ms: DEFAULT_TICK_INTERVAL_STEP_MS,
            min_tick_interval_ms: MIN_TICK_INTERVAL_MS,
            start_body: vec![Cell::new(7, 5), Cell::new(6, 5), Cell::new(5, 5)],
            start_heading: Heading::Right,
            initial_food: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    #[must_use]
    pub fn initial_tick_interval(&self) -> Duration {
        Duration::from_millis(self.initial_tick_interval_ms)
    }

    #[must_use]
    pub fn tick_interval_step(&self) -> Duration {
        Duration::from_millis(self.tick_interval_step_ms)
    }

    #[must_use]
    pub fn min_tick_interval(&self) -> Duration {
        Duration::from_millis(self.min_tick_interval_ms)
    }

    /// First food cell: the configured one, or a grid-relative interior cell
    /// (centre column, two thirds down) moved to the first free interior cell
    /// if the starting body covers it. Gives (20, 20) on the default grid.
    #[must_use]
    pub fn initial_food(&self) -> Cell {
        if let Some(food) = self.initial_food {
            return food;
        }

        let width = i32::from(self.grid_width);
        let height = i32::from(self.grid_height);
        let preferred = Cell::new(
            (width / 2).clamp(1, (width - 2).max(1)),
            (height * 2 / 3).clamp(1, (height - 2).max(1)),
        );
        if !self.start_body.contains(&preferred) {
            return preferred;
        }

        self.grid()
            .interior()
            .find(|cell| !self.start_body.contains(cell))
            .unwrap_or(preferred)
    }

    /// Loads a config from a JSON file.
    ///
    /// Returns defaults when the file does not exist. Returns `Err` when it
    /// exists but cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that a game built from this config starts in a legal state.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = self.grid();
        if grid.interior_cells() == 0 {
            return Err(ConfigError::NoInterior {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        if self.cell_columns == 0 {
            return Err(ConfigError::ZeroCellColumns);
        }

        if self.min_tick_interval_ms == 0 {
            return Err(ConfigError::ZeroMinInterval);
        }
        if self.initial_tick_interval_ms < self.min_tick_interval_ms {
            return Err(ConfigError::IntervalBelowMinimum {
                initial_ms: self.initial_tick_interval_ms,
                min_ms: self.min_tick_interval_ms,
            });
        }

        let Some(&head) = self.start_body.first() else {
            return Err(ConfigError::EmptyStartBody);
        };

        let mut seen = HashSet::new();
        for (index, cell) in self.start_body.iter().enumerate() {
            if !grid.is_interior(*cell) {
                return Err(ConfigError::StartBodyOffInterior(*cell));
            }
            if !seen.insert(*cell) {
                return Err(ConfigError::StartBodyOverlaps(*cell));
            }
            if let Some(next) = self.start_body.get(index + 1) {
                if cell.manhattan_distance(*next) != 1 {
                    return Err(ConfigError::StartBodyNotAdjacent { index });
                }
            }
        }

        if self.start_body.get(1) == Some(&head.offset(self.start_heading)) {
            return Err(ConfigError::StartHeadingReversesBody(self.start_heading));
        }

        let food = self.initial_food();
        if !grid.is_interior(food) {
            return Err(ConfigError::FoodNotInterior(food));
        }
        if seen.contains(&food) {
            return Err(ConfigError::FoodOnStartBody(food));
        }

        Ok(())
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn default_config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}
