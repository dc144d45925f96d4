//! Engine configuration: board size, endpoints, pacing, maze density.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use pathviz_core::Point;
use pathviz_maze::{DEFAULT_DENSITY, MazeKind};
use pathviz_paths::{Algorithm, GridError, NodeGrid};
use thiserror::Error;

pub const DEFAULT_ROWS: i32 = 20;
pub const DEFAULT_COLS: i32 = 57;
pub const DEFAULT_START: Point = Point::new(5, 5);
pub const DEFAULT_FINISH: Point = Point::new(5, 15);
pub const DEFAULT_PATH_DELAY_MS: u64 = 30;

/// Replay speed for visited nodes and maze walls.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Speed {
    Fast,
    #[default]
    Average,
    Slow,
}

impl Speed {
    /// Pause before each replayed step.
    pub const fn delay(self) -> Duration {
        Duration::from_millis(match self {
            Self::Fast => 8,
            Self::Average => 35,
            Self::Slow => 80,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Average => "average",
            Self::Slow => "slow",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown speed `{0}`, expected fast, average or slow")]
pub struct ParseSpeedError(pub String);

impl FromStr for Speed {
    type Err = ParseSpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "average" => Ok(Self::Average),
            "slow" => Ok(Self::Slow),
            _ => Err(ParseSpeedError(s.to_string())),
        }
    }
}

/// Reasons an [`EngineConfig`] is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("wall density must lie in [0, 1], got {0}")]
    Density(f64),
}

/// Everything the engine needs at construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub rows: i32,
    pub cols: i32,
    pub start: Point,
    pub finish: Point,
    pub speed: Speed,
    /// Pause before each shortest-path step, in milliseconds.
    pub path_delay_ms: u64,
    /// Wall probability of the basic maze.
    pub wall_density: f64,
    /// Seed for maze generation; entropy from the OS when absent.
    pub seed: Option<u64>,
    pub algorithm: Algorithm,
    pub maze: MazeKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            start: DEFAULT_START,
            finish: DEFAULT_FINISH,
            speed: Speed::default(),
            path_delay_ms: DEFAULT_PATH_DELAY_MS,
            wall_density: DEFAULT_DENSITY,
            seed: None,
            algorithm: Algorithm::default(),
            maze: MazeKind::default(),
        }
    }
}

impl EngineConfig {
    pub fn path_delay(&self) -> Duration {
        Duration::from_millis(self.path_delay_ms)
    }

    /// Check the configuration without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_grid().map(|_| ())
    }

    /// Build the initial board: no walls, endpoints where configured.
    pub fn build_grid(&self) -> Result<NodeGrid, ConfigError> {
        if !(0.0..=1.0).contains(&self.wall_density) {
            return Err(ConfigError::Density(self.wall_density));
        }
        Ok(NodeGrid::new(self.rows, self.cols, self.start, self.finish)?)
    }
}
