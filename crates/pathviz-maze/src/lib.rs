//! Maze generation for the pathfinding visualizer.
//!
//! Generators produce ordered wall placements; applying and animating them
//! is up to the caller.

pub mod kind;
pub mod mapgen;

pub use kind::{MazeKind, ParseMazeKindError};
pub use mapgen::{DEFAULT_DENSITY, MIN_CHAMBER, MazeGen};
