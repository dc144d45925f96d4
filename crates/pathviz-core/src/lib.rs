//! **pathviz-core**: shared types for the grid pathfinding visualizer.
//!
//! Geometry primitives, the display [`Label`] set, the label [`Grid`] that
//! mirrors the render surface, input messages, and the Elm-architecture
//! application loop that drivers plug into.

pub mod app;
pub mod geom;
pub mod grid;
pub mod label;
pub mod messages;

pub use app::{App, AppConfig, Context, Driver, Effect, Model, cmd};
pub use geom::{Point, Range};
pub use grid::{Frame, FrameCell, Grid};
pub use label::Label;
pub use messages::*;
