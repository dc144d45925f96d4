//! pathviz: watch graph searches explore an editable grid.
//!
//! The [`Engine`] owns the board and everything shown on it. Pointer events
//! edit the board through the [`edit`] state machine; searches and mazes are
//! replayed step by step as a [`replay::Timeline`]. [`VisualizerModel`]
//! plugs the engine into the [`pathviz_core::App`] loop.

pub mod config;
pub mod edit;
pub mod engine;
pub mod model;
pub mod replay;

pub use config::{ConfigError, EngineConfig, ParseSpeedError, Speed};
pub use edit::{EditState, Pointer, Transition};
pub use engine::{Engine, RunSummary};
pub use model::VisualizerModel;
pub use replay::{Playback, Step, Timed, Timeline};
