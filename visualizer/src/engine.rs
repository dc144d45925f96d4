//! The visualizer engine: board, canvas, edit state and replay scheduling.
//!
//! All control-surface actions live here. Replays advance one step per
//! tick; a tick is an [`Effect::Cmd`] that sleeps for the step's delay and
//! answers with a [`ReplayTick`] carrying the sequence number it was issued
//! with, so ticks from an earlier playback are recognised and dropped.

use std::thread;
use std::time::Duration;

use pathviz_core::{Effect, Grid, Label, Msg, cmd};
use pathviz_maze::{MazeGen, MazeKind};
use pathviz_paths::{Algorithm, NodeGrid, SearchOutcome};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{ConfigError, EngineConfig, Speed};
use crate::edit::{self, EditState, Pointer};
use crate::replay::{Playback, Step, Timeline, Timed};

/// Tick message delivered back to the model after a step delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReplayTick(u64);

/// Summary of the last finished search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub algorithm: Algorithm,
    pub visited: usize,
    /// Number of steps from start to finish, `None` when unreachable.
    pub path_len: Option<usize>,
}

pub struct Engine {
    config: EngineConfig,
    grid: NodeGrid,
    canvas: Grid,
    edit: EditState,
    algorithm: Algorithm,
    maze: MazeKind,
    speed: Speed,
    mazegen: MazeGen<StdRng>,
    timeline: Option<Timeline>,
    pending: Option<Step>,
    seq: u64,
    last_run: Option<RunSummary>,
}

impl Engine {
    /// Build an engine from a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let grid = config.build_grid()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut canvas = Grid::new(grid.rows(), grid.cols());
        for n in grid.nodes() {
            canvas.set(n.pos(), n.label());
        }
        log::info!(
            "engine ready: {}x{} board, start {}, finish {}",
            grid.rows(),
            grid.cols(),
            grid.start(),
            grid.finish()
        );
        Ok(Self {
            mazegen: MazeGen::new(grid.rows(), grid.cols(), rng),
            algorithm: config.algorithm,
            maze: config.maze,
            speed: config.speed,
            config,
            grid,
            canvas,
            edit: EditState::Idle,
            timeline: None,
            pending: None,
            seq: 0,
            last_run: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The node board.
    pub fn grid(&self) -> &NodeGrid {
        &self.grid
    }

    /// What every cell currently shows.
    pub fn canvas(&self) -> &Grid {
        &self.canvas
    }

    pub fn edit_state(&self) -> EditState {
        self.edit
    }

    /// Whether a search or maze replay is in flight.
    pub fn is_running(&self) -> bool {
        self.edit == EditState::Running
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn maze(&self) -> MazeKind {
        self.maze
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn last_run(&self) -> Option<RunSummary> {
        self.last_run
    }

    /// What is being replayed, if anything.
    pub fn playback(&self) -> Option<Playback> {
        self.timeline.as_ref().map(Timeline::kind)
    }

    // -----------------------------------------------------------------------
    // Control surface
    // -----------------------------------------------------------------------

    /// Choose the algorithm for the next [`run`](Self::run).
    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        log::debug!("algorithm: {algorithm}");
        self.algorithm = algorithm;
    }

    /// Choose the maze for the next [`generate_maze`](Self::generate_maze).
    pub fn select_maze(&mut self, maze: MazeKind) {
        log::debug!("maze: {maze}");
        self.maze = maze;
    }

    /// Pacing for replays started from now on.
    pub fn set_speed(&mut self, speed: Speed) {
        log::debug!("speed: {speed}");
        self.speed = speed;
    }

    /// Search with the selected algorithm and start replaying the result.
    ///
    /// Ignored while a replay is running.
    pub fn run(&mut self) -> Option<Effect> {
        if self.refuse("run") {
            return None;
        }
        self.clear_run_labels();
        let algorithm = self.algorithm;
        let SearchOutcome { visited, path } = algorithm.search(&mut self.grid);
        self.last_run = Some(RunSummary {
            algorithm,
            visited: visited.len(),
            path_len: (path.len() > 1).then(|| path.len() - 1),
        });
        log::info!(
            "{algorithm}: {} visited, path {:?}",
            visited.len(),
            self.last_run.and_then(|r| r.path_len)
        );
        let timeline = Timeline::search(visited, path, self.speed.delay(), self.config.path_delay());
        self.start_playback(timeline)
    }

    /// Clear visited and path state, keeping walls and endpoints.
    pub fn clear_grid(&mut self) {
        if self.refuse("clear grid") {
            return;
        }
        self.clear_run_labels();
    }

    /// Remove every wall.
    pub fn clear_walls(&mut self) {
        if self.refuse("clear walls") {
            return;
        }
        self.grid.clear_walls();
        self.canvas
            .map_cells(|_, l| if l == Label::Wall { Label::None } else { l });
    }

    /// Generate the selected maze and start replaying its walls.
    ///
    /// Ignored while a replay is running or when no maze is selected.
    pub fn generate_maze(&mut self) -> Option<Effect> {
        if self.refuse("generate maze") {
            return None;
        }
        if self.maze == MazeKind::None {
            log::debug!("no maze selected");
            return None;
        }
        self.clear_run_labels();
        let exclude = [self.grid.start(), self.grid.finish()];
        let walls = self
            .mazegen
            .generate(self.maze, self.config.wall_density, &exclude);
        log::info!("{} maze: {} wall toggles", self.maze, walls.len());
        self.start_playback(Timeline::maze(walls, self.speed.delay()))
    }

    /// Feed a pointer event to the edit state machine.
    pub fn pointer(&mut self, event: Pointer) {
        let t = edit::reduce(self.edit, event, &mut self.grid, &self.canvas);
        for (p, label) in t.paints {
            self.canvas.set(p, label);
        }
        if t.state != self.edit {
            log::trace!("edit: {:?} -> {:?}", self.edit, t.state);
        }
        self.edit = t.state;
    }

    /// Apply every remaining replay step at once, ignoring delays.
    pub fn finish_playback(&mut self) {
        while self.timeline.is_some() {
            self.advance();
        }
    }

    /// Copy the canvas and a status line into `grid`.
    pub fn draw(&self, grid: &mut Grid) {
        grid.copy_from(&self.canvas);
        grid.set_status(self.status());
    }

    /// One-line summary of the selections and the last run.
    pub fn status(&self) -> String {
        let mut s = format!(
            "{} | maze: {} | speed: {}",
            self.algorithm, self.maze, self.speed
        );
        match (self.playback(), self.last_run) {
            (Some(Playback::Search), _) => s.push_str(" | searching..."),
            (Some(Playback::Maze), _) => s.push_str(" | building maze..."),
            (None, Some(RunSummary { visited, path_len: Some(len), .. })) => {
                s.push_str(&format!(" | visited {visited}, path {len}"));
            }
            (None, Some(RunSummary { visited, path_len: None, .. })) => {
                s.push_str(&format!(" | visited {visited}, no path"));
            }
            (None, None) => {}
        }
        s
    }

    // -----------------------------------------------------------------------
    // Playback
    // -----------------------------------------------------------------------

    pub(crate) fn tick(&mut self, tick: ReplayTick) -> Option<Effect> {
        if tick.0 != self.seq || self.timeline.is_none() {
            log::trace!("stale tick {} (current {})", tick.0, self.seq);
            return None;
        }
        self.advance()
    }

    fn refuse(&self, what: &str) -> bool {
        if self.is_running() {
            log::debug!("{what} ignored while running");
        }
        self.is_running()
    }

    fn clear_run_labels(&mut self) {
        self.grid.clear_run_state();
        self.canvas
            .map_cells(|_, l| if l.is_transient() { Label::None } else { l });
    }

    fn start_playback(&mut self, timeline: Timeline) -> Option<Effect> {
        log::debug!("start {:?}", timeline);
        self.edit = EditState::Running;
        self.timeline = Some(timeline);
        self.pending = None;
        self.schedule_next()
    }

    /// Apply the pending step, if any, and schedule the one after it.
    fn advance(&mut self) -> Option<Effect> {
        if let Some(step) = self.pending.take() {
            self.apply(step);
        }
        self.schedule_next()
    }

    fn schedule_next(&mut self) -> Option<Effect> {
        let next = self.timeline.as_mut().and_then(Iterator::next);
        let Some(Timed { delay, step }) = next else {
            self.end_playback();
            return None;
        };
        self.pending = Some(step);
        self.seq += 1;
        Some(tick_effect(delay, self.seq))
    }

    fn end_playback(&mut self) {
        if let Some(tl) = self.timeline.take() {
            log::debug!("{:?} playback done", tl.kind());
        }
        self.pending = None;
        self.edit = EditState::Idle;
    }

    fn apply(&mut self, step: Step) {
        match step {
            Step::Paint { pos, label } => {
                if !self.canvas.at(pos).is_endpoint() {
                    self.canvas.set(pos, label);
                }
            }
            Step::ToggleWall(pos) => {
                if pos == self.grid.start() || pos == self.grid.finish() {
                    return;
                }
                if self.grid.toggle_wall(pos) {
                    let label = self.grid.node(pos).map(|n| n.label()).unwrap_or_default();
                    self.canvas.set(pos, label);
                }
            }
        }
    }
}

fn tick_effect(delay: Duration, seq: u64) -> Effect {
    cmd(move || {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        Some(Msg::custom(ReplayTick(seq)))
    })
}
