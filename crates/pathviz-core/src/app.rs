//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::grid::{Frame, Grid, compute_frame, full_frame};
use crate::messages::Msg;

/// Longest wait for command results before the driver is polled again.
pub const INPUT_POLL: Duration = Duration::from_millis(16);

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A simple cooperative-cancellation token backed by an [`AtomicBool`].
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Effect / Cmd
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
pub enum Effect {
    /// A one-shot command that produces an optional follow-up message.
    ///
    /// Commands run off the model thread; their message is delivered back
    /// through [`Model::update`].
    Cmd(Box<dyn FnOnce() -> Option<Msg> + Send>),
    /// Signal the application loop to stop.
    End,
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cmd(_) => f.write_str("Effect::Cmd(..)"),
            Self::End => f.write_str("Effect::End"),
        }
    }
}

/// Convenience constructor for a [`Effect::Cmd`].
pub fn cmd<F>(f: F) -> Effect
where
    F: FnOnce() -> Option<Msg> + Send + 'static,
{
    Effect::Cmd(Box::new(f))
}

// ---------------------------------------------------------------------------
// Model trait
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `grid`.
    fn draw(&self, grid: &mut Grid);
}

// ---------------------------------------------------------------------------
// Driver trait
// ---------------------------------------------------------------------------

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Send any input that is already available through `tx`.
    ///
    /// Must not block: the loop paces itself by waiting on command results
    /// for up to [`INPUT_POLL`] between polls.
    fn poll_msgs(&mut self, ctx: &Context, tx: Sender<Msg>)
    -> Result<(), Box<dyn std::error::Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Clean up / restore the screen.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub rows: i32,
    pub cols: i32,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    rows: i32,
    cols: i32,
}

impl<M: Model, D: Driver> App<M, D> {
    /// Create a new application from a configuration.
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            rows: config.rows,
            cols: config.cols,
        }
    }

    /// Borrow the model, e.g. to inspect it after [`run`](App::run).
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the main Model-View-Update loop.
    ///
    /// 1. Initialises the driver.
    /// 2. Sends `Msg::Init` through the model.
    /// 3. Enters the event loop: poll → update → draw → diff → flush, then
    ///    waits up to [`INPUT_POLL`] for a command result.
    /// 4. Stops when the model returns `Effect::End` or a `Msg::Quit`
    ///    arrives.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;
        let result = self.event_loop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        let mut prev_grid = Grid::new(self.rows, self.cols);
        let mut curr_grid = Grid::new(self.rows, self.cols);

        self.model.draw(&mut curr_grid);
        self.driver.flush(full_frame(&curr_grid))?;
        prev_grid.copy_from(&curr_grid);

        self.process_pending(None, &rx, &ctx, &tx, &mut prev_grid, &mut curr_grid)?;

        while !ctx.is_done() {
            self.driver.poll_msgs(&ctx, tx.clone())?;
            if ctx.is_done() {
                break;
            }
            self.process_pending(None, &rx, &ctx, &tx, &mut prev_grid, &mut curr_grid)?;
            if ctx.is_done() {
                break;
            }
            // A command result wakes the loop as soon as it is sent, so replay
            // pacing does not depend on how often input is polled.
            match rx.recv_timeout(INPUT_POLL) {
                Ok(msg) => self.process_pending(
                    Some(msg),
                    &rx,
                    &ctx,
                    &tx,
                    &mut prev_grid,
                    &mut curr_grid,
                )?,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        Ok(())
    }

    /// Handle `first` and every queued message, then draw, diff, and flush.
    fn process_pending(
        &mut self,
        first: Option<Msg>,
        rx: &Receiver<Msg>,
        ctx: &Context,
        tx: &Sender<Msg>,
        prev_grid: &mut Grid,
        curr_grid: &mut Grid,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        for msg in first.into_iter().chain(rx.try_iter()) {
            if matches!(msg, Msg::Quit) {
                log::debug!("quit requested");
                ctx.cancel();
                return Ok(());
            }
            if let Some(effect) = self.model.update(msg) {
                if Self::handle_effect(effect, ctx, tx) {
                    return Ok(());
                }
            }
            needs_draw = true;
        }

        if needs_draw {
            self.model.draw(curr_grid);
            let frame = compute_frame(prev_grid, curr_grid);
            if !frame.is_empty() {
                self.driver.flush(frame)?;
            }
            prev_grid.copy_from(curr_grid);
        }

        Ok(())
    }

    /// Returns `true` if the app should stop.
    fn handle_effect(effect: Effect, ctx: &Context, tx: &Sender<Msg>) -> bool {
        match effect {
            Effect::End => {
                log::debug!("model ended the app loop");
                ctx.cancel();
                true
            }
            Effect::Cmd(f) => {
                let tx = tx.clone();
                thread::spawn(move || {
                    if let Some(msg) = f() {
                        // The receiver is gone once the app stopped.
                        tx.send(msg).ok();
                    }
                });
                false
            }
        }
    }
}
