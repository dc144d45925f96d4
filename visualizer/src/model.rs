//! Elm-architecture Model: terminal keys and mouse to engine actions.

use pathviz_core::{
    Point,
    app::{Effect, Model},
    grid::Grid,
    messages::{Key, MouseAction, Msg},
};
use pathviz_paths::Algorithm;

use crate::config::Speed;
use crate::edit::Pointer;
use crate::engine::{Engine, ReplayTick};

/// The visualizer model.
pub struct VisualizerModel {
    engine: Engine,
    /// Main button held since a press on the board.
    pressed: bool,
    /// Last board cell the pointer was over while pressed.
    hover: Option<Point>,
}

impl VisualizerModel {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            pressed: false,
            hover: None,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

impl Model for VisualizerModel {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => None,
            Msg::KeyDown { key } => self.handle_key(key),
            Msg::Mouse { action, pos } => {
                self.handle_mouse(action, pos);
                None
            }
            Msg::Quit => Some(Effect::End),
            Msg::Custom(_) => {
                let tick = *msg.downcast_ref::<ReplayTick>()?;
                self.engine.tick(tick)
            }
        }
    }

    fn draw(&self, grid: &mut Grid) {
        self.engine.draw(grid);
    }
}

impl VisualizerModel {
    fn handle_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.engine.select_algorithm(Algorithm::ALL[idx]);
                None
            }
            Key::Enter | Key::Char('r') => self.engine.run(),
            Key::Char('c') => {
                self.engine.clear_grid();
                None
            }
            Key::Char('w') => {
                self.engine.clear_walls();
                None
            }
            Key::Char('m') => {
                self.engine.select_maze(self.engine.maze().next());
                None
            }
            Key::Char('g') => self.engine.generate_maze(),
            Key::Char('f') => {
                self.engine.set_speed(Speed::Fast);
                None
            }
            Key::Char('a') => {
                self.engine.set_speed(Speed::Average);
                None
            }
            Key::Char('s') => {
                self.engine.set_speed(Speed::Slow);
                None
            }
            Key::Char('q') | Key::Escape => Some(Effect::End),
            _ => None,
        }
    }

    /// Turn raw mouse input into down/enter/up/leave pointer events.
    fn handle_mouse(&mut self, action: MouseAction, pos: Point) {
        let on_board = self.engine.canvas().contains(pos);
        match action {
            MouseAction::Main if on_board => {
                self.pressed = true;
                self.hover = Some(pos);
                self.engine.pointer(Pointer::Down(pos));
            }
            MouseAction::Move if self.pressed => {
                if !on_board {
                    self.pressed = false;
                    self.hover = None;
                    self.engine.pointer(Pointer::Leave);
                } else if self.hover != Some(pos) {
                    self.hover = Some(pos);
                    self.engine.pointer(Pointer::Enter(pos));
                }
            }
            MouseAction::Release if self.pressed => {
                self.pressed = false;
                self.hover = None;
                self.engine.pointer(Pointer::Up(pos));
            }
            _ => {}
        }
    }
}
