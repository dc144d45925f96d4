//! Pointer-driven board editing as a pure reducer.
//!
//! [`reduce`] takes the current [`EditState`], one [`Pointer`] event and the
//! board, applies the edit to the board and returns the next state together
//! with the label changes the caller must paint.

use pathviz_core::{Grid, Label, Point};
use pathviz_paths::{Node, NodeGrid};

/// Where the editor is in a drag gesture.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    /// Dragging the start marker, currently at `at`.
    DraggingStart { at: Point },
    /// Dragging the finish marker, currently at `at`.
    DraggingFinish { at: Point },
    /// Toggling walls under the pointer.
    DraggingWall,
    /// A replay is in flight; every pointer event is ignored.
    Running,
}

/// Pointer events in board coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pointer {
    Down(Point),
    Enter(Point),
    Up(Point),
    /// The pointer left the board.
    Leave,
}

/// Result of one reducer step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Transition {
    pub state: EditState,
    pub paints: Vec<(Point, Label)>,
}

impl Transition {
    fn stay(state: EditState) -> Self {
        Self {
            state,
            paints: Vec::new(),
        }
    }
}

/// Current label of the node at `p` as derived from its flags.
fn node_label(grid: &NodeGrid, p: Point) -> Label {
    grid.node(p).map(Node::label).unwrap_or_default()
}

/// Advance the edit state machine by one pointer event.
///
/// `canvas` is what the board currently shows; it is only read, to tell
/// whether a previous run left visited or path labels behind.
pub fn reduce(state: EditState, event: Pointer, grid: &mut NodeGrid, canvas: &Grid) -> Transition {
    match (state, event) {
        (EditState::Running, _) => Transition::stay(state),

        (EditState::Idle, Pointer::Down(p)) => press(p, grid, canvas),
        (EditState::Idle, _) => Transition::stay(state),

        (EditState::DraggingStart { at }, Pointer::Enter(p)) => {
            if p != at && grid.move_start(p) {
                Transition {
                    state: EditState::DraggingStart { at: p },
                    paints: vec![(at, node_label(grid, at)), (p, Label::Start)],
                }
            } else {
                Transition::stay(state)
            }
        }
        (EditState::DraggingFinish { at }, Pointer::Enter(p)) => {
            if p != at && grid.move_finish(p) {
                Transition {
                    state: EditState::DraggingFinish { at: p },
                    paints: vec![(at, node_label(grid, at)), (p, Label::Finish)],
                }
            } else {
                Transition::stay(state)
            }
        }
        (EditState::DraggingWall, Pointer::Enter(p)) => Transition {
            state,
            paints: toggle(p, grid),
        },

        // Releasing commits: the board already holds the live endpoints.
        (_, Pointer::Up(_)) => Transition::stay(EditState::Idle),
        (_, Pointer::Leave) => {
            log::trace!("pointer left the board, dropping {state:?}");
            Transition::stay(EditState::Idle)
        }
        // A second press while dragging means a release was lost.
        (_, Pointer::Down(p)) => press(p, grid, canvas),
    }
}

fn press(p: Point, grid: &mut NodeGrid, canvas: &Grid) -> Transition {
    let Some((is_start, is_finish)) = grid.node(p).map(|n| (n.is_start(), n.is_finish())) else {
        return Transition::stay(EditState::Idle);
    };
    if canvas.any(Label::is_transient) {
        grid.clear_run_state();
        let paints = canvas
            .iter()
            .filter(|&(_, label)| label.is_transient())
            .map(|(q, _)| (q, Label::None))
            .collect();
        return Transition {
            state: EditState::Idle,
            paints,
        };
    }
    if is_start {
        Transition::stay(EditState::DraggingStart { at: p })
    } else if is_finish {
        Transition::stay(EditState::DraggingFinish { at: p })
    } else {
        Transition {
            state: EditState::DraggingWall,
            paints: toggle(p, grid),
        }
    }
}

fn toggle(p: Point, grid: &mut NodeGrid) -> Vec<(Point, Label)> {
    if grid.toggle_wall(p) {
        vec![(p, node_label(grid, p))]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Board {
        grid: NodeGrid,
        canvas: Grid,
        state: EditState,
    }

    impl Board {
        fn new() -> Self {
            let grid = NodeGrid::new(5, 8, Point::new(2, 1), Point::new(2, 6)).unwrap();
            let mut canvas = Grid::new(5, 8);
            for n in grid.nodes() {
                canvas.set(n.pos(), n.label());
            }
            Self {
                grid,
                canvas,
                state: EditState::Idle,
            }
        }

        fn send(&mut self, ev: Pointer) -> Vec<(Point, Label)> {
            let t = reduce(self.state, ev, &mut self.grid, &self.canvas);
            for &(p, l) in &t.paints {
                self.canvas.set(p, l);
            }
            self.state = t.state;
            t.paints
        }

        fn wall(&self, r: i32, c: i32) -> bool {
            self.grid.node(Point::new(r, c)).unwrap().is_wall()
        }
    }

    #[test]
    fn press_on_empty_cell_toggles_and_drags_walls() {
        let mut b = Board::new();
        let paints = b.send(Pointer::Down(Point::new(0, 0)));
        assert_eq!(paints, vec![(Point::new(0, 0), Label::Wall)]);
        assert_eq!(b.state, EditState::DraggingWall);
        b.send(Pointer::Enter(Point::new(0, 1)));
        b.send(Pointer::Enter(Point::new(0, 0)));
        b.send(Pointer::Up(Point::new(0, 0)));
        assert_eq!(b.state, EditState::Idle);
        assert!(!b.wall(0, 0));
        assert!(b.wall(0, 1));
        assert_eq!(b.canvas.at(Point::new(0, 0)), Label::None);
        assert_eq!(b.canvas.at(Point::new(0, 1)), Label::Wall);
    }

    #[test]
    fn wall_drag_skips_endpoints() {
        let mut b = Board::new();
        b.send(Pointer::Down(Point::new(1, 1)));
        let paints = b.send(Pointer::Enter(Point::new(2, 1)));
        assert!(paints.is_empty());
        assert!(b.grid.node(Point::new(2, 1)).unwrap().is_start());
        assert_eq!(b.canvas.at(Point::new(2, 1)), Label::Start);
    }

    #[test]
    fn dragging_start_moves_it_live() {
        let mut b = Board::new();
        b.send(Pointer::Down(Point::new(2, 1)));
        assert_eq!(
            b.state,
            EditState::DraggingStart {
                at: Point::new(2, 1)
            }
        );
        let paints = b.send(Pointer::Enter(Point::new(2, 2)));
        assert_eq!(
            paints,
            vec![(Point::new(2, 1), Label::None), (Point::new(2, 2), Label::Start)]
        );
        b.send(Pointer::Enter(Point::new(3, 2)));
        b.send(Pointer::Up(Point::new(3, 2)));
        assert_eq!(b.state, EditState::Idle);
        assert_eq!(b.grid.start(), Point::new(3, 2));
        assert_eq!(b.canvas.count(Label::Start), 1);
        assert_eq!(b.canvas.at(Point::new(3, 2)), Label::Start);
    }

    #[test]
    fn endpoints_refuse_walls_and_each_other() {
        let mut b = Board::new();
        b.grid.toggle_wall(Point::new(2, 5));
        b.canvas.set(Point::new(2, 5), Label::Wall);
        b.send(Pointer::Down(Point::new(2, 6)));
        assert!(b.send(Pointer::Enter(Point::new(2, 5))).is_empty());
        assert_eq!(b.grid.finish(), Point::new(2, 6));
        // Still dragging from the old spot; the next free cell works.
        b.send(Pointer::Enter(Point::new(1, 6)));
        assert_eq!(b.grid.finish(), Point::new(1, 6));
        b.send(Pointer::Up(Point::new(1, 6)));

        b.send(Pointer::Down(Point::new(2, 1)));
        assert!(b.send(Pointer::Enter(Point::new(1, 6))).is_empty());
        assert_eq!(b.grid.start(), Point::new(2, 1));
    }

    #[test]
    fn moving_finish_updates_heuristics() {
        let mut b = Board::new();
        b.send(Pointer::Down(Point::new(2, 6)));
        b.send(Pointer::Enter(Point::new(4, 7)));
        b.send(Pointer::Up(Point::new(4, 7)));
        for n in b.grid.nodes() {
            assert_eq!(n.heuristic(), (4 - n.row()).abs() + (7 - n.col()).abs());
        }
    }

    #[test]
    fn leaving_the_board_keeps_live_moves() {
        let mut b = Board::new();
        b.send(Pointer::Down(Point::new(2, 1)));
        b.send(Pointer::Enter(Point::new(1, 1)));
        b.send(Pointer::Leave);
        assert_eq!(b.state, EditState::Idle);
        assert_eq!(b.grid.start(), Point::new(1, 1));
        // Entering again without a press does nothing.
        assert!(b.send(Pointer::Enter(Point::new(0, 1))).is_empty());
        assert_eq!(b.grid.start(), Point::new(1, 1));
    }

    #[test]
    fn dirty_board_is_cleared_instead_of_edited() {
        let mut b = Board::new();
        b.canvas.set(Point::new(0, 3), Label::Visited);
        b.canvas.set(Point::new(1, 3), Label::ShortestPath);
        let paints = b.send(Pointer::Down(Point::new(4, 4)));
        assert_eq!(b.state, EditState::Idle);
        assert_eq!(
            paints,
            vec![(Point::new(0, 3), Label::None), (Point::new(1, 3), Label::None)]
        );
        assert!(!b.wall(4, 4));
        // Next press edits normally.
        b.send(Pointer::Down(Point::new(4, 4)));
        assert!(b.wall(4, 4));
    }

    #[test]
    fn running_ignores_everything() {
        let mut b = Board::new();
        b.state = EditState::Running;
        for ev in [
            Pointer::Down(Point::new(0, 0)),
            Pointer::Enter(Point::new(0, 1)),
            Pointer::Up(Point::new(0, 1)),
            Pointer::Leave,
        ] {
            assert!(b.send(ev).is_empty());
            assert_eq!(b.state, EditState::Running);
        }
        assert!(b.grid.walls().is_empty());
    }

    #[test]
    fn presses_outside_are_ignored() {
        let mut b = Board::new();
        assert!(b.send(Pointer::Down(Point::new(9, 9))).is_empty());
        assert_eq!(b.state, EditState::Idle);
    }
}
