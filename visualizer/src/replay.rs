//! Timed replay of search and maze output.
//!
//! A [`Timeline`] is a lazy, finite sequence of [`Timed`] steps. It is
//! consumed exactly once, either by the engine's tick loop or all at once
//! when playback is finished synchronously.

use std::fmt;
use std::time::Duration;

use pathviz_core::{Label, Point};

/// One visual change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Show `label` at `pos`, unless `pos` shows start or finish.
    Paint { pos: Point, label: Label },
    /// Toggle the wall at `pos`, unless it is start or finish.
    ToggleWall(Point),
}

/// A step and the pause that precedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timed {
    pub delay: Duration,
    pub step: Step,
}

/// What a timeline replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Search,
    Maze,
}

pub struct Timeline {
    kind: Playback,
    steps: Box<dyn Iterator<Item = Timed>>,
}

impl Timeline {
    /// Visited nodes at `visit_delay`, then the path at `path_delay`.
    pub fn search(
        visited: Vec<Point>,
        path: Vec<Point>,
        visit_delay: Duration,
        path_delay: Duration,
    ) -> Self {
        let paint = |delay: Duration, label: Label| {
            move |pos: Point| Timed {
                delay,
                step: Step::Paint { pos, label },
            }
        };
        let visits = visited
            .into_iter()
            .map(paint(visit_delay, Label::Visited));
        let path = path
            .into_iter()
            .map(paint(path_delay, Label::ShortestPath));
        Self {
            kind: Playback::Search,
            steps: Box::new(visits.chain(path)),
        }
    }

    /// Wall toggles at `delay` each.
    pub fn maze(walls: Vec<Point>, delay: Duration) -> Self {
        let steps = walls.into_iter().map(move |pos| Timed {
            delay,
            step: Step::ToggleWall(pos),
        });
        Self {
            kind: Playback::Maze,
            steps: Box::new(steps),
        }
    }

    pub fn kind(&self) -> Playback {
        self.kind
    }
}

impl Iterator for Timeline {
    type Item = Timed;

    fn next(&mut self) -> Option<Timed> {
        self.steps.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.steps.size_hint()
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("kind", &self.kind)
            .field("remaining", &self.steps.size_hint().0)
            .finish()
    }
}
