use pathviz_core::{Label, Point, Range};
use thiserror::Error;

use crate::distance::manhattan;
use crate::neighbors::Neighbors;

/// Sentinel distance meaning "not discovered yet".
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// One cell of the board.
///
/// The edit flags (`start`, `finish`, `wall`) are mutually exclusive and can
/// only be changed through [`NodeGrid`], which keeps them consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pos: Point,
    pub(crate) is_start: bool,
    pub(crate) is_finish: bool,
    pub(crate) is_wall: bool,
    pub(crate) is_visited: bool,
    pub(crate) distance: i32,
    pub(crate) heuristic: i32,
    pub(crate) previous: Option<Point>,
}

impl Node {
    /// Build a node at `pos` for a board whose endpoints are `start` and
    /// `finish`.
    pub fn new(pos: Point, start: Point, finish: Point) -> Self {
        Self {
            pos,
            is_start: pos == start,
            is_finish: pos == finish,
            is_wall: false,
            is_visited: false,
            distance: UNREACHABLE,
            heuristic: manhattan(pos, finish),
            previous: None,
        }
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.pos.row
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.pos.col
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.is_start
    }

    #[inline]
    pub fn is_finish(&self) -> bool {
        self.is_finish
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.is_wall
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.is_visited
    }

    /// Best known cost from the start, [`UNREACHABLE`] if undiscovered.
    #[inline]
    pub fn distance(&self) -> i32 {
        self.distance
    }

    /// Manhattan distance to the current finish.
    #[inline]
    pub fn heuristic(&self) -> i32 {
        self.heuristic
    }

    /// Predecessor on the best known path.
    #[inline]
    pub fn previous(&self) -> Option<Point> {
        self.previous
    }

    /// The persistent label this node shows when no replay painted over it.
    pub fn label(&self) -> Label {
        if self.is_start {
            Label::Start
        } else if self.is_finish {
            Label::Finish
        } else if self.is_wall {
            Label::Wall
        } else {
            Label::None
        }
    }

    fn reset_run_state(&mut self, finish: Point) {
        self.is_visited = false;
        self.distance = UNREACHABLE;
        self.previous = None;
        self.heuristic = manhattan(self.pos, finish);
    }
}

// ---------------------------------------------------------------------------
// Open-list entry
// ---------------------------------------------------------------------------

/// Reference into the node array, ordered for use in a `BinaryHeap`.
///
/// Lower `priority` pops first; equal priorities pop in insertion order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) priority: i32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// NodeGrid
// ---------------------------------------------------------------------------

/// Reasons a board cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("board must have at least one row and one column, got {rows}x{cols}")]
    Empty { rows: i32, cols: i32 },
    #[error("{which} {pos} lies outside the {rows}x{cols} board")]
    OutOfBounds {
        which: &'static str,
        pos: Point,
        rows: i32,
        cols: i32,
    },
    #[error("start and finish must differ, both are {0}")]
    SameEndpoints(Point),
}

/// The board: every node in row-major order plus the canonical endpoints.
///
/// Back-references between nodes are plain [`Point`]s resolved through the
/// grid, never owning links.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeGrid {
    pub(crate) nodes: Vec<Node>,
    pub(crate) bounds: Range,
    start: Point,
    finish: Point,
}

impl NodeGrid {
    /// Build a `rows × cols` board with the given endpoints and no walls.
    pub fn new(rows: i32, cols: i32, start: Point, finish: Point) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::Empty { rows, cols });
        }
        let bounds = Range::sized(rows, cols);
        for (which, pos) in [("start", start), ("finish", finish)] {
            if !bounds.contains(pos) {
                return Err(GridError::OutOfBounds {
                    which,
                    pos,
                    rows,
                    cols,
                });
            }
        }
        if start == finish {
            return Err(GridError::SameEndpoints(start));
        }
        let nodes = bounds.iter().map(|p| Node::new(p, start, finish)).collect();
        Ok(Self {
            nodes,
            bounds,
            start,
            finish,
        })
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows()
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols()
    }

    /// Current start coordinate.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Current finish coordinate.
    #[inline]
    pub fn finish(&self) -> Point {
        self.finish
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The node at `p`, or `None` outside the board.
    #[inline]
    pub fn node(&self, p: Point) -> Option<&Node> {
        self.bounds.index(p).map(|i| &self.nodes[i])
    }

    /// All nodes in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        self.bounds.index(p)
    }

    /// Whether `p` is on the board and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.node(p).is_some_and(|n| !n.is_wall)
    }

    /// In-range, non-wall neighbors of `p` in the order up, right, down, left,
    /// collected into the reusable buffer `nb`.
    pub fn neighbors<'a>(&self, p: Point, nb: &'a mut Neighbors) -> &'a [Point] {
        nb.cardinal(p, |q| self.is_passable(q))
    }

    /// Positions of every wall, row-major.
    pub fn walls(&self) -> Vec<Point> {
        self.nodes.iter().filter(|n| n.is_wall).map(Node::pos).collect()
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Invert the wall flag at `p`.
    ///
    /// Start, finish and off-board positions are left untouched; the return
    /// value says whether anything changed.
    pub fn toggle_wall(&mut self, p: Point) -> bool {
        match self.node(p) {
            Some(n) => {
                let wall = !n.is_wall;
                self.set_wall(p, wall)
            }
            None => false,
        }
    }

    /// Force the wall flag at `p`. Returns whether the flag changed.
    pub fn set_wall(&mut self, p: Point, wall: bool) -> bool {
        let Some(i) = self.idx(p) else {
            return false;
        };
        let n = &mut self.nodes[i];
        if n.is_start || n.is_finish || n.is_wall == wall {
            return false;
        }
        n.is_wall = wall;
        true
    }

    /// Move the start marker to `p`.
    ///
    /// Refused (returns `false`) when `p` is off the board, a wall, or the
    /// finish.
    pub fn move_start(&mut self, p: Point) -> bool {
        let Some(to) = self.idx(p) else {
            return false;
        };
        if self.nodes[to].is_wall || self.nodes[to].is_finish {
            return false;
        }
        if let Some(from) = self.idx(self.start) {
            self.nodes[from].is_start = false;
        }
        self.nodes[to].is_start = true;
        self.start = p;
        true
    }

    /// Move the finish marker to `p` and recompute every heuristic.
    ///
    /// Refused under the same conditions as [`move_start`](Self::move_start).
    pub fn move_finish(&mut self, p: Point) -> bool {
        let Some(to) = self.idx(p) else {
            return false;
        };
        if self.nodes[to].is_wall || self.nodes[to].is_start {
            return false;
        }
        if let Some(from) = self.idx(self.finish) {
            self.nodes[from].is_finish = false;
        }
        self.nodes[to].is_finish = true;
        self.finish = p;
        for n in &mut self.nodes {
            n.heuristic = manhattan(n.pos, p);
        }
        true
    }

    /// Forget everything a search wrote: visited flags, distances and
    /// predecessors. Heuristics are recomputed; edit flags are kept.
    pub fn clear_run_state(&mut self) {
        let finish = self.finish;
        for n in &mut self.nodes {
            n.reset_run_state(finish);
        }
    }

    /// Remove every wall. Endpoints are never walls, so they are unaffected.
    pub fn clear_walls(&mut self) {
        for n in &mut self.nodes {
            n.is_wall = false;
        }
    }

    // -----------------------------------------------------------------------
    // Search support
    // -----------------------------------------------------------------------

    /// Walk `previous` links back from the finish.
    ///
    /// Returns the nodes from start to finish, or just `[finish]` when the
    /// last search never reached it.
    pub fn path_order(&self) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = Some(self.finish);
        while let Some(p) = cur {
            // A well-formed predecessor tree is never longer than the board.
            if path.len() > self.nodes.len() {
                log::warn!("predecessor chain from {} does not terminate", self.finish);
                break;
            }
            path.push(p);
            cur = self.node(p).and_then(Node::previous);
        }
        path.reverse();
        path
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn node_grid_round_trip() {
        let mut g = NodeGrid::new(3, 3, Point::ZERO, Point::new(2, 2)).unwrap();
        g.toggle_wall(Point::new(1, 1));
        let json = serde_json::to_string(&g).unwrap();
        let back: NodeGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }
}
