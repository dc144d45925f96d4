use pathviz_core::Point;

use crate::node::NodeGrid;

impl NodeGrid {
    /// A* from `start` to `finish`.
    ///
    /// Identical to [`dijkstra`](NodeGrid::dijkstra) except that open nodes
    /// are ranked by `distance + heuristic`. Node distances still hold the
    /// true path cost, and the Manhattan heuristic never overestimates on a
    /// 4-connected unit grid, so the path found is a shortest one.
    pub fn astar(&mut self, start: Point, finish: Point) -> Vec<Point> {
        self.best_first(start, finish, |n| n.distance + n.heuristic)
    }
}
