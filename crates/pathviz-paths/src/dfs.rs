use pathviz_core::Point;

use crate::neighbors::Neighbors;
use crate::node::NodeGrid;

impl NodeGrid {
    /// Depth-first search from `start` to `finish` using an explicit stack.
    ///
    /// Directions are tried clockwise from the top (up, right, down, left),
    /// going as deep as possible before backtracking. A node's predecessor is
    /// fixed the first time it is visited, so the path found is valid but
    /// usually not the shortest.
    pub fn dfs(&mut self, start: Point, finish: Point) -> Vec<Point> {
        let mut visited = Vec::new();
        match self.node(start) {
            Some(n) if !n.is_wall => {}
            _ => return visited,
        }

        let mut stack: Vec<(Point, Option<Point>)> = vec![(start, None)];
        let mut nb = Neighbors::new();

        while let Some((cp, parent)) = stack.pop() {
            let Some(ci) = self.idx(cp) else {
                continue;
            };
            if self.nodes[ci].is_visited {
                continue;
            }
            let distance = match parent.and_then(|pp| self.node(pp)) {
                Some(pn) => pn.distance + 1,
                None => 0,
            };
            let n = &mut self.nodes[ci];
            n.is_visited = true;
            n.previous = parent;
            n.distance = distance;
            visited.push(cp);
            if cp == finish {
                break;
            }

            let fresh = self.neighbors(cp, &mut nb);
            // Reversed so the first direction ends up on top of the stack.
            stack.extend(
                fresh
                    .iter()
                    .rev()
                    .filter(|&&np| self.node(np).is_some_and(|n| !n.is_visited))
                    .map(|&np| (np, Some(cp))),
            );
        }

        visited
    }
}
