use std::collections::VecDeque;

use pathviz_core::Point;

use crate::neighbors::Neighbors;
use crate::node::NodeGrid;

impl NodeGrid {
    /// Breadth-first search from `start` to `finish`.
    ///
    /// Nodes are marked visited, and get their predecessor and distance,
    /// when they are *enqueued*; that is what makes the predecessor tree a
    /// shortest-path tree. The returned order is the dequeue order, ending
    /// with `finish` when it was reached.
    pub fn bfs(&mut self, start: Point, finish: Point) -> Vec<Point> {
        let mut visited = Vec::new();
        let Some(si) = self.idx(start) else {
            return visited;
        };
        if self.nodes[si].is_wall {
            return visited;
        }

        self.nodes[si].is_visited = true;
        self.nodes[si].distance = 0;
        let mut queue: VecDeque<usize> = VecDeque::from([si]);
        let mut nb = Neighbors::new();

        while let Some(ci) = queue.pop_front() {
            let cp = self.nodes[ci].pos();
            visited.push(cp);
            if cp == finish {
                break;
            }

            let next_d = self.nodes[ci].distance + 1;
            for &np in self.neighbors(cp, &mut nb) {
                let Some(ni) = self.bounds.index(np) else {
                    continue;
                };
                let n = &mut self.nodes[ni];
                if n.is_visited {
                    continue;
                }
                n.is_visited = true;
                n.previous = Some(cp);
                n.distance = next_d;
                queue.push_back(ni);
            }
        }

        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::UNREACHABLE;

    fn corridor() -> NodeGrid {
        NodeGrid::new(1, 5, Point::new(0, 0), Point::new(0, 4)).unwrap()
    }

    #[test]
    fn open_corridor_scenario() {
        let mut g = corridor();
        let visited = g.bfs(g.start(), g.finish());
        let cols: Vec<_> = (0..5).map(|c| Point::new(0, c)).collect();
        assert_eq!(visited, cols);
        assert_eq!(g.path_order(), cols);
        for c in 0..5 {
            assert_eq!(g.node(Point::new(0, c)).unwrap().distance(), c);
        }
    }

    #[test]
    fn walled_corridor_scenario() {
        let mut g = corridor();
        g.toggle_wall(Point::new(0, 2));
        let visited = g.bfs(g.start(), g.finish());
        assert_eq!(visited, vec![Point::new(0, 0), Point::new(0, 1)]);
        assert_eq!(g.node(g.finish()).unwrap().distance(), UNREACHABLE);
        assert_eq!(g.path_order(), vec![g.finish()]);
    }

    #[test]
    fn shortest_path_around_obstacle() {
        let mut g = NodeGrid::new(6, 6, Point::new(0, 0), Point::new(5, 5)).unwrap();
        // Horizontal wall in row 2 leaving column 5 open.
        for c in 0..5 {
            g.toggle_wall(Point::new(2, c));
        }
        let visited = g.bfs(g.start(), g.finish());
        assert!(visited.iter().all(|&p| g.is_passable(p)));
        assert_eq!(g.node(g.finish()).unwrap().distance(), 10);
        let path = g.path_order();
        assert_eq!(path.first(), Some(&g.start()));
        assert_eq!(path.last(), Some(&g.finish()));
        assert_eq!(path.len(), 11);
        assert!(path.windows(2).all(|w| w[0].is_adjacent(w[1])));
    }

    #[test]
    fn distances_grow_by_layers() {
        let mut g = NodeGrid::new(5, 5, Point::new(2, 2), Point::new(4, 4)).unwrap();
        let visited = g.bfs(g.start(), g.finish());
        let dists: Vec<_> = visited
            .iter()
            .map(|&p| g.node(p).unwrap().distance())
            .collect();
        assert!(dists.windows(2).all(|w| w[0] <= w[1]));
    }
}
