use std::collections::BinaryHeap;

use pathviz_core::Point;

use crate::neighbors::Neighbors;
use crate::node::{Node, NodeGrid, NodeRef};

impl NodeGrid {
    /// Dijkstra's algorithm from `start` to `finish` with unit edge costs.
    ///
    /// Returns the nodes in the order they were finalised (popped with their
    /// minimum distance), ending with `finish` if it was reached. Nodes with
    /// equal distance are finalised in the order they were discovered.
    ///
    /// Expects a cleared run state; see [`NodeGrid::clear_run_state`].
    pub fn dijkstra(&mut self, start: Point, finish: Point) -> Vec<Point> {
        self.best_first(start, finish, |n| n.distance)
    }

    /// Shared driver for Dijkstra and A*: repeatedly finalise the open node
    /// with the lowest `priority` and relax its neighbors.
    pub(crate) fn best_first(
        &mut self,
        start: Point,
        finish: Point,
        priority: impl Fn(&Node) -> i32,
    ) -> Vec<Point> {
        let mut visited = Vec::new();
        let Some(si) = self.idx(start) else {
            return visited;
        };
        if self.nodes[si].is_wall {
            return visited;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        let mut seq = 0u64;
        self.nodes[si].distance = 0;
        open.push(NodeRef {
            idx: si,
            priority: priority(&self.nodes[si]),
            seq,
        });

        let mut nb = Neighbors::new();

        while let Some(current) = open.pop() {
            let ci = current.idx;
            // Skip stale entries left behind by a later improvement.
            if self.nodes[ci].is_visited {
                continue;
            }
            self.nodes[ci].is_visited = true;
            let cp = self.nodes[ci].pos();
            visited.push(cp);
            if cp == finish {
                break;
            }

            let next_g = self.nodes[ci].distance + 1;
            for &np in self.neighbors(cp, &mut nb) {
                let Some(ni) = self.bounds.index(np) else {
                    continue;
                };
                let n = &mut self.nodes[ni];
                if n.is_visited || next_g >= n.distance {
                    continue;
                }
                n.distance = next_g;
                n.previous = Some(cp);
                seq += 1;
                open.push(NodeRef {
                    idx: ni,
                    priority: priority(n),
                    seq,
                });
            }
        }

        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::UNREACHABLE;

    fn open_board(rows: i32, cols: i32, start: Point, finish: Point) -> NodeGrid {
        NodeGrid::new(rows, cols, start, finish).unwrap()
    }

    #[test]
    fn straight_corridor() {
        let mut g = open_board(1, 5, Point::new(0, 0), Point::new(0, 4));
        let visited = g.dijkstra(g.start(), g.finish());
        assert_eq!(visited, (0..5).map(|c| Point::new(0, c)).collect::<Vec<_>>());
        for c in 0..5 {
            assert_eq!(g.node(Point::new(0, c)).unwrap().distance(), c);
        }
        assert_eq!(g.path_order(), visited);
    }

    #[test]
    fn wall_blocks_single_row() {
        let mut g = open_board(1, 5, Point::new(0, 0), Point::new(0, 4));
        g.toggle_wall(Point::new(0, 2));
        let visited = g.dijkstra(g.start(), g.finish());
        assert_eq!(visited, vec![Point::new(0, 0), Point::new(0, 1)]);
        let finish = g.node(g.finish()).unwrap();
        assert_eq!(finish.distance(), UNREACHABLE);
        assert_eq!(finish.previous(), None);
        assert_eq!(g.path_order(), vec![g.finish()]);
    }

    #[test]
    fn detours_around_a_wall_line() {
        // Vertical wall in column 2 covering rows 0..=3 of a 5x5 board.
        let mut g = open_board(5, 5, Point::new(0, 0), Point::new(0, 4));
        for r in 0..4 {
            g.toggle_wall(Point::new(r, 2));
        }
        let visited = g.dijkstra(g.start(), g.finish());
        assert_eq!(visited.last(), Some(&g.finish()));
        // Down 4, across 4, up 4.
        assert_eq!(g.node(g.finish()).unwrap().distance(), 12);
        let path = g.path_order();
        assert_eq!(path.len(), 13);
        assert!(path.windows(2).all(|w| w[0].is_adjacent(w[1])));
        assert!(path.iter().all(|&p| g.is_passable(p)));
    }

    #[test]
    fn equal_distances_pop_in_discovery_order() {
        let mut g = open_board(3, 3, Point::new(1, 1), Point::new(2, 2));
        let visited = g.dijkstra(g.start(), g.finish());
        // Start, then its neighbors up, right, down, left.
        assert_eq!(
            &visited[..5],
            &[
                Point::new(1, 1),
                Point::new(0, 1),
                Point::new(1, 2),
                Point::new(2, 1),
                Point::new(1, 0),
            ]
        );
    }

    #[test]
    fn exhausts_reachable_area_when_enclosed() {
        let mut g = open_board(3, 3, Point::new(0, 0), Point::new(2, 2));
        g.toggle_wall(Point::new(1, 2));
        g.toggle_wall(Point::new(2, 1));
        let visited = g.dijkstra(g.start(), g.finish());
        assert_eq!(visited.len(), 6);
        assert!(!visited.contains(&g.finish()));
        assert!(visited.iter().all(|&p| g.is_passable(p)));
    }
}
