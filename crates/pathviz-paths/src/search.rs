use std::fmt;
use std::str::FromStr;

use pathviz_core::Point;
use thiserror::Error;

use crate::node::NodeGrid;

/// The graph searches the visualizer can run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    Dijkstra,
    AStar,
    Bfs,
    Dfs,
}

/// Output of one search: what to animate, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Nodes in the order the algorithm visited them.
    pub visited: Vec<Point>,
    /// Start to finish by predecessor links; `[finish]` alone when the
    /// finish was not reached.
    pub path: Vec<Point>,
}

impl SearchOutcome {
    /// Whether the search reached the finish.
    pub fn found(&self) -> bool {
        self.path.len() > 1
    }
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [Self::Dijkstra, Self::AStar, Self::Bfs, Self::Dfs];

    /// Human readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dijkstra => "Dijkstra",
            Self::AStar => "AStar",
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
        }
    }

    /// Clear the previous run state of `grid`, search from its start to its
    /// finish and reconstruct the path.
    pub fn search(self, grid: &mut NodeGrid) -> SearchOutcome {
        grid.clear_run_state();
        let (start, finish) = (grid.start(), grid.finish());
        let visited = match self {
            Self::Dijkstra => grid.dijkstra(start, finish),
            Self::AStar => grid.astar(start, finish),
            Self::Bfs => grid.bfs(start, finish),
            Self::Dfs => grid.dfs(start, finish),
        };
        let path = grid.path_order();
        log::debug!(
            "{}: visited {} nodes from {} to {}, path length {}",
            self.name(),
            visited.len(),
            start,
            finish,
            path.len()
        );
        SearchOutcome { visited, path }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when an algorithm name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm `{0}`, expected one of Dijkstra, AStar, BFS, DFS")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Self::Dijkstra),
            "astar" | "a*" => Ok(Self::AStar),
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}
