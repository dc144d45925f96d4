//! Graph searches on a 4-connected grid of nodes.
//!
//! The board is a [`NodeGrid`]: one [`Node`] per cell with wall, visited,
//! distance and predecessor state. Four searches run on it:
//!
//! - **Dijkstra** with unit costs ([`NodeGrid::dijkstra`])
//! - **A\*** with the Manhattan heuristic ([`NodeGrid::astar`])
//! - **BFS** ([`NodeGrid::bfs`])
//! - **DFS**, iterative ([`NodeGrid::dfs`])
//!
//! Each returns the order in which nodes were visited, so callers can
//! animate the exploration, and leaves predecessor links behind for
//! [`NodeGrid::path_order`]. [`Algorithm`] ties the four together.
//!
//! Neighbors are always considered clockwise from the top: up, right, down,
//! left. Ties in the priority queue are broken by discovery order, so every
//! search is deterministic.

mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod distance;
mod neighbors;
mod node;
mod search;

pub use distance::manhattan;
pub use neighbors::Neighbors;
pub use node::{GridError, Node, NodeGrid, UNREACHABLE};
pub use search::{Algorithm, ParseAlgorithmError, SearchOutcome};
