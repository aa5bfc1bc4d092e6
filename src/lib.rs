//! Minimum s-t cuts computed with the Boykov–Kolmogorov dynamic-tree max-flow algorithm.

pub mod error;
pub mod generate;
pub mod graph;
pub mod partition;
pub mod solver;
pub mod tree;

pub use error::{Error, Result};
pub use graph::{Capacity, FlowGraph, NodeId};
pub use partition::MinCut;
pub use solver::{BkSolver, MinCutSolver};

/// Minimum cut between `s` and `t`. The graph is consumed by the solve.
pub fn min_cut<C: Capacity>(graph: FlowGraph<C>, s: NodeId, t: NodeId) -> Result<MinCut<C>> {
    BkSolver::min_cut(graph, s, t)
}
