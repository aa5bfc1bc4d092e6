use std::collections::BTreeSet;

use crate::graph::{Capacity, FlowGraph, NodeId};

/// Minimum s-t cut: `s` is on the source side, `t` on the sink side, and the input edges
/// from the source side to the sink side have total capacity `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct MinCut<C> {
    pub value: C,
    pub source_side: BTreeSet<NodeId>,
    pub sink_side: BTreeSet<NodeId>,
}

impl<C: Capacity> MinCut<C> {
    pub fn is_source_side(&self, u: NodeId) -> bool {
        self.source_side.contains(&u)
    }

    /// Input edges of `graph` going from the source side to the sink side.
    pub fn crossing_edges<'a>(
        &'a self,
        graph: &'a FlowGraph<C>,
    ) -> impl Iterator<Item = (NodeId, NodeId)> + 'a {
        graph
            .original_edges()
            .filter(|&(u, v, _)| self.is_source_side(u) && !self.is_source_side(v))
            .map(|(u, v, _)| (u, v))
    }
}

/// Splits the nodes of a graph carrying maximum flow into those reachable from `s` over
/// edges with residual capacity, and all others.
pub fn extract<C: Capacity>(graph: &FlowGraph<C>, s: NodeId) -> MinCut<C> {
    let mut source_side = BTreeSet::from([s]);
    let mut stack = vec![s];
    while let Some(u) = stack.pop() {
        stack.extend(graph.successors(u).filter(|&v| {
            graph.residual(u, v) > C::zero() && source_side.insert(v)
        }));
    }
    let sink_side = (0..graph.node_count())
        .filter(|u| !source_side.contains(u))
        .collect();
    MinCut {
        value: graph.net_flow_out(s),
        source_side,
        sink_side,
    }
}
