//! Capacitated directed graph with the flow bookkeeping the solver mutates.
//!
//! Every edge `u -> v` that carries flow has a pair `v -> u` with the opposite flow. If the
//! pair is not an edge of the input, it is created as a *synthetic* edge of capacity zero
//! and removed again once its flow returns to zero.

use std::collections::HashMap;
use std::fmt::Debug;

use derivative::Derivative;
use indexmap::IndexSet;
use num_traits::{NumAssign, Signed};

use crate::error::{Error, Result};

pub type NodeId = usize;

/// Numbers usable as capacities and flows. Flows on synthetic edges are negative, so the
/// type must be signed.
pub trait Capacity: Copy + PartialOrd + Debug + NumAssign + Signed {}

impl<T> Capacity for T where T: Copy + PartialOrd + Debug + NumAssign + Signed {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Outgoing => Direction::Incoming,
            Direction::Incoming => Direction::Outgoing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<C> {
    pub capacity: C,
    pub flow: C,
    /// Reverse edge that only exists to hold the residual capacity of its pair.
    pub synthetic: bool,
}

impl<C: Capacity> Edge<C> {
    fn new(capacity: C, synthetic: bool) -> Self {
        Self {
            capacity,
            flow: C::zero(),
            synthetic,
        }
    }

    pub fn residual(&self) -> C {
        self.capacity - self.flow
    }

    pub fn is_saturated(&self) -> bool {
        !(self.residual() > C::zero())
    }
}

#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct FlowGraph<C> {
    edges: HashMap<(NodeId, NodeId), Edge<C>>,
    #[derivative(Debug = "ignore")]
    succ: Vec<IndexSet<NodeId>>,
    #[derivative(Debug = "ignore")]
    pred: Vec<IndexSet<NodeId>>,
    /// First input edge given a negative or unordered capacity.
    invalid: Option<(NodeId, NodeId, C)>,
}

impl<C: Capacity> Default for FlowGraph<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Capacity> FlowGraph<C> {
    pub fn new() -> Self {
        Self::with_nodes(0)
    }

    /// Graph with nodes `0..n` and no edges.
    pub fn with_nodes(n: usize) -> Self {
        Self {
            edges: HashMap::new(),
            succ: vec![IndexSet::new(); n],
            pred: vec![IndexSet::new(); n],
            invalid: None,
        }
    }

    /// Graph with nodes `0..n` and the given `(from, to, capacity)` edges.
    pub fn from_edges(n: usize, edges: impl IntoIterator<Item = (NodeId, NodeId, C)>) -> Self {
        let mut graph = Self::with_nodes(n);
        for (u, v, capacity) in edges {
            graph.add_edge(u, v, capacity);
        }
        graph
    }

    pub fn add_node(&mut self) -> NodeId {
        self.succ.push(IndexSet::new());
        self.pred.push(IndexSet::new());
        self.succ.len() - 1
    }

    pub fn node_count(&self) -> usize {
        self.succ.len()
    }

    /// Number of stored edges, synthetic ones included.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Adds an edge of the input graph. Panics if a node doesn't exist.
    /// Self-loops are dropped, and adding an existing edge again adds to its capacity.
    /// A negative capacity is remembered, even on a self-loop, and rejected by the solver.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, capacity: C) {
        assert!(
            u < self.node_count() && v < self.node_count(),
            "edge {u} -> {v} in a graph with {} nodes",
            self.node_count()
        );
        if !(capacity >= C::zero()) && self.invalid.is_none() {
            self.invalid = Some((u, v, capacity));
        }
        if u == v {
            return;
        }
        match self.edges.get_mut(&(u, v)) {
            Some(e) if e.synthetic => {
                e.capacity = capacity;
                e.synthetic = false;
            }
            Some(e) => e.capacity += capacity,
            None => {
                self.insert_edge(u, v, Edge::new(capacity, false));
            }
        }
    }

    /// The first edge added with a negative or unordered capacity, if any.
    pub fn invalid_capacity(&self) -> Option<(NodeId, NodeId, C)> {
        self.invalid
    }

    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.edges.contains_key(&(u, v))
    }

    pub fn edge(&self, u: NodeId, v: NodeId) -> Option<&Edge<C>> {
        self.edges.get(&(u, v))
    }

    /// Inserts or replaces an edge. Returns the replaced edge.
    pub fn insert_edge(&mut self, u: NodeId, v: NodeId, edge: Edge<C>) -> Option<Edge<C>> {
        let old = self.edges.insert((u, v), edge);
        if old.is_none() {
            self.succ[u].insert(v);
            self.pred[v].insert(u);
        }
        old
    }

    pub fn remove_edge(&mut self, u: NodeId, v: NodeId) -> Option<Edge<C>> {
        let old = self.edges.remove(&(u, v));
        if old.is_some() {
            self.succ[u].swap_remove(&v);
            self.pred[v].swap_remove(&u);
        }
        old
    }

    /// Capacity minus flow of `u -> v`, zero if there is no such edge.
    pub fn residual(&self, u: NodeId, v: NodeId) -> C {
        self.edge(u, v).map_or_else(C::zero, Edge::residual)
    }

    pub fn adjacent(&self, u: NodeId, direction: Direction) -> impl Iterator<Item = NodeId> + '_ {
        let set = match direction {
            Direction::Outgoing => &self.succ[u],
            Direction::Incoming => &self.pred[u],
        };
        set.iter().copied()
    }

    pub fn successors(&self, u: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacent(u, Direction::Outgoing)
    }

    pub fn predecessors(&self, u: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacent(u, Direction::Incoming)
    }

    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, &Edge<C>)> {
        self.edges.iter().map(|(&(u, v), e)| (u, v, e))
    }

    pub fn original_edges(&self) -> impl Iterator<Item = (NodeId, NodeId, &Edge<C>)> {
        self.edges().filter(|(_, _, e)| !e.synthetic)
    }

    /// Drops all flow, and with it every synthetic edge.
    pub fn clear_flow(&mut self) {
        let synthetic: Vec<_> = self
            .edges()
            .filter(|(_, _, e)| e.synthetic)
            .map(|(u, v, _)| (u, v))
            .collect();
        for (u, v) in synthetic {
            self.remove_edge(u, v);
        }
        for e in self.edges.values_mut() {
            e.flow = C::zero();
        }
    }

    /// Pushes `amount` of flow along `u -> v` and the opposite amount along its pair, which
    /// is created if needed. Synthetic edges whose flow returns to zero are removed.
    /// Returns whether `u -> v` is saturated afterwards.
    pub fn push_flow(&mut self, u: NodeId, v: NodeId, amount: C) -> Result<bool> {
        let forward = self
            .edges
            .get_mut(&(u, v))
            .ok_or_else(|| Error::invariant(format!("push on missing edge {u} -> {v}")))?;
        forward.flow += amount;
        let (flow, saturated, forward_synthetic) =
            (forward.flow, forward.is_saturated(), forward.synthetic);

        if !self.has_edge(v, u) {
            self.insert_edge(v, u, Edge::new(C::zero(), true));
        }
        let backward = self
            .edges
            .get_mut(&(v, u))
            .ok_or_else(|| Error::invariant(format!("missing pair of edge {u} -> {v}")))?;
        backward.flow = -flow;
        let backward_synthetic = backward.synthetic;

        if flow.is_zero() {
            if forward_synthetic {
                self.remove_edge(u, v);
            }
            if backward_synthetic {
                self.remove_edge(v, u);
            }
        }
        Ok(saturated)
    }

    /// Net flow leaving `u`.
    pub fn net_flow_out(&self, u: NodeId) -> C {
        self.successors(u)
            .filter_map(|v| self.edge(u, v))
            .fold(C::zero(), |acc, e| acc + e.flow)
    }

    /// Total capacity of input edges leaving the node set described by `inside`.
    pub fn cut_capacity(&self, inside: impl Fn(NodeId) -> bool) -> C {
        self.original_edges()
            .filter(|&(u, v, _)| inside(u) && !inside(v))
            .fold(C::zero(), |acc, (_, _, e)| acc + e.capacity)
    }

    /// Checks flow bounds and skew symmetry on every edge.
    pub fn check_flows(&self) -> Result<()> {
        for (u, v, e) in self.edges() {
            let pair = self.edge(v, u);
            if let Some(pair) = pair {
                if pair.flow != -e.flow {
                    return Err(Error::invariant(format!(
                        "flow {:?} on {u} -> {v} but {:?} on its pair",
                        e.flow, pair.flow
                    )));
                }
            }
            match (e.synthetic, pair) {
                (true, Some(pair)) if !pair.synthetic => {
                    if !e.capacity.is_zero() || !(e.flow < C::zero()) {
                        return Err(Error::invariant(format!(
                            "synthetic edge {u} -> {v} has capacity {:?} and flow {:?}",
                            e.capacity, e.flow
                        )));
                    }
                }
                (true, _) => {
                    return Err(Error::invariant(format!(
                        "synthetic edge {u} -> {v} has no input edge as pair"
                    )));
                }
                (false, pair) => {
                    let lower = match pair {
                        Some(pair) if !pair.synthetic => -pair.capacity,
                        _ => C::zero(),
                    };
                    if e.flow < lower || e.flow > e.capacity {
                        return Err(Error::invariant(format!(
                            "flow {:?} on {u} -> {v} outside [{lower:?}, {:?}]",
                            e.flow, e.capacity
                        )));
                    }
                    if pair.is_none() && !e.flow.is_zero() {
                        return Err(Error::invariant(format!(
                            "edge {u} -> {v} carries flow without a pair"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_merges_and_skips_loops() {
        let mut g = FlowGraph::with_nodes(3);
        g.add_edge(0, 1, 2);
        g.add_edge(0, 1, 3);
        g.add_edge(2, 2, 7);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge(0, 1).map(|e| e.capacity), Some(5));
        assert!(!g.has_edge(2, 2));
        assert_eq!(g.successors(0).collect::<Vec<_>>(), vec![1]);
        assert_eq!(g.predecessors(1).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn negative_capacities_are_remembered() {
        let g = FlowGraph::from_edges(2, [(0, 1, 5), (0, 1, -1)]);
        assert_eq!(g.edge(0, 1).map(|e| e.capacity), Some(4));
        assert_eq!(g.invalid_capacity(), Some((0, 1, -1)));

        let g = FlowGraph::from_edges(3, [(0, 1, 5), (1, 1, -4), (1, 2, -3)]);
        assert!(!g.has_edge(1, 1));
        assert_eq!(g.invalid_capacity(), Some((1, 1, -4)));

        let mut g = FlowGraph::from_edges(2, [(0, 1, 1.5)]);
        assert_eq!(g.invalid_capacity(), None);
        g.add_edge(1, 0, f64::NAN);
        assert!(matches!(g.invalid_capacity(), Some((1, 0, c)) if c.is_nan()));
    }

    #[test]
    fn synthetic_pair_lives_while_flow_does() {
        let mut g = FlowGraph::from_edges(2, [(0, 1, 4)]);
        assert!(!g.push_flow(0, 1, 3).unwrap());
        let back = *g.edge(1, 0).unwrap();
        assert!(back.synthetic);
        assert_eq!((back.capacity, back.flow, back.residual()), (0, -3, 3));
        g.check_flows().unwrap();

        assert!(g.push_flow(1, 0, 3).unwrap());
        assert!(!g.has_edge(1, 0));
        assert_eq!(g.edge(0, 1).unwrap().flow, 0);
        assert_eq!(g.predecessors(0).count(), 0);
        g.check_flows().unwrap();
    }

    #[test]
    fn saturation_is_reported() {
        let mut g = FlowGraph::from_edges(3, [(0, 1, 2), (1, 2, 5)]);
        assert!(g.push_flow(0, 1, 2).unwrap());
        assert!(!g.push_flow(1, 2, 2).unwrap());
        assert_eq!(g.residual(0, 1), 0);
        assert_eq!(g.residual(1, 0), 2);
        assert_eq!(g.net_flow_out(0), 2);
        assert_eq!(g.net_flow_out(1), 0);
    }

    #[test]
    fn antiparallel_edges_share_flow() {
        let mut g = FlowGraph::from_edges(2, [(0, 1, 2), (1, 0, 3)]);
        g.push_flow(1, 0, 3).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.edge(0, 1).unwrap().flow, -3);
        assert_eq!(g.residual(0, 1), 5);
        g.check_flows().unwrap();
        g.clear_flow();
        assert_eq!(g.residual(0, 1), 2);
    }

    #[test]
    fn missing_edge_push_is_an_error() {
        let mut g = FlowGraph::<i32>::with_nodes(2);
        assert!(matches!(
            g.push_flow(0, 1, 1),
            Err(Error::InternalInvariantViolation(_))
        ));
    }

    #[test]
    fn cut_capacity_counts_input_edges_only() {
        let mut g = FlowGraph::from_edges(3, [(0, 1, 2), (1, 2, 5), (2, 0, 9)]);
        g.push_flow(0, 1, 2).unwrap();
        assert_eq!(g.cut_capacity(|u| u == 0), 2);
        assert_eq!(g.cut_capacity(|u| u != 2), 5);
    }
}
