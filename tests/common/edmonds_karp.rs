use std::collections::{BTreeSet, VecDeque};

use bk_mincut::{Capacity, Error, FlowGraph, MinCut, MinCutSolver, NodeId, Result};

/// Dummy implementation on a capacity matrix, shortest augmenting paths first.
#[derive(Debug)]
pub struct EdmondsKarp;

impl EdmondsKarp {
    /// Nodes reachable from s in the residual matrix, with the BFS predecessor of each.
    fn bfs<C: Capacity>(residual: &[Vec<C>], s: NodeId) -> Vec<Option<NodeId>> {
        let n = residual.len();
        let mut pred = vec![None; n];
        pred[s] = Some(s);
        let mut queue = VecDeque::from([s]);
        while let Some(u) = queue.pop_front() {
            for v in 0..n {
                if pred[v].is_none() && residual[u][v] > C::zero() {
                    pred[v] = Some(u);
                    queue.push_back(v);
                }
            }
        }
        pred
    }
}

impl<C: Capacity> MinCutSolver<C> for EdmondsKarp {
    fn min_cut(graph: FlowGraph<C>, s: NodeId, t: NodeId) -> Result<MinCut<C>> {
        let n = graph.node_count();
        if s == t || s >= n || t >= n {
            return Err(Error::InvalidTerminals { s, t, nodes: n });
        }
        let mut residual = vec![vec![C::zero(); n]; n];
        for (u, v, e) in graph.original_edges() {
            residual[u][v] += e.capacity;
        }
        let mut value = C::zero();
        loop {
            let pred = Self::bfs(&residual, s);
            if pred[t].is_none() {
                let source_side: BTreeSet<_> = (0..n).filter(|&u| pred[u].is_some()).collect();
                let sink_side = (0..n).filter(|u| !source_side.contains(u)).collect();
                return Ok(MinCut {
                    value,
                    source_side,
                    sink_side,
                });
            }
            let mut path = vec![t];
            while let Some(&v) = path.last().filter(|&&v| v != s) {
                path.push(pred[v].unwrap());
            }
            path.reverse();
            let bottleneck = path
                .windows(2)
                .map(|w| residual[w[0]][w[1]])
                .reduce(|a, b| if b < a { b } else { a })
                .unwrap();
            for w in path.windows(2) {
                residual[w[0]][w[1]] -= bottleneck;
                residual[w[1]][w[0]] += bottleneck;
            }
            value += bottleneck;
        }
    }
}
