//! The Boykov–Kolmogorov max-flow loop: grow the two search trees until they touch, push
//! the bottleneck along the path found, then repair the trees.

use crate::error::{Error, Result};
use crate::graph::{Capacity, FlowGraph, NodeId};
use crate::partition::{self, MinCut};
use crate::tree::{Tree, TreeState};

mod adopt;
mod augment;
mod grow;

/// Something that can compute a minimum s-t cut.
pub trait MinCutSolver<C: Capacity> {
    fn min_cut(graph: FlowGraph<C>, s: NodeId, t: NodeId) -> Result<MinCut<C>>;
}

/// Counters collected while solving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveStats<C> {
    pub augmentations: usize,
    /// Sum of the bottlenecks pushed, which is the flow value.
    pub pushed_flow: C,
    /// Active nodes whose neighbourhood was scanned during growth.
    pub grow_scans: usize,
    pub orphans_processed: usize,
    pub demotions: usize,
}

impl<C: Capacity> Default for SolveStats<C> {
    fn default() -> Self {
        Self {
            augmentations: 0,
            pushed_flow: C::zero(),
            grow_scans: 0,
            orphans_processed: 0,
            demotions: 0,
        }
    }
}

#[derive(Debug)]
pub struct BkSolver<C> {
    graph: FlowGraph<C>,
    s: NodeId,
    t: NodeId,
    trees: TreeState,
    stats: SolveStats<C>,
}

/// Residual capacity of the tree edge between `parent` and `child` of the given tree.
fn tree_residual<C: Capacity>(
    graph: &FlowGraph<C>,
    tree: Tree,
    parent: NodeId,
    child: NodeId,
) -> C {
    match tree {
        Tree::Sink => graph.residual(child, parent),
        _ => graph.residual(parent, child),
    }
}

impl<C: Capacity> BkSolver<C> {
    /// Takes ownership of `graph` for the whole solve. Any flow already on it is dropped.
    pub fn new(mut graph: FlowGraph<C>, s: NodeId, t: NodeId) -> Result<Self> {
        let nodes = graph.node_count();
        if s == t || s >= nodes || t >= nodes {
            return Err(Error::InvalidTerminals { s, t, nodes });
        }
        // Stored capacities are merged and miss self-loops.
        let invalid = graph.invalid_capacity().or_else(|| {
            graph
                .original_edges()
                .find(|(_, _, e)| !(e.capacity >= C::zero()))
                .map(|(u, v, e)| (u, v, e.capacity))
        });
        if let Some((from, to, capacity)) = invalid {
            return Err(Error::InvalidCapacity {
                from,
                to,
                capacity: format!("{capacity:?}"),
            });
        }
        graph.clear_flow();
        Ok(Self {
            trees: TreeState::new(nodes, s, t),
            graph,
            s,
            t,
            stats: SolveStats::default(),
        })
    }

    pub fn source(&self) -> NodeId {
        self.s
    }

    pub fn sink(&self) -> NodeId {
        self.t
    }

    pub fn graph(&self) -> &FlowGraph<C> {
        &self.graph
    }

    pub fn into_graph(self) -> FlowGraph<C> {
        self.graph
    }

    pub fn trees(&self) -> &TreeState {
        &self.trees
    }

    pub fn stats(&self) -> &SolveStats<C> {
        &self.stats
    }

    /// Flow currently sent from s to t.
    pub fn flow_value(&self) -> C {
        self.graph.net_flow_out(self.s)
    }

    /// One round of growth, augmentation and adoption. Returns false once no augmenting
    /// path is left, in which case nothing was changed.
    pub fn step(&mut self) -> Result<bool> {
        let Some(path) = self.grow()? else {
            return Ok(false);
        };
        self.augment(&path)?;
        self.adopt()?;
        Ok(true)
    }

    /// Runs until the flow is maximum and returns the corresponding minimum cut.
    pub fn solve(&mut self) -> Result<MinCut<C>> {
        while self.step()? {}
        let cut = partition::extract(&self.graph, self.s);
        log::debug!(
            "max flow {:?} from {} to {}: {:?}, {} nodes on the source side",
            cut.value,
            self.s,
            self.t,
            self.stats,
            cut.source_side.len()
        );
        Ok(cut)
    }

    /// Checks the flow bounds on every edge and the consistency of both search trees.
    /// Holds between steps.
    pub fn check_invariants(&self) -> Result<()> {
        self.graph.check_flows()?;
        let trees = &self.trees;
        if trees.tree(self.s) != Tree::Source || trees.tree(self.t) != Tree::Sink {
            return Err(Error::invariant("a terminal left its tree"));
        }
        if let Some(u) = trees.orphans().next() {
            return Err(Error::invariant(format!("{u} is still an orphan")));
        }
        for u in 0..self.graph.node_count() {
            let tree = trees.tree(u);
            let root = trees.terminal(tree);
            match (trees.parent(u), tree) {
                (Some(_), Tree::Free) => {
                    return Err(Error::invariant(format!("free node {u} has a parent")));
                }
                (None, Tree::Free) if trees.is_active(u) => {
                    return Err(Error::invariant(format!("free node {u} is active")));
                }
                (None, Tree::Free) => {}
                (None, _) if Some(u) != root => {
                    return Err(Error::invariant(format!(
                        "{u} has no parent in the {tree:?} tree"
                    )));
                }
                (None, _) => {}
                (Some(p), _) => {
                    if Some(u) == root {
                        return Err(Error::invariant(format!("terminal {u} has a parent")));
                    }
                    if trees.tree(p) != tree {
                        return Err(Error::invariant(format!(
                            "{u} and its parent {p} are in different trees"
                        )));
                    }
                    if !(tree_residual(&self.graph, tree, p, u) > C::zero()) {
                        return Err(Error::invariant(format!(
                            "tree edge between {p} and {u} is saturated"
                        )));
                    }
                    if Some(trees.origin(u)?) != root {
                        return Err(Error::invariant(format!("{u} is not rooted at its terminal")));
                    }
                }
            }
        }
        Ok(())
    }
}

impl<C: Capacity> MinCutSolver<C> for BkSolver<C> {
    fn min_cut(graph: FlowGraph<C>, s: NodeId, t: NodeId) -> Result<MinCut<C>> {
        BkSolver::new(graph, s, t)?.solve()
    }
}
