use crate::error::{Error, Result};
use crate::graph::{Capacity, NodeId};
use crate::tree::Tree;

use super::{tree_residual, BkSolver};

impl<C: Capacity> BkSolver<C> {
    /// Finds a new parent for every orphan, or frees it. Freeing an orphan turns its
    /// children into orphans as well.
    pub(super) fn adopt(&mut self) -> Result<()> {
        while let Some(p) = self.trees.pop_orphan() {
            self.stats.orphans_processed += 1;
            let tree = self.trees.tree(p);
            if let Some(q) = self.find_parent(p, tree)? {
                log::trace!("adopt: {p} reattached under {q}");
                self.trees.set_parent(p, q);
            } else {
                self.demote(p, tree);
            }
        }
        Ok(())
    }

    /// A neighbour of `p` in the same tree, rooted at the tree's terminal, with residual
    /// capacity on the edge that would link them.
    fn find_parent(&self, p: NodeId, tree: Tree) -> Result<Option<NodeId>> {
        let (growth, root) = match (tree.growth(), self.trees.terminal(tree)) {
            (Some(growth), Some(root)) => (growth, root),
            _ => return Err(Error::invariant(format!("orphan {p} is in no tree"))),
        };
        for q in self.graph.adjacent(p, growth.reverse()) {
            if self.trees.tree(q) == tree
                && tree_residual(&self.graph, tree, q, p) > C::zero()
                && self.trees.origin(q)? == root
            {
                return Ok(Some(q));
            }
        }
        Ok(None)
    }

    fn demote(&mut self, p: NodeId, tree: Tree) {
        log::trace!("adopt: {p} leaves the {tree:?} tree");
        self.stats.demotions += 1;
        let neighbors = self.graph.successors(p).chain(self.graph.predecessors(p));
        for q in neighbors {
            if self.trees.tree(q) != tree {
                continue;
            }
            // q may grow into p again.
            if tree_residual(&self.graph, tree, q, p) > C::zero() {
                self.trees.activate(q);
            }
            if self.trees.parent(q) == Some(p) {
                self.trees.orphan(q);
            }
        }
        self.trees.free(p);
    }
}
