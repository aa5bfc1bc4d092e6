use crate::error::{Error, Result};
use crate::graph::{Capacity, NodeId};
use crate::tree::Tree;

use super::{tree_residual, BkSolver};

impl<C: Capacity> BkSolver<C> {
    /// Expands the active nodes until an edge joins the two trees, and returns the s-t
    /// path through that edge. Returns None once the frontier is empty.
    pub(super) fn grow(&mut self) -> Result<Option<Vec<NodeId>>> {
        while let Some(p) = self.trees.next_active() {
            self.stats.grow_scans += 1;
            let tree = self.trees.tree(p);
            let growth = tree
                .growth()
                .ok_or_else(|| Error::invariant(format!("active node {p} is in no tree")))?;
            for q in self.graph.adjacent(p, growth) {
                if !(tree_residual(&self.graph, tree, p, q) > C::zero()) {
                    continue;
                }
                match self.trees.tree(q) {
                    Tree::Free => {
                        log::trace!("grow: {q} joins the {tree:?} tree under {p}");
                        self.trees.annex(q, p);
                    }
                    other if other != tree => {
                        let path = self.trees.path_through(p, q)?;
                        log::trace!("grow: trees meet at {p} -- {q}");
                        return Ok(Some(path));
                    }
                    _ => {}
                }
            }
            self.trees.deactivate(p);
        }
        Ok(None)
    }
}
