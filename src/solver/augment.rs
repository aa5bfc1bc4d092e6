use crate::error::{Error, Result};
use crate::graph::{Capacity, NodeId};
use crate::tree::Tree;

use super::BkSolver;

impl<C: Capacity> BkSolver<C> {
    /// Pushes the bottleneck capacity along `path` and returns it. Tree edges saturated by
    /// the push lose their child, which becomes an orphan.
    pub(super) fn augment(&mut self, path: &[NodeId]) -> Result<C> {
        let bottleneck = path
            .windows(2)
            .map(|w| self.graph.residual(w[0], w[1]))
            .reduce(|a, b| if b < a { b } else { a })
            .ok_or_else(|| Error::invariant(format!("augmenting path {path:?} has no edges")))?;
        if !(bottleneck > C::zero()) {
            return Err(Error::invariant(format!(
                "bottleneck {bottleneck:?} on augmenting path {path:?}"
            )));
        }
        log::debug!("augment {bottleneck:?} along {path:?}");

        for w in path.windows(2) {
            let (p, q) = (w[0], w[1]);
            if !self.graph.push_flow(p, q, bottleneck)? {
                continue;
            }
            match (self.trees.tree(p), self.trees.tree(q)) {
                (Tree::Source, Tree::Source) => self.trees.orphan(q),
                (Tree::Sink, Tree::Sink) => self.trees.orphan(p),
                _ => {}
            }
        }
        self.stats.augmentations += 1;
        self.stats.pushed_flow += bottleneck;
        Ok(bottleneck)
    }
}
