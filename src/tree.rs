//! Search-tree state of the Boykov–Kolmogorov algorithm.
//!
//! Each node is in the source tree, the sink tree, or free. Tree nodes other than the
//! terminals point to their parent; parent links are plain node ids into the graph.

use std::fmt::{Debug, Formatter};

use debug_tree::TreeBuilder;
use indexmap::IndexSet;

use crate::error::{Error, Result};
use crate::graph::{Direction, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tree {
    Source,
    Sink,
    Free,
}

impl Tree {
    /// Direction in which the tree grows: away from `s` for the source tree, towards `t`
    /// for the sink tree.
    pub fn growth(self) -> Option<Direction> {
        match self {
            Tree::Source => Some(Direction::Outgoing),
            Tree::Sink => Some(Direction::Incoming),
            Tree::Free => None,
        }
    }
}

pub struct TreeState {
    s: NodeId,
    t: NodeId,
    tree: Vec<Tree>,
    parent: Vec<Option<NodeId>>,
    /// Frontier. The most recently activated node is expanded first.
    active: IndexSet<NodeId>,
    orphans: IndexSet<NodeId>,
}

impl TreeState {
    /// Only the terminals are in trees, and both are active.
    pub fn new(n: usize, s: NodeId, t: NodeId) -> Self {
        let mut tree = vec![Tree::Free; n];
        tree[s] = Tree::Source;
        tree[t] = Tree::Sink;
        Self {
            s,
            t,
            tree,
            parent: vec![None; n],
            active: IndexSet::from([s, t]),
            orphans: IndexSet::new(),
        }
    }

    pub fn tree(&self, u: NodeId) -> Tree {
        self.tree[u]
    }

    pub fn parent(&self, u: NodeId) -> Option<NodeId> {
        self.parent[u]
    }

    /// Root of the given tree.
    pub fn terminal(&self, tree: Tree) -> Option<NodeId> {
        match tree {
            Tree::Source => Some(self.s),
            Tree::Sink => Some(self.t),
            Tree::Free => None,
        }
    }

    pub fn is_active(&self, u: NodeId) -> bool {
        self.active.contains(&u)
    }

    pub fn active(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.active.iter().copied()
    }

    pub fn orphans(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.orphans.iter().copied()
    }

    pub(crate) fn next_active(&self) -> Option<NodeId> {
        self.active.last().copied()
    }

    pub(crate) fn activate(&mut self, u: NodeId) {
        self.active.insert(u);
    }

    pub(crate) fn deactivate(&mut self, u: NodeId) {
        self.active.swap_remove(&u);
    }

    /// Free node `q` joins the tree of `p` as its child.
    pub(crate) fn annex(&mut self, q: NodeId, p: NodeId) {
        self.tree[q] = self.tree[p];
        self.parent[q] = Some(p);
        self.active.insert(q);
    }

    pub(crate) fn set_parent(&mut self, q: NodeId, p: NodeId) {
        self.parent[q] = Some(p);
    }

    pub(crate) fn orphan(&mut self, u: NodeId) {
        log::trace!("{u} becomes an orphan of the {:?} tree", self.tree[u]);
        self.parent[u] = None;
        self.orphans.insert(u);
    }

    pub(crate) fn pop_orphan(&mut self) -> Option<NodeId> {
        self.orphans.pop()
    }

    /// Takes `u` out of its tree.
    pub(crate) fn free(&mut self, u: NodeId) {
        self.tree[u] = Tree::Free;
        self.parent[u] = None;
        self.active.swap_remove(&u);
    }

    /// Where the parent links from `u` end.
    pub fn origin(&self, mut u: NodeId) -> Result<NodeId> {
        for _ in 0..self.parent.len() {
            match self.parent[u] {
                Some(p) => u = p,
                None => return Ok(u),
            }
        }
        Err(Error::invariant(format!("parent links from {u} form a cycle")))
    }

    /// Nodes from `u` up to the root of its tree, which must be a terminal.
    fn trace(&self, mut u: NodeId) -> Result<Vec<NodeId>> {
        let root = self.terminal(self.tree[u]);
        let mut path = vec![u];
        while let Some(p) = self.parent[u] {
            if path.len() > self.parent.len() {
                return Err(Error::invariant(format!("parent links from {u} form a cycle")));
            }
            path.push(p);
            u = p;
        }
        if Some(u) != root {
            return Err(Error::invariant(format!(
                "{u} is a root of the {:?} tree",
                self.tree[u]
            )));
        }
        Ok(path)
    }

    /// The s-t path through the edge joining `p` and `q`, which are in opposite trees.
    pub(crate) fn path_through(&self, p: NodeId, q: NodeId) -> Result<Vec<NodeId>> {
        let (a, b) = if self.tree[p] == Tree::Source {
            (p, q)
        } else {
            (q, p)
        };
        let mut path = self.trace(a)?;
        path.reverse();
        path.extend(self.trace(b)?);
        Ok(path)
    }

    fn subtree_dbg(&self, u: NodeId, children: &[Vec<NodeId>], builder: &TreeBuilder) {
        let label = if self.is_active(u) {
            format!("{u} (active)")
        } else {
            format!("{u}")
        };
        if children[u].is_empty() {
            builder.add_leaf(&label);
        } else {
            let _b = builder.add_branch(&label);
            for &c in &children[u] {
                self.subtree_dbg(c, children, builder);
            }
        }
    }
}

impl Debug for TreeState {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mut children = vec![vec![]; self.parent.len()];
        for (u, p) in self.parent.iter().enumerate() {
            if let Some(p) = p {
                children[*p].push(u);
            }
        }
        let builder = TreeBuilder::new();
        let _b = builder.add_branch("TreeState");
        for tree in [Tree::Source, Tree::Sink] {
            let _t = builder.add_branch(&format!("{tree:?} tree"));
            // Terminal first, then orphans and the subtrees they still hold.
            let root = self.terminal(tree);
            let orphans = (0..self.tree.len())
                .filter(|&u| self.tree[u] == tree && self.parent[u].is_none() && Some(u) != root);
            for u in root.into_iter().chain(orphans) {
                self.subtree_dbg(u, &children, &builder);
            }
        }
        let free: Vec<_> = (0..self.tree.len())
            .filter(|&u| self.tree[u] == Tree::Free)
            .collect();
        builder.add_leaf(&format!("free: {free:?}"));
        builder.add_leaf(&format!("orphans: {:?}", self.orphans));
        writeln!(f, "{}", builder.string())
    }
}
