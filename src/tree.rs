//! Red-black tree handle
//!
//! The tree owns only its root index, a node count and the comparator. The
//! records themselves live in a store the caller passes to each call.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use tracing::warn;

use crate::codec::{check_index, link, parent_of};
use crate::error::{RbError, Result};
use crate::iter::{leftmost, rightmost, Iter};
use crate::node::{Linked, NodeId};

/// Ordering predicate for trees over `Ord` records.
pub type OrdLess<T> = fn(&T, &T) -> bool;

/// Intrusive red-black tree over records of type `T`.
///
/// `less(a, b)` must mean "a sorts strictly before b" and must stay
/// consistent for as long as both records are linked.
pub struct RbTree<T, C> {
    pub(crate) root: Option<NodeId>,
    pub(crate) size: usize,
    pub(crate) less: C,
    _records: PhantomData<fn(&T)>,
}

impl<T, C> fmt::Debug for RbTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RbTree")
            .field("root", &self.root)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<T: Linked + Ord> RbTree<T, OrdLess<T>> {
    /// Create a tree ordered by `T`'s `Ord` implementation.
    pub fn ordered() -> Self {
        Self::new(|a, b| a < b)
    }
}

impl<T: Linked + Ord> Default for RbTree<T, OrdLess<T>> {
    fn default() -> Self {
        Self::ordered()
    }
}

impl<T, C> RbTree<T, C>
where
    T: Linked,
    C: Fn(&T, &T) -> bool,
{
    /// Create an empty tree ordered by `less`.
    pub fn new(less: C) -> Self {
        Self {
            root: None,
            size: 0,
            less,
            _records: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of linked nodes.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Find a linked node equal to `probe` under the tree's ordering.
    ///
    /// `probe` does not need to be part of the store; only its key fields
    /// are consulted by the comparator.
    pub fn find(&self, nodes: &[T], probe: &T) -> Option<NodeId> {
        self.find_by(nodes, |record| {
            if (self.less)(probe, record) {
                Ordering::Less
            } else if (self.less)(record, probe) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
    }

    /// Find a linked node by a key-extraction probe.
    ///
    /// `locate(record)` reports where the sought key lies relative to
    /// `record`: `Less` to descend left, `Greater` to descend right.
    pub fn find_by<F>(&self, nodes: &[T], mut locate: F) -> Option<NodeId>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut current = self.root;
        while let Some(n) = current {
            current = match locate(&nodes[n.index()]) {
                Ordering::Less => link(nodes, n).left(),
                Ordering::Greater => link(nodes, n).right(),
                Ordering::Equal => return Some(n),
            };
        }
        None
    }

    /// Smallest node in the tree.
    pub fn first(&self, nodes: &[T]) -> Option<NodeId> {
        self.root.map(|r| leftmost(nodes, r))
    }

    /// Largest node in the tree.
    pub fn last(&self, nodes: &[T]) -> Option<NodeId> {
        self.root.map(|r| rightmost(nodes, r))
    }

    /// In-order traversal of the linked records.
    pub fn iter<'a>(&self, nodes: &'a [T]) -> Iter<'a, T> {
        Iter::new(nodes, self.first(nodes), self.last(nodes), self.size)
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self, nodes: &[T]) -> usize {
        fn depth<T: Linked>(nodes: &[T], n: Option<NodeId>) -> usize {
            match n {
                None => 0,
                Some(n) => {
                    let l = link(nodes, n);
                    1 + depth(nodes, l.left()).max(depth(nodes, l.right()))
                }
            }
        }
        depth(nodes, self.root)
    }

    /// Check that `n` addresses a record of `nodes`.
    pub(crate) fn check_bounds(&self, nodes: &[T], n: NodeId) -> Result<()> {
        check_index(nodes, n).inspect_err(|_| {
            warn!(node = %n, len = nodes.len(), "node outside the store");
        })
    }

    /// Check that `n` is linked into this tree, by climbing to its root.
    pub(crate) fn check_member(&self, nodes: &[T], n: NodeId) -> Result<()> {
        self.check_bounds(nodes, n)?;
        if !link(nodes, n).is_detached() && Some(climb_to_root(nodes, n)) == self.root {
            Ok(())
        } else {
            warn!(node = %n, "node is not linked into this tree");
            Err(RbError::NotLinked(n))
        }
    }
}

/// Follow parent links from `n` until a node without a parent.
pub(crate) fn climb_to_root<T: Linked>(nodes: &[T], mut n: NodeId) -> NodeId {
    while let Some(p) = parent_of(nodes, n) {
        n = p;
    }
    n
}
