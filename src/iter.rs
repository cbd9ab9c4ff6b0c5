//! In-order navigation.

use std::iter::FusedIterator;

use crate::codec::{link, parent_of};
use crate::error::Result;
use crate::node::{Linked, NodeId};
use crate::tree::RbTree;

pub(crate) fn leftmost<T: Linked>(nodes: &[T], mut n: NodeId) -> NodeId {
    while let Some(l) = link(nodes, n).left() {
        n = l;
    }
    n
}

pub(crate) fn rightmost<T: Linked>(nodes: &[T], mut n: NodeId) -> NodeId {
    while let Some(r) = link(nodes, n).right() {
        n = r;
    }
    n
}

fn successor<T: Linked>(nodes: &[T], n: NodeId) -> Option<NodeId> {
    if let Some(r) = link(nodes, n).right() {
        return Some(leftmost(nodes, r));
    }
    let mut current = n;
    while let Some(p) = parent_of(nodes, current) {
        if link(nodes, p).right() != Some(current) {
            return Some(p);
        }
        current = p;
    }
    None
}

fn predecessor<T: Linked>(nodes: &[T], n: NodeId) -> Option<NodeId> {
    if let Some(l) = link(nodes, n).left() {
        return Some(rightmost(nodes, l));
    }
    let mut current = n;
    while let Some(p) = parent_of(nodes, current) {
        if link(nodes, p).left() != Some(current) {
            return Some(p);
        }
        current = p;
    }
    None
}

impl<T, C> RbTree<T, C>
where
    T: Linked,
    C: Fn(&T, &T) -> bool,
{
    /// Next node in sort order, `Ok(None)` past the last one.
    ///
    /// Fails if `n` is not linked into this tree.
    pub fn next(&self, nodes: &[T], n: NodeId) -> Result<Option<NodeId>> {
        self.check_member(nodes, n)?;
        Ok(successor(nodes, n))
    }

    /// Previous node in sort order, `Ok(None)` before the first one.
    pub fn prev(&self, nodes: &[T], n: NodeId) -> Result<Option<NodeId>> {
        self.check_member(nodes, n)?;
        Ok(predecessor(nodes, n))
    }
}

/// Double-ended in-order iterator over `(id, record)` pairs.
pub struct Iter<'a, T> {
    nodes: &'a [T],
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, T: Linked> Iter<'a, T> {
    pub(crate) fn new(
        nodes: &'a [T],
        front: Option<NodeId>,
        back: Option<NodeId>,
        remaining: usize,
    ) -> Self {
        Self {
            nodes,
            front,
            back,
            remaining,
        }
    }
}

impl<'a, T: Linked> Iterator for Iter<'a, T> {
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.front?;
        self.remaining -= 1;
        self.front = successor(self.nodes, n);
        Some((n, &self.nodes[n.index()]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: Linked> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.back?;
        self.remaining -= 1;
        self.back = predecessor(self.nodes, n);
        Some((n, &self.nodes[n.index()]))
    }
}

impl<'a, T: Linked> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: Linked> FusedIterator for Iter<'a, T> {}
