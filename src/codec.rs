//! Family relations over a node store.
//!
//! These read and write the color/parent word of links living inside the
//! caller's records. Ids must address records of `nodes`; an id past the
//! end of the store panics on indexing like any slice access.

use crate::error::{RbError, Result};
use crate::node::{Color, Linked, NodeId, RbLink};

#[inline]
pub(crate) fn link<T: Linked>(nodes: &[T], id: NodeId) -> &RbLink {
    nodes[id.index()].link()
}

#[inline]
pub(crate) fn link_mut<T: Linked>(nodes: &mut [T], id: NodeId) -> &mut RbLink {
    nodes[id.index()].link_mut()
}

/// Fail with [`RbError::OutOfBounds`] unless `n` addresses a record of `nodes`.
pub(crate) fn check_index<T>(nodes: &[T], n: NodeId) -> Result<()> {
    if n.index() < nodes.len() {
        Ok(())
    } else {
        Err(RbError::OutOfBounds {
            id: n,
            len: nodes.len(),
        })
    }
}

/// Parent of `n`, `None` for the root.
pub fn parent_of<T: Linked>(nodes: &[T], n: NodeId) -> Option<NodeId> {
    link(nodes, n).parent()
}

/// Color of `n`. Absent nodes are the black leaf sentinels.
pub fn color_of<T: Linked>(nodes: &[T], n: Option<NodeId>) -> Color {
    n.map_or(Color::Black, |n| link(nodes, n).color())
}

/// Recolor `n` without touching its parent.
pub fn set_color<T: Linked>(nodes: &mut [T], n: NodeId, color: Color) {
    link_mut(nodes, n).set_color(color);
}

/// Re-parent `n` without touching its color.
pub fn set_parent<T: Linked>(nodes: &mut [T], n: NodeId, parent: Option<NodeId>) {
    link_mut(nodes, n).set_parent(parent);
}

pub fn grandparent_of<T: Linked>(nodes: &[T], n: NodeId) -> Option<NodeId> {
    parent_of(nodes, n).and_then(|p| parent_of(nodes, p))
}

/// The other child of `n`'s parent, which may be absent.
///
/// Fails with [`RbError::NoParent`] when `n` is a root.
pub fn sibling_of<T: Linked>(nodes: &[T], n: NodeId) -> Result<Option<NodeId>> {
    let p = parent_of(nodes, n).ok_or(RbError::NoParent(n))?;
    let p_link = link(nodes, p);
    if p_link.left() == Some(n) {
        Ok(p_link.right())
    } else {
        Ok(p_link.left())
    }
}

/// Sibling of `n`'s parent.
///
/// `n` must have a parent; a parent that is itself the root has no uncle
/// to offer and yields `Ok(None)`.
pub fn uncle_of<T: Linked>(nodes: &[T], n: NodeId) -> Result<Option<NodeId>> {
    let p = parent_of(nodes, n).ok_or(RbError::NoParent(n))?;
    if parent_of(nodes, p).is_none() {
        return Ok(None);
    }
    sibling_of(nodes, p)
}
