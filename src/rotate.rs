//! Rotation primitives
//!
//! Rotations keep the in-order sequence and every node's color. They do
//! not restore the red-black invariants on their own; the insert and
//! delete fixups decide when to rotate.

use tracing::trace;

use crate::codec::{check_index, link, link_mut, parent_of};
use crate::error::{RbError, Result, Side};
use crate::node::{Linked, NodeId};

/// Rotate `n` down to the left; its right child takes its place.
///
/// Returns the new root of the local subtree. Fails untouched if `n` is
/// outside the store or has no right child.
pub fn rotate_left<T: Linked>(nodes: &mut [T], n: NodeId) -> Result<NodeId> {
    check_index(nodes, n)?;
    let r = link(nodes, n).right().ok_or(RbError::MissingChild {
        id: n,
        side: Side::Right,
    })?;
    rotate_left_at(nodes, n, r);
    Ok(r)
}

/// Rotate `n` down to the right; its left child takes its place.
pub fn rotate_right<T: Linked>(nodes: &mut [T], n: NodeId) -> Result<NodeId> {
    check_index(nodes, n)?;
    let l = link(nodes, n).left().ok_or(RbError::MissingChild {
        id: n,
        side: Side::Left,
    })?;
    rotate_right_at(nodes, n, l);
    Ok(l)
}

/// Rotate left around `n` whose right child is `r`.
pub(crate) fn rotate_left_at<T: Linked>(nodes: &mut [T], n: NodeId, r: NodeId) {
    trace!(node = %n, pivot = %r, "rotate left");
    let parent = parent_of(nodes, n);
    let inner = link(nodes, r).left();

    link_mut(nodes, n).set_right(inner);
    if let Some(inner) = inner {
        link_mut(nodes, inner).set_parent(Some(n));
    }

    link_mut(nodes, r).set_left(Some(n));
    link_mut(nodes, n).set_parent(Some(r));
    link_mut(nodes, r).set_parent(parent);
    replace_child(nodes, parent, n, r);
}

/// Rotate right around `n` whose left child is `l`.
pub(crate) fn rotate_right_at<T: Linked>(nodes: &mut [T], n: NodeId, l: NodeId) {
    trace!(node = %n, pivot = %l, "rotate right");
    let parent = parent_of(nodes, n);
    let inner = link(nodes, l).right();

    link_mut(nodes, n).set_left(inner);
    if let Some(inner) = inner {
        link_mut(nodes, inner).set_parent(Some(n));
    }

    link_mut(nodes, l).set_right(Some(n));
    link_mut(nodes, n).set_parent(Some(l));
    link_mut(nodes, l).set_parent(parent);
    replace_child(nodes, parent, n, l);
}

/// Point `parent`'s slot that held `old` at `new`. A `None` parent means
/// `old` was the root and there is no slot to fix.
pub(crate) fn replace_child<T: Linked>(
    nodes: &mut [T],
    parent: Option<NodeId>,
    old: NodeId,
    new: NodeId,
) {
    if let Some(p) = parent {
        let p_link = link_mut(nodes, p);
        if p_link.left() == Some(old) {
            p_link.set_left(Some(new));
        } else {
            p_link.set_right(Some(new));
        }
    }
}
