//! Invariant checking.

use crate::codec::{color_of, link};
use crate::error::InvariantViolation;
use crate::node::{Color, Linked, NodeId};
use crate::tree::RbTree;

impl<T, C> RbTree<T, C>
where
    T: Linked,
    C: Fn(&T, &T) -> bool,
{
    /// Check every red-black invariant, back-link and the node count.
    ///
    /// Returns the black height: the number of black nodes on each path
    /// from the root down to and including the leaf sentinels (1 for an
    /// empty tree).
    pub fn validate(&self, nodes: &[T]) -> Result<usize, InvariantViolation> {
        if let Some(root) = self.root {
            if link(nodes, root).parent().is_some() {
                return Err(InvariantViolation::RootHasParent(root));
            }
            if link(nodes, root).is_red() {
                return Err(InvariantViolation::RedRoot(root));
            }
        }

        let mut reachable = 0;
        let black_height = check_subtree(nodes, self.root, &mut reachable)?;
        if reachable != self.size {
            return Err(InvariantViolation::SizeMismatch {
                expected: self.size,
                actual: reachable,
            });
        }

        let mut previous: Option<&T> = None;
        for (id, record) in self.iter(nodes) {
            if let Some(prev) = previous {
                if (self.less)(record, prev) {
                    return Err(InvariantViolation::OutOfOrder(id));
                }
            }
            previous = Some(record);
        }

        Ok(black_height)
    }
}

fn check_subtree<T: Linked>(
    nodes: &[T],
    n: Option<NodeId>,
    reachable: &mut usize,
) -> Result<usize, InvariantViolation> {
    let Some(n) = n else {
        return Ok(1);
    };
    *reachable += 1;

    let n_link = link(nodes, n);
    for child in [n_link.left(), n_link.right()].into_iter().flatten() {
        if link(nodes, child).parent() != Some(n) {
            return Err(InvariantViolation::BrokenBackLink { parent: n, child });
        }
        if n_link.is_red() && color_of(nodes, Some(child)) == Color::Red {
            return Err(InvariantViolation::RedRedEdge { parent: n, child });
        }
    }

    let left = check_subtree(nodes, n_link.left(), reachable)?;
    let right = check_subtree(nodes, n_link.right(), reachable)?;
    if left != right {
        return Err(InvariantViolation::BlackHeightMismatch(n));
    }
    Ok(left + usize::from(n_link.is_black()))
}
