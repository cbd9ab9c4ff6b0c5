//! Error types for tree operations.
//!
//! Every [`RbError`] is a caller contract violation. They are returned as
//! values rather than asserted, and each operation checks its
//! preconditions before touching any link, so an `Err` always leaves the
//! tree exactly as it was. A missing key is not an error: lookups return
//! `Option::None`.

use crate::node::NodeId;

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, RbError>;

/// Precondition violations reported by the tree, codec and rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RbError {
    #[error("node {0} is already linked into a tree")]
    AlreadyLinked(NodeId),

    #[error("node {0} is not linked into this tree")]
    NotLinked(NodeId),

    #[error("node {0} has no parent")]
    NoParent(NodeId),

    #[error("node {id} has no {side} child to rotate")]
    MissingChild { id: NodeId, side: Side },

    #[error("node {id} is out of bounds for a store of {len} records")]
    OutOfBounds { id: NodeId, len: usize },

    #[error("index {0} exceeds the addressable node range")]
    IndexOverflow(usize),
}

/// Which child slot a rotation needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Red-black invariant failures found by [`crate::RbTree::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("root {0} is red")]
    RedRoot(NodeId),

    #[error("root {0} has a parent link")]
    RootHasParent(NodeId),

    #[error("red node {parent} has red child {child}")]
    RedRedEdge { parent: NodeId, child: NodeId },

    #[error("subtrees of {0} have different black heights")]
    BlackHeightMismatch(NodeId),

    #[error("child {child} does not point back to parent {parent}")]
    BrokenBackLink { parent: NodeId, child: NodeId },

    #[error("node {0} sorts before its in-order predecessor")]
    OutOfOrder(NodeId),

    #[error("tree records {expected} nodes but {actual} are reachable")]
    SizeMismatch { expected: usize, actual: usize },
}
