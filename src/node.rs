//! Intrusive node link
//!
//! An [`RbLink`] is embedded in the caller's own record. It carries the
//! parent, left and right relations plus one color bit and nothing else.
//! Relations are indices into the caller's node store, so up-links are
//! lookups rather than ownership.

use std::fmt;

use static_assertions::{assert_eq_size, const_assert};

use crate::error::RbError;

/// Raw index meaning "no node".
const NIL: u32 = 0x7FFF_FFFF;
/// Raw parent index meaning "not linked into any tree".
const DETACHED: u32 = 0x7FFF_FFFE;
/// Largest index a [`NodeId`] can carry.
pub const MAX_INDEX: u32 = DETACHED - 1;

const COLOR_MASK: u32 = 1;

// Parent indices are shifted left by one to make room for the color bit.
const_assert!(NIL <= u32::MAX >> 1);
const_assert!(MAX_INDEX < DETACHED);
assert_eq_size!(RbLink, [u32; 3]);

/// Stable address of a record in the caller's node store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Create an id for slot `index`.
    ///
    /// # Panics
    /// Panics if `index` exceeds [`MAX_INDEX`]. Use `NodeId::try_from` for
    /// indices that are not known to be in range.
    pub const fn new(index: u32) -> Self {
        assert!(index <= MAX_INDEX, "node index out of range");
        Self(index)
    }

    /// Slot of this node in the store.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    fn from_raw(raw: u32) -> Option<Self> {
        if raw > MAX_INDEX {
            None
        } else {
            Some(Self(raw))
        }
    }

    fn to_raw(id: Option<Self>) -> u32 {
        id.map_or(NIL, |id| id.0)
    }
}

impl TryFrom<usize> for NodeId {
    type Error = RbError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match u32::try_from(index) {
            Ok(raw) if raw <= MAX_INDEX => Ok(Self(raw)),
            _ => Err(RbError::IndexOverflow(index)),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Red-black node color
///
/// Values match the Linux layout: red is 0, black is 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Color {
    Red = 0,
    Black = 1,
}

/// Link fields a record embeds to take part in a tree.
///
/// The parent index and color share one word: `parent << 1 | color`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RbLink {
    parent_color: u32,
    left: u32,
    right: u32,
}

impl Default for RbLink {
    fn default() -> Self {
        Self::new()
    }
}

impl RbLink {
    /// Create a detached link.
    pub const fn new() -> Self {
        Self {
            parent_color: DETACHED << 1,
            left: NIL,
            right: NIL,
        }
    }

    /// Parent of this node, `None` for a root or a detached node.
    pub fn parent(&self) -> Option<NodeId> {
        NodeId::from_raw(self.parent_color >> 1)
    }

    /// Set the parent, keeping the current color.
    pub fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent_color = (NodeId::to_raw(parent) << 1) | (self.parent_color & COLOR_MASK);
    }

    /// Get the color of this node
    pub fn color(&self) -> Color {
        if self.parent_color & COLOR_MASK == 0 {
            Color::Red
        } else {
            Color::Black
        }
    }

    /// Set the color, keeping the current parent.
    pub fn set_color(&mut self, color: Color) {
        self.parent_color = (self.parent_color & !COLOR_MASK) | color as u32;
    }

    pub fn is_red(&self) -> bool {
        self.color() == Color::Red
    }

    pub fn is_black(&self) -> bool {
        self.color() == Color::Black
    }

    pub fn left(&self) -> Option<NodeId> {
        NodeId::from_raw(self.left)
    }

    pub fn right(&self) -> Option<NodeId> {
        NodeId::from_raw(self.right)
    }

    pub fn set_left(&mut self, left: Option<NodeId>) {
        self.left = NodeId::to_raw(left);
    }

    pub fn set_right(&mut self, right: Option<NodeId>) {
        self.right = NodeId::to_raw(right);
    }

    /// True while the node is not linked into any tree.
    pub fn is_detached(&self) -> bool {
        self.parent_color >> 1 == DETACHED
    }

    /// Reset to the state of a freshly linked leaf: no parent, no children.
    pub(crate) fn reset(&mut self) {
        self.parent_color = (NIL << 1) | (self.parent_color & COLOR_MASK);
        self.left = NIL;
        self.right = NIL;
    }

    /// Return the link to the detached state.
    pub(crate) fn clear(&mut self) {
        *self = Self::new();
    }
}

/// Records that embed an [`RbLink`].
pub trait Linked {
    fn link(&self) -> &RbLink;
    fn link_mut(&mut self) -> &mut RbLink;
}

impl Linked for RbLink {
    fn link(&self) -> &RbLink {
        self
    }

    fn link_mut(&mut self) -> &mut RbLink {
        self
    }
}
