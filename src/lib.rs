//! rbtree - intrusive red-black tree
//!
//! Callers embed an [`RbLink`] in their own record type, keep the records
//! in a store they own (any slice, usually a `Vec`), and hand the tree
//! [`NodeId`]s into that store. The tree rewires links only: it never
//! allocates, moves or drops a record.
//!
//! ```
//! use rbtree::{Linked, NodeId, RbLink, RbTree};
//!
//! struct Timer {
//!     deadline: u64,
//!     link: RbLink,
//! }
//!
//! impl Linked for Timer {
//!     fn link(&self) -> &RbLink { &self.link }
//!     fn link_mut(&mut self) -> &mut RbLink { &mut self.link }
//! }
//!
//! let mut timers: Vec<Timer> = [30, 10, 20]
//!     .into_iter()
//!     .map(|deadline| Timer { deadline, link: RbLink::new() })
//!     .collect();
//! let mut tree = RbTree::new(|a: &Timer, b: &Timer| a.deadline < b.deadline);
//! for i in 0..timers.len() {
//!     tree.insert(&mut timers, NodeId::try_from(i)?)?;
//! }
//!
//! let soonest = tree.first(&timers).unwrap();
//! assert_eq!(timers[soonest.index()].deadline, 10);
//! tree.delete(&mut timers, soonest)?;
//! assert_eq!(tree.len(), 2);
//! # Ok::<(), rbtree::RbError>(())
//! ```

pub mod codec;
pub mod config;
mod delete;
pub mod error;
mod insert;
pub mod iter;
pub mod node;
pub mod rotate;
pub mod tree;
pub mod utils;
mod validate;
pub mod workload;

pub use codec::{color_of, grandparent_of, parent_of, set_color, set_parent, sibling_of, uncle_of};
pub use error::{InvariantViolation, RbError, Result, Side};
pub use iter::Iter;
pub use node::{Color, Linked, NodeId, RbLink, MAX_INDEX};
pub use rotate::{rotate_left, rotate_right};
pub use tree::{OrdLess, RbTree};
