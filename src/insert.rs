//! Insertion and insert fixup.

use tracing::{debug, trace, warn};

use crate::codec::{color_of, link, link_mut, parent_of};
use crate::error::{RbError, Result};
use crate::node::{Color, Linked, NodeId};
use crate::rotate::{rotate_left_at, rotate_right_at};
use crate::tree::{climb_to_root, RbTree};

impl<T, C> RbTree<T, C>
where
    T: Linked,
    C: Fn(&T, &T) -> bool,
{
    /// Link the detached record `n` into the tree.
    ///
    /// Records that compare equal to a linked record are placed after it.
    /// Fails without touching any link if `n` is outside the store or
    /// already linked.
    pub fn insert(&mut self, nodes: &mut [T], n: NodeId) -> Result<()> {
        self.check_bounds(nodes, n)?;
        if !link(nodes, n).is_detached() {
            warn!(node = %n, "insert of a node that is already linked");
            return Err(RbError::AlreadyLinked(n));
        }

        link_mut(nodes, n).reset();

        let Some(root) = self.root else {
            link_mut(nodes, n).set_color(Color::Black);
            self.root = Some(n);
            self.size = 1;
            trace!(node = %n, "inserted as root");
            return Ok(());
        };

        // Descend to an empty child slot.
        let mut parent = root;
        let go_left = loop {
            let left = (self.less)(&nodes[n.index()], &nodes[parent.index()]);
            let next = if left {
                link(nodes, parent).left()
            } else {
                link(nodes, parent).right()
            };
            match next {
                Some(child) => parent = child,
                None => break left,
            }
        };

        {
            let p_link = link_mut(nodes, parent);
            if go_left {
                p_link.set_left(Some(n));
            } else {
                p_link.set_right(Some(n));
            }
        }
        let n_link = link_mut(nodes, n);
        n_link.set_parent(Some(parent));
        n_link.set_color(Color::Red);

        insert_fixup(nodes, n);

        let root = climb_to_root(nodes, n);
        self.root = Some(root);
        self.size += 1;
        trace!(node = %n, root = %root, size = self.size, "inserted");
        Ok(())
    }
}

/// Restore the red-black invariants after linking the red node `n`.
fn insert_fixup<T: Linked>(nodes: &mut [T], mut n: NodeId) {
    loop {
        let Some(parent) = parent_of(nodes, n) else {
            // Reached the root.
            link_mut(nodes, n).set_color(Color::Black);
            return;
        };
        if link(nodes, parent).is_black() {
            return;
        }
        let Some(grandparent) = parent_of(nodes, parent) else {
            // A red root; blacken it.
            link_mut(nodes, parent).set_color(Color::Black);
            return;
        };

        let g_link = link(nodes, grandparent);
        let uncle = if g_link.left() == Some(parent) {
            g_link.right()
        } else {
            g_link.left()
        };
        if color_of(nodes, uncle) == Color::Red {
            if let Some(uncle) = uncle {
                link_mut(nodes, uncle).set_color(Color::Black);
            }
            link_mut(nodes, parent).set_color(Color::Black);
            link_mut(nodes, grandparent).set_color(Color::Red);
            debug!(node = %n, grandparent = %grandparent, "recolored, moving up");
            n = grandparent;
            continue;
        }

        let mut parent = parent;
        if link(nodes, grandparent).left() == Some(parent) {
            if link(nodes, parent).right() == Some(n) {
                // Inner grandchild: turn left-right into left-left.
                rotate_left_at(nodes, parent, n);
                parent = n;
            }
            link_mut(nodes, parent).set_color(Color::Black);
            link_mut(nodes, grandparent).set_color(Color::Red);
            rotate_right_at(nodes, grandparent, parent);
        } else {
            if link(nodes, parent).left() == Some(n) {
                // Inner grandchild: turn right-left into right-right.
                rotate_right_at(nodes, parent, n);
                parent = n;
            }
            link_mut(nodes, parent).set_color(Color::Black);
            link_mut(nodes, grandparent).set_color(Color::Red);
            rotate_left_at(nodes, grandparent, parent);
        }
        debug!(subtree = %parent, "rotated into balance");
        return;
    }
}

#[cfg(test)]
mod tests {
    use crate::node::{Color, NodeId, RbLink};
    use crate::{Linked, RbError, RbTree};

    struct Item {
        key: u32,
        link: RbLink,
    }

    impl Linked for Item {
        fn link(&self) -> &RbLink {
            &self.link
        }
        fn link_mut(&mut self) -> &mut RbLink {
            &mut self.link
        }
    }

    fn items(keys: &[u32]) -> Vec<Item> {
        keys.iter()
            .map(|&key| Item {
                key,
                link: RbLink::new(),
            })
            .collect()
    }

    fn by_key(a: &Item, b: &Item) -> bool {
        a.key < b.key
    }

    fn key_at(nodes: &[Item], id: Option<NodeId>) -> Option<u32> {
        id.map(|id| nodes[id.index()].key)
    }

    #[test]
    fn test_first_insert_becomes_black_root() {
        let mut nodes = items(&[7]);
        let mut tree = RbTree::new(by_key);
        tree.insert(&mut nodes, NodeId::new(0)).unwrap();
        assert_eq!(tree.root(), Some(NodeId::new(0)));
        assert_eq!(tree.len(), 1);
        assert!(nodes[0].link.is_black());
        assert!(!nodes[0].link.is_detached());
    }

    #[test]
    fn test_ascending_inserts_rotate_left() {
        let mut nodes = items(&[10, 20, 30]);
        let mut tree = RbTree::new(by_key);
        for i in 0..3 {
            tree.insert(&mut nodes, NodeId::new(i)).unwrap();
        }

        let root = tree.root().unwrap();
        assert_eq!(nodes[root.index()].key, 20);
        assert_eq!(nodes[root.index()].link.color(), Color::Black);
        let left = nodes[root.index()].link.left();
        let right = nodes[root.index()].link.right();
        assert_eq!(key_at(&nodes, left), Some(10));
        assert_eq!(key_at(&nodes, right), Some(30));
        assert!(nodes[left.unwrap().index()].link.is_red());
        assert!(nodes[right.unwrap().index()].link.is_red());
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_zigzag_inserts_rotate_twice() {
        let mut nodes = items(&[30, 10, 20]);
        let mut tree = RbTree::new(by_key);
        for i in 0..3 {
            tree.insert(&mut nodes, NodeId::new(i)).unwrap();
        }
        assert_eq!(key_at(&nodes, tree.root()), Some(20));
        assert_eq!(tree.validate(&nodes), Ok(2));
    }

    #[test]
    fn test_uncle_recolor_propagates_to_root() {
        let mut nodes = items(&[20, 10, 30, 5]);
        let mut tree = RbTree::new(by_key);
        for i in 0..4 {
            tree.insert(&mut nodes, NodeId::new(i)).unwrap();
        }
        // 10 and 30 turn black, 20 stays the black root, 5 is red.
        assert!(nodes[0].link.is_black());
        assert!(nodes[1].link.is_black());
        assert!(nodes[2].link.is_black());
        assert!(nodes[3].link.is_red());
        assert_eq!(tree.validate(&nodes), Ok(3));
    }

    #[test]
    fn test_uncle_on_left_is_recolored() {
        let mut nodes = items(&[20, 10, 30, 35]);
        let mut tree = RbTree::new(by_key);
        for i in 0..4 {
            tree.insert(&mut nodes, NodeId::new(i)).unwrap();
        }
        // 35 hangs right of 30, so its uncle is 10 on the left.
        assert_eq!(key_at(&nodes, tree.root()), Some(20));
        assert!(nodes[1].link.is_black());
        assert!(nodes[2].link.is_black());
        assert!(nodes[3].link.is_red());
        assert_eq!(tree.validate(&nodes), Ok(3));
    }

    #[test]
    fn test_duplicates_keep_insertion_order() {
        let mut nodes = items(&[5, 5, 5]);
        let mut tree = RbTree::new(by_key);
        for i in 0..3 {
            tree.insert(&mut nodes, NodeId::new(i)).unwrap();
        }
        let order: Vec<usize> = tree.iter(&nodes).map(|(id, _)| id.index()).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_double_insert_is_rejected() {
        let mut nodes = items(&[1, 2]);
        let mut tree = RbTree::new(by_key);
        tree.insert(&mut nodes, NodeId::new(0)).unwrap();
        tree.insert(&mut nodes, NodeId::new(1)).unwrap();
        let before: Vec<RbLink> = nodes.iter().map(|n| n.link.clone()).collect();

        assert_eq!(
            tree.insert(&mut nodes, NodeId::new(1)),
            Err(RbError::AlreadyLinked(NodeId::new(1)))
        );
        assert_eq!(
            tree.insert(&mut nodes, NodeId::new(0)),
            Err(RbError::AlreadyLinked(NodeId::new(0)))
        );
        let after: Vec<RbLink> = nodes.iter().map(|n| n.link.clone()).collect();
        assert_eq!(before, after);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_insert_out_of_bounds() {
        let mut nodes = items(&[1]);
        let mut tree = RbTree::new(by_key);
        assert_eq!(
            tree.insert(&mut nodes, NodeId::new(3)),
            Err(RbError::OutOfBounds {
                id: NodeId::new(3),
                len: 1
            })
        );
        assert!(tree.is_empty());
    }
}
