//! Deletion and the double-black fixup.

use tracing::{debug, trace};

use crate::codec::{color_of, link, link_mut, parent_of};
use crate::error::Result;
use crate::iter::leftmost;
use crate::node::{Color, Linked, NodeId};
use crate::rotate::{rotate_left_at, rotate_right_at};
use crate::tree::{climb_to_root, RbTree};

impl<T, C> RbTree<T, C>
where
    T: Linked,
    C: Fn(&T, &T) -> bool,
{
    /// Unlink `n` from the tree and return it detached.
    ///
    /// The record itself is untouched apart from its link; the caller may
    /// free or reuse the slot once this returns. Fails without touching
    /// any link if `n` is not linked into this tree.
    pub fn delete(&mut self, nodes: &mut [T], n: NodeId) -> Result<NodeId> {
        self.check_member(nodes, n)?;

        let n_link = link(nodes, n);
        let (left, right) = (n_link.left(), n_link.right());
        let n_parent = n_link.parent();
        let n_color = n_link.color();

        // `child` moves into the vacated slot below `parent`; `removed`
        // is the color that left the tree.
        let (child, parent, removed) = match (left, right) {
            (None, _) | (_, None) => {
                let child = left.or(right);
                transplant(nodes, n, n_parent, child);
                (child, n_parent, n_color)
            }
            (Some(left), Some(right)) => {
                let s = leftmost(nodes, right);
                let s_link = link(nodes, s);
                let s_color = s_link.color();
                let s_parent = s_link.parent();
                let child = s_link.right();

                let parent = if s == right {
                    Some(s)
                } else {
                    transplant(nodes, s, s_parent, child);
                    link_mut(nodes, s).set_right(Some(right));
                    link_mut(nodes, right).set_parent(Some(s));
                    s_parent
                };

                transplant(nodes, n, n_parent, Some(s));
                link_mut(nodes, s).set_left(Some(left));
                link_mut(nodes, left).set_parent(Some(s));
                link_mut(nodes, s).set_color(n_color);
                trace!(node = %n, successor = %s, "spliced successor into place");
                (child, parent, s_color)
            }
        };

        if removed == Color::Black {
            delete_fixup(nodes, child, parent);
        }

        self.root = parent.or(child).map(|anchor| climb_to_root(nodes, anchor));
        if let Some(root) = self.root {
            link_mut(nodes, root).set_color(Color::Black);
        }
        self.size -= 1;
        link_mut(nodes, n).clear();
        trace!(node = %n, size = self.size, "deleted");
        Ok(n)
    }
}

/// Put `with` where `old` hangs below `parent`.
fn transplant<T: Linked>(
    nodes: &mut [T],
    old: NodeId,
    parent: Option<NodeId>,
    with: Option<NodeId>,
) {
    if let Some(p) = parent {
        let p_link = link_mut(nodes, p);
        if p_link.left() == Some(old) {
            p_link.set_left(with);
        } else {
            p_link.set_right(with);
        }
    }
    if let Some(w) = with {
        link_mut(nodes, w).set_parent(parent);
    }
}

/// Repair the missing black below `parent`, where `x` now sits.
fn delete_fixup<T: Linked>(nodes: &mut [T], mut x: Option<NodeId>, mut parent: Option<NodeId>) {
    loop {
        if let Some(xn) = x {
            if link(nodes, xn).is_red() || parent_of(nodes, xn).is_none() {
                break;
            }
        }
        let Some(p) = parent else {
            break;
        };

        if link(nodes, p).left() == x {
            let Some(mut w) = link(nodes, p).right() else {
                break;
            };
            if link(nodes, w).is_red() {
                link_mut(nodes, w).set_color(Color::Black);
                link_mut(nodes, p).set_color(Color::Red);
                rotate_left_at(nodes, p, w);
                let Some(next) = link(nodes, p).right() else {
                    break;
                };
                w = next;
            }
            let w_left = link(nodes, w).left();
            let w_right = link(nodes, w).right();
            if color_of(nodes, w_left) == Color::Black && color_of(nodes, w_right) == Color::Black {
                link_mut(nodes, w).set_color(Color::Red);
                x = Some(p);
                parent = parent_of(nodes, p);
                continue;
            }
            if color_of(nodes, w_right) == Color::Black {
                if let Some(wl) = w_left {
                    link_mut(nodes, wl).set_color(Color::Black);
                    link_mut(nodes, w).set_color(Color::Red);
                    rotate_right_at(nodes, w, wl);
                    w = wl;
                }
            }
            let p_color = link(nodes, p).color();
            link_mut(nodes, w).set_color(p_color);
            link_mut(nodes, p).set_color(Color::Black);
            if let Some(wr) = link(nodes, w).right() {
                link_mut(nodes, wr).set_color(Color::Black);
            }
            rotate_left_at(nodes, p, w);
        } else {
            let Some(mut w) = link(nodes, p).left() else {
                break;
            };
            if link(nodes, w).is_red() {
                link_mut(nodes, w).set_color(Color::Black);
                link_mut(nodes, p).set_color(Color::Red);
                rotate_right_at(nodes, p, w);
                let Some(next) = link(nodes, p).left() else {
                    break;
                };
                w = next;
            }
            let w_left = link(nodes, w).left();
            let w_right = link(nodes, w).right();
            if color_of(nodes, w_left) == Color::Black && color_of(nodes, w_right) == Color::Black {
                link_mut(nodes, w).set_color(Color::Red);
                x = Some(p);
                parent = parent_of(nodes, p);
                continue;
            }
            if color_of(nodes, w_left) == Color::Black {
                if let Some(wr) = w_right {
                    link_mut(nodes, wr).set_color(Color::Black);
                    link_mut(nodes, w).set_color(Color::Red);
                    rotate_left_at(nodes, w, wr);
                    w = wr;
                }
            }
            let p_color = link(nodes, p).color();
            link_mut(nodes, w).set_color(p_color);
            link_mut(nodes, p).set_color(Color::Black);
            if let Some(wl) = link(nodes, w).left() {
                link_mut(nodes, wl).set_color(Color::Black);
            }
            rotate_right_at(nodes, p, w);
        }
        debug!(parent = %p, "absorbed double black by rotation");
        return;
    }

    if let Some(xn) = x {
        link_mut(nodes, xn).set_color(Color::Black);
    }
}
