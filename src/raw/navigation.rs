//! Read-only helpers over the current shape of a [`RawAvlTree`].
//!
//! Every function takes a live node handle; passing a handle that does not address a node
//! of `tree` is a bug and panics.

use super::node::{NodeHandle, Side};
use super::raw_avl_tree::RawAvlTree;

/// Descends maximally left from `node`.
pub(crate) fn leftmost<T>(tree: &RawAvlTree<T>, node: NodeHandle<T>) -> NodeHandle<T> {
    outermost(tree, node, Side::Left)
}

/// Descends maximally right from `node`.
pub(crate) fn rightmost<T>(tree: &RawAvlTree<T>, node: NodeHandle<T>) -> NodeHandle<T> {
    outermost(tree, node, Side::Right)
}

pub(crate) fn outermost<T>(tree: &RawAvlTree<T>, mut node: NodeHandle<T>, side: Side) -> NodeHandle<T> {
    while let Some(child) = tree.node(node).child(side) {
        node = child;
    }
    node
}

/// Returns the side of its parent that `node` hangs from, or `None` for a root.
pub(crate) fn side_of<T>(tree: &RawAvlTree<T>, node: NodeHandle<T>) -> Option<Side> {
    let parent = tree.node(tree.node(node).parent()?);
    if parent.left() == Some(node) {
        Some(Side::Left)
    } else {
        debug_assert_eq!(parent.right(), Some(node), "`side_of()` - parent does not reference child!");
        Some(Side::Right)
    }
}

pub(crate) fn is_left_child<T>(tree: &RawAvlTree<T>, node: NodeHandle<T>) -> bool {
    side_of(tree, node) == Some(Side::Left)
}

pub(crate) fn is_right_child<T>(tree: &RawAvlTree<T>, node: NodeHandle<T>) -> bool {
    side_of(tree, node) == Some(Side::Right)
}

/// Returns `true` if `node` has no children.
pub(crate) fn is_leaf<T>(tree: &RawAvlTree<T>, node: NodeHandle<T>) -> bool {
    let node = tree.node(node);
    node.left().is_none() && node.right().is_none()
}

/// Returns the in-order neighbor of `node` on `side`, derived from the tree's structure.
///
/// With a child on `side`, the neighbor is that child's outermost descendant on the opposite
/// side. Otherwise ascend while `node` hangs from the `side` slot of its parent; the first
/// parent reached through the opposite slot is the neighbor.
pub(crate) fn neighbor<T>(tree: &RawAvlTree<T>, node: NodeHandle<T>, side: Side) -> Option<NodeHandle<T>> {
    if let Some(child) = tree.node(node).child(side) {
        return Some(outermost(tree, child, side.opposite()));
    }

    let hangs_on_side = match side {
        Side::Left => is_left_child::<T>,
        Side::Right => is_right_child::<T>,
    };
    let mut current = node;
    while hangs_on_side(tree, current) {
        current = tree.node(current).parent()?;
    }
    tree.node(current).parent()
}

/// Returns the node holding the next smaller item.
pub(crate) fn predecessor<T>(tree: &RawAvlTree<T>, node: NodeHandle<T>) -> Option<NodeHandle<T>> {
    neighbor(tree, node, Side::Left)
}

/// Returns the node holding the next larger item.
pub(crate) fn successor<T>(tree: &RawAvlTree<T>, node: NodeHandle<T>) -> Option<NodeHandle<T>> {
    neighbor(tree, node, Side::Right)
}
