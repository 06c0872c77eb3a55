use core::cmp::Ordering;

use tracing::trace;

use super::arena::Arena;
use super::navigation::{is_leaf, leftmost, rightmost};
use super::node::{Node, NodeHandle, Side};

/// The AVL tree backing `Sequence`.
///
/// The tree never compares items itself. Every descent is steered by a caller-supplied
/// closure returning how the sought item orders relative to the item of the node being
/// visited, which lets the items be handles into storage the tree knows nothing about.
pub(crate) struct RawAvlTree<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<NodeHandle<T>>,
}

/// Result of steering a descent from the root.
pub(crate) enum SearchResult<T> {
    /// A node holding an equal item.
    Found(NodeHandle<T>),
    /// The empty child slot where an equal item would be attached.
    Vacant(Vacancy<T>),
}

/// An empty child slot. Only valid until the tree is next mutated.
pub(crate) struct Vacancy<T> {
    parent: Option<NodeHandle<T>>,
    side: Side,
}

impl<T> RawAvlTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of nodes in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) const fn root(&self) -> Option<NodeHandle<T>> {
        self.root
    }

    /// Returns the height of the whole tree; zero when empty.
    pub(crate) fn height(&self) -> u8 {
        self.subtree_height(self.root)
    }

    #[inline]
    pub(crate) fn node(&self, handle: NodeHandle<T>) -> &Node<T> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: NodeHandle<T>) -> &mut Node<T> {
        self.nodes.get_mut(handle)
    }

    /// Returns the node holding the smallest item.
    pub(crate) fn first(&self) -> Option<NodeHandle<T>> {
        self.root.map(|root| leftmost(self, root))
    }

    /// Returns the node holding the largest item.
    pub(crate) fn last(&self) -> Option<NodeHandle<T>> {
        self.root.map(|root| rightmost(self, root))
    }

    /// Applies `f` to the item of every node, in no particular order.
    pub(crate) fn rebase_items(&mut self, mut f: impl FnMut(&mut T)) {
        self.nodes.for_each_mut(|node| f(node.item_mut()));
    }

    /// Descends from the root, going left when `cmp` reports `Less` and right on `Greater`.
    pub(crate) fn search(&self, mut cmp: impl FnMut(&T) -> Ordering) -> SearchResult<T> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.node(handle);
            side = match cmp(node.item()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return SearchResult::Found(handle),
            };
            parent = Some(handle);
            current = node.child(side);
        }

        SearchResult::Vacant(Vacancy {
            parent,
            side,
        })
    }

    /// Returns the node holding an item `cmp` reports as `Equal`.
    pub(crate) fn find(&self, cmp: impl FnMut(&T) -> Ordering) -> Option<NodeHandle<T>> {
        match self.search(cmp) {
            SearchResult::Found(handle) => Some(handle),
            SearchResult::Vacant(_) => None,
        }
    }

    /// Attaches `item` as a new leaf in `vacancy` and restores balance up to the root.
    ///
    /// Rotations never move items between nodes, so the returned handle keeps holding `item`.
    pub(crate) fn insert_at(&mut self, vacancy: Vacancy<T>, item: T) -> NodeHandle<T> {
        let Vacancy {
            parent,
            side,
        } = vacancy;

        let handle = self.nodes.alloc(Node::new(item));
        self.node_mut(handle).set_parent(parent);
        match parent {
            None => {
                assert!(self.root.is_none(), "`RawAvlTree::insert_at()` - stale vacancy at the root!");
                self.root = Some(handle);
            }
            Some(parent) => {
                assert!(
                    self.node(parent).child(side).is_none(),
                    "`RawAvlTree::insert_at()` - stale vacancy, slot is occupied!"
                );
                self.node_mut(parent).set_child(side, Some(handle));
            }
        }

        self.rebalance_upwards(parent);
        handle
    }

    /// Removes `handle` from the tree and returns the item it held.
    ///
    /// A node with two children trades items with its in-order successor, and the successor's
    /// node (which has no left child) is spliced out instead. Any handle to that successor
    /// node is invalidated; `handle` itself then holds the successor's item.
    pub(crate) fn remove(&mut self, handle: NodeHandle<T>) -> T {
        let node = self.node(handle);
        let target = match (node.left(), node.right()) {
            (Some(_), Some(right)) => {
                let successor = leftmost(self, right);
                let (a, b) = self.nodes.pair_mut(handle, successor);
                core::mem::swap(a.item_mut(), b.item_mut());
                successor
            }
            _ => handle,
        };

        // A leaf is unlinked outright; a node with one child hands its slot to that child.
        let parent = self.node(target).parent();
        let child = if is_leaf(self, target) {
            None
        } else {
            let target_node = self.node(target);
            target_node.left().or(target_node.right())
        };
        if let Some(child) = child {
            self.node_mut(child).set_parent(parent);
        }
        self.replace_child(parent, target, child);

        let removed = self.nodes.take(target);
        self.rebalance_upwards(parent);
        removed.into_item()
    }

    /// Which input of [`join`](Self::join) has its nodes moved into the other's arena.
    ///
    /// The shorter tree is absorbed; on a tie, the right one.
    pub(crate) fn absorbed_side(left: &Self, right: &Self) -> Side {
        if left.height() >= right.height() {
            Side::Right
        } else {
            Side::Left
        }
    }

    /// Joins two trees where every item of `left` orders before every item of `right`.
    ///
    /// The ordering is not re-validated. The splice itself walks only the taller tree's
    /// outer spine down to the shorter tree's height and back, so it costs
    /// O(|height(left) - height(right)|) beyond moving the shorter tree's nodes across.
    pub(crate) fn join(mut left: Self, mut right: Self) -> Self {
        if left.is_empty() {
            return right;
        }
        if right.is_empty() {
            return left;
        }

        trace!(left_height = left.height(), right_height = right.height(), "joining AVL trees");
        match Self::absorbed_side(&left, &right) {
            Side::Right => {
                let pivot = right.first().expect("`RawAvlTree::join()` - right tree is non-empty");
                let item = right.remove(pivot);
                left.graft(item, right, Side::Right);
                left
            }
            Side::Left => {
                let pivot = left.last().expect("`RawAvlTree::join()` - left tree is non-empty");
                let item = left.remove(pivot);
                right.graft(item, left, Side::Left);
                right
            }
        }
    }

    /// Attaches `other` on `side` of this tree, with `pivot` ordering between the two.
    ///
    /// This tree must be at least as tall as `other`.
    fn graft(&mut self, pivot: T, other: Self, side: Side) {
        let Self {
            nodes,
            root,
        } = other;
        let offset = self.nodes.absorb(nodes, Node::rebase);
        let other_root = root.map(|handle| handle.rebased(offset));
        let other_height = self.subtree_height(other_root);
        debug_assert!(self.height() >= other_height, "`RawAvlTree::graft()` - grafting a taller tree!");

        // Walk the outer spine until the subtree is within one level of `other`.
        let mut parent = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            if node.height() <= other_height + 1 {
                break;
            }
            parent = Some(handle);
            current = node.child(side);
        }

        let pivot = self.nodes.alloc(Node::new(pivot));
        let pivot_node = self.node_mut(pivot);
        pivot_node.set_parent(parent);
        pivot_node.set_child(side.opposite(), current);
        pivot_node.set_child(side, other_root);
        for child in [current, other_root].into_iter().flatten() {
            self.node_mut(child).set_parent(Some(pivot));
        }
        match parent {
            None => self.root = Some(pivot),
            Some(parent) => self.node_mut(parent).set_child(side, Some(pivot)),
        }

        self.update_height(pivot);
        self.rebalance_upwards(parent);
    }

    fn subtree_height(&self, handle: Option<NodeHandle<T>>) -> u8 {
        handle.map_or(0, |handle| self.node(handle).height())
    }

    fn update_height(&mut self, handle: NodeHandle<T>) {
        let node = self.node(handle);
        let height = 1 + self.subtree_height(node.left()).max(self.subtree_height(node.right()));
        self.node_mut(handle).set_height(height);
    }

    /// Height of the left subtree minus height of the right subtree.
    fn balance_factor(&self, handle: NodeHandle<T>) -> i16 {
        let node = self.node(handle);
        i16::from(self.subtree_height(node.left())) - i16::from(self.subtree_height(node.right()))
    }

    /// Points `parent`'s reference to `old` (or the root) at `new`.
    fn replace_child(&mut self, parent: Option<NodeHandle<T>>, old: NodeHandle<T>, new: Option<NodeHandle<T>>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent = self.node_mut(parent);
                if parent.left() == Some(old) {
                    parent.set_left(new);
                } else {
                    debug_assert_eq!(parent.right(), Some(old), "`RawAvlTree::replace_child()` - not a child!");
                    parent.set_right(new);
                }
            }
        }
    }

    /// Rotates `handle` down towards `side`; its child on the opposite side takes its place.
    /// Returns the new subtree root.
    fn rotate(&mut self, handle: NodeHandle<T>, side: Side) -> NodeHandle<T> {
        let up = side.opposite();
        let node = self.node(handle);
        let parent = node.parent();
        let promoted = node.child(up).expect("`RawAvlTree::rotate()` - no child to promote!");
        let inner = self.node(promoted).child(side);

        self.node_mut(handle).set_child(up, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(handle));
        }
        self.node_mut(promoted).set_child(side, Some(handle));
        self.node_mut(handle).set_parent(Some(promoted));
        self.node_mut(promoted).set_parent(parent);
        self.replace_child(parent, handle, Some(promoted));

        self.update_height(handle);
        self.update_height(promoted);
        promoted
    }

    /// Restores the height and balance of the subtree at `handle`, assuming both of its
    /// subtrees are balanced and differ in height by at most two. Returns the subtree root.
    fn rebalance(&mut self, handle: NodeHandle<T>) -> NodeHandle<T> {
        self.update_height(handle);
        match self.balance_factor(handle) {
            2.. => {
                let left = self.node(handle).left().expect("`RawAvlTree::rebalance()` - left-heavy without left child!");
                if self.balance_factor(left) < 0 {
                    self.rotate(left, Side::Left);
                }
                self.rotate(handle, Side::Right)
            }
            ..=-2 => {
                let right =
                    self.node(handle).right().expect("`RawAvlTree::rebalance()` - right-heavy without right child!");
                if self.balance_factor(right) > 0 {
                    self.rotate(right, Side::Right);
                }
                self.rotate(handle, Side::Left)
            }
            _ => handle,
        }
    }

    fn rebalance_upwards(&mut self, mut current: Option<NodeHandle<T>>) {
        while let Some(handle) = current {
            let top = self.rebalance(handle);
            current = self.node(top).parent();
        }
    }
}
