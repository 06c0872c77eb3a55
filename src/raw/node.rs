use super::handle::Handle;

pub(crate) type NodeHandle<T> = Handle<Node<T>>;

/// An AVL tree node.
///
/// Children are owned by the node in the tree's sense (removing a node removes its place
/// in the structure); `parent` is a back-reference for navigation only.
pub(crate) struct Node<T> {
    item: T,
    parent: Option<NodeHandle<T>>,
    left: Option<NodeHandle<T>>,
    right: Option<NodeHandle<T>>,
    // Height of the subtree rooted here; a leaf has height 1.
    height: u8,
}

impl<T> Node<T> {
    /// Creates a detached leaf.
    pub(crate) const fn new(item: T) -> Self {
        Self {
            item,
            parent: None,
            left: None,
            right: None,
            height: 1,
        }
    }

    #[inline]
    pub(crate) const fn item(&self) -> &T {
        &self.item
    }

    #[inline]
    pub(crate) fn item_mut(&mut self) -> &mut T {
        &mut self.item
    }

    pub(crate) fn into_item(self) -> T {
        self.item
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<NodeHandle<T>> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<NodeHandle<T>>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<NodeHandle<T>> {
        self.left
    }

    #[inline]
    pub(crate) fn set_left(&mut self, left: Option<NodeHandle<T>>) {
        self.left = left;
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<NodeHandle<T>> {
        self.right
    }

    #[inline]
    pub(crate) fn set_right(&mut self, right: Option<NodeHandle<T>>) {
        self.right = right;
    }

    /// Returns the child on the given side.
    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<NodeHandle<T>> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeHandle<T>>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) const fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub(crate) fn set_height(&mut self, height: u8) {
        self.height = height;
    }

    /// Shifts the structural handles after the node's arena was absorbed at `offset`.
    pub(crate) fn rebase(&mut self, offset: usize) {
        self.parent = self.parent.map(|h| h.rebased(offset));
        self.left = self.left.map(|h| h.rebased(offset));
        self.right = self.right.map(|h| h.rebased(offset));
    }
}

/// Which child slot of a parent a node occupies, or which input of a join.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    #[must_use]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

pub(crate) type LinkHandle<K> = Handle<LinkNode<K>>;

/// One entry of the doubly linked key order.
///
/// Neighbor handles are non-owning: unlinking an entry never frees its neighbors.
pub(crate) struct LinkNode<K> {
    key: K,
    left: Option<LinkHandle<K>>,
    right: Option<LinkHandle<K>>,
}

impl<K> LinkNode<K> {
    pub(crate) const fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn into_key(self) -> K {
        self.key
    }

    /// Returns the predecessor.
    #[inline]
    pub(crate) const fn left(&self) -> Option<LinkHandle<K>> {
        self.left
    }

    #[inline]
    pub(crate) fn set_left(&mut self, left: Option<LinkHandle<K>>) {
        self.left = left;
    }

    /// Returns the successor.
    #[inline]
    pub(crate) const fn right(&self) -> Option<LinkHandle<K>> {
        self.right
    }

    #[inline]
    pub(crate) fn set_right(&mut self, right: Option<LinkHandle<K>>) {
        self.right = right;
    }

    /// Returns the neighbor on `side`: the predecessor for `Left`, the successor for `Right`.
    #[inline]
    pub(crate) const fn neighbor(&self, side: Side) -> Option<LinkHandle<K>> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_neighbor(&mut self, side: Side, neighbor: Option<LinkHandle<K>>) {
        match side {
            Side::Left => self.left = neighbor,
            Side::Right => self.right = neighbor,
        }
    }

    pub(crate) fn rebase(&mut self, offset: usize) {
        self.left = self.left.map(|h| h.rebased(offset));
        self.right = self.right.map(|h| h.rebased(offset));
    }
}
