use core::borrow::Borrow;
use core::fmt;

use tracing::trace;

use crate::comparator::{Comparator, Natural};
use crate::error::Error;
use crate::raw::navigation::{predecessor, successor};
use crate::raw::{Arena, LinkHandle, LinkNode, NodeHandle, RawAvlTree, SearchResult, Side};

mod capacity;
mod join;
mod link;
mod neighbor;

pub use link::Link;

/// An ordered index of unique keys with O(1) neighbor links.
///
/// Keys are kept in an AVL tree ordered by the sequence's [`Comparator`], so insertion,
/// deletion and lookup take O(log n). Every key also owns a [`Link`] into a doubly linked
/// list whose order always equals the sorted key order: once a key's link is found, its
/// predecessor and successor are one step away.
///
/// Two sequences whose keys do not interleave can be [joined](Sequence::join) without
/// re-inserting either one.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative
/// to any other key changes while it is in the sequence. The behavior resulting from such a
/// logic error is not specified, but will not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use avl_sequence::Sequence;
///
/// let mut sequence = Sequence::new();
/// for key in [1, 10, 7, 5, 18] {
///     sequence.insert(key).unwrap();
/// }
///
/// let ten = sequence.get(&10).unwrap();
/// assert_eq!(ten.left().map(|link| *link.value()), Some(7));
/// assert_eq!(ten.right().map(|link| *link.value()), Some(18));
///
/// assert_eq!(sequence.greater_than(&7), Some(&10));
/// assert_eq!(sequence.less_than(&1), None);
///
/// sequence.delete(&7);
/// assert_eq!(sequence.get(&10).unwrap().left(), sequence.get(&5));
/// ```
pub struct Sequence<K, C = Natural> {
    tree: RawAvlTree<LinkHandle<K>>,
    links: Arena<LinkNode<K>>,
    comparator: C,
}

impl<K> Sequence<K> {
    /// Makes a new, empty `Sequence` ordered by [`Ord`].
    ///
    /// Does not allocate anything on its own.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, C> Sequence<K, C> {
    /// Makes a new, empty `Sequence` ordered by `comparator`.
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            tree: RawAvlTree::new(),
            links: Arena::new(),
            comparator,
        }
    }

    /// Returns the comparator ordering this sequence.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of keys in the sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::new();
    /// assert_eq!(sequence.len(), 0);
    /// sequence.insert(1).unwrap();
    /// assert_eq!(sequence.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the sequence contains no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.links.clear();
    }

    /// Returns the link of the smallest key, the head of the linked order.
    #[must_use]
    pub fn first(&self) -> Option<Link<'_, K, C>> {
        self.first_handle().map(|handle| self.link(handle))
    }

    /// Returns the link of the largest key, the tail of the linked order.
    #[must_use]
    pub fn last(&self) -> Option<Link<'_, K, C>> {
        self.last_handle().map(|handle| self.link(handle))
    }

    fn first_handle(&self) -> Option<LinkHandle<K>> {
        self.tree.first().map(|node| self.item(node))
    }

    fn last_handle(&self) -> Option<LinkHandle<K>> {
        self.tree.last().map(|node| self.item(node))
    }

    fn link(&self, handle: LinkHandle<K>) -> Link<'_, K, C> {
        Link::new(self, handle)
    }

    #[inline]
    fn item(&self, node: NodeHandle<LinkHandle<K>>) -> LinkHandle<K> {
        *self.tree.node(node).item()
    }

    #[inline]
    fn key(&self, handle: LinkHandle<K>) -> &K {
        self.links.get(handle).key()
    }

    #[inline]
    fn key_at(&self, node: NodeHandle<LinkHandle<K>>) -> &K {
        self.key(self.item(node))
    }

    /// Places the detached link `new` directly on `side` of `anchor`.
    fn splice(&mut self, anchor: LinkHandle<K>, new: LinkHandle<K>, side: Side) {
        let outer = self.links.get(anchor).neighbor(side);
        self.links.get_mut(anchor).set_neighbor(side, Some(new));

        let link = self.links.get_mut(new);
        link.set_neighbor(side.opposite(), Some(anchor));
        link.set_neighbor(side, outer);

        if let Some(outer) = outer {
            self.links.get_mut(outer).set_neighbor(side.opposite(), Some(new));
        }
    }

    /// Makes `left` and `right` adjacent; either end may be open.
    fn connect(&mut self, left: Option<LinkHandle<K>>, right: Option<LinkHandle<K>>) {
        if let Some(left) = left {
            self.links.get_mut(left).set_right(right);
        }
        if let Some(right) = right {
            self.links.get_mut(right).set_left(left);
        }
    }

    fn find<Q>(&self, probe: &Q) -> Option<NodeHandle<LinkHandle<K>>>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.tree.find(|item| self.comparator.compare(probe, self.key(*item).borrow()))
    }

    /// Returns the link of the key equal to `probe`.
    ///
    /// # Complexity
    ///
    /// O(log n): the link is reached through a descent of the tree, not a hash lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::new();
    /// sequence.insert(1).unwrap();
    /// assert_eq!(sequence.get(&1).map(|link| *link.value()), Some(1));
    /// assert!(sequence.get(&2).is_none());
    /// ```
    pub fn get<Q>(&self, probe: &Q) -> Option<Link<'_, K, C>>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.find(probe).map(|node| self.link(self.item(node)))
    }

    /// Returns `true` if a key equal to `probe` is present.
    pub fn contains<Q>(&self, probe: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.find(probe).is_some()
    }

    /// Removes the key equal to `probe`, returning it, and splices its link out of the
    /// linked order so its former neighbors become adjacent.
    pub fn remove<Q>(&mut self, probe: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let node = self.find(probe)?;
        let handle = self.tree.remove(node);
        let link = self.links.take(handle);
        self.connect(link.left(), link.right());
        Some(link.into_key())
    }

    /// Deletes the key equal to `probe`. Deleting an absent key does nothing.
    ///
    /// Returns whether a key was deleted.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::new();
    /// for key in [1, 3, 5] {
    ///     sequence.insert(key).unwrap();
    /// }
    /// assert!(sequence.delete(&3));
    /// assert!(!sequence.delete(&3));
    /// assert_eq!(sequence.get(&1).unwrap().right(), sequence.get(&5));
    /// ```
    pub fn delete<Q>(&mut self, probe: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let deleted = self.remove(probe).is_some();
        if !deleted {
            trace!("delete of an absent key ignored");
        }
        deleted
    }
}

impl<K, C: Comparator<K>> Sequence<K, C> {
    /// Inserts `key` and returns its link, already connected to its sorted neighbors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Duplicate`] if an equal key is present; the sequence is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::{Error, Sequence};
    ///
    /// let mut sequence = Sequence::new();
    /// let link = sequence.insert(1).unwrap();
    /// assert_eq!(*link.value(), 1);
    /// assert!(link.left().is_none() && link.right().is_none());
    ///
    /// assert_eq!(sequence.insert(1).unwrap_err(), Error::Duplicate);
    /// ```
    pub fn insert(&mut self, key: K) -> Result<Link<'_, K, C>, Error> {
        let vacancy = match self.tree.search(|item| self.comparator.compare(&key, self.key(*item))) {
            SearchResult::Found(_) => return Err(Error::Duplicate),
            SearchResult::Vacant(vacancy) => vacancy,
        };

        let handle = self.links.alloc(LinkNode::new(key));
        let node = self.tree.insert_at(vacancy, handle);

        if let Some(before) = predecessor(&self.tree, node) {
            self.splice(self.item(before), handle, Side::Right);
        } else if let Some(after) = successor(&self.tree, node) {
            self.splice(self.item(after), handle, Side::Left);
        }

        Ok(self.link(handle))
    }
}

impl<K> Default for Sequence<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, C> fmt::Debug for Sequence<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut current = self.first();
        while let Some(link) = current {
            list.entry(link.value());
            current = link.right();
        }
        list.finish()
    }
}
