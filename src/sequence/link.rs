use core::fmt;
use core::ptr;

use super::Sequence;
use crate::comparator::Natural;
use crate::raw::LinkHandle;

/// A read-only view of one key's place in a [`Sequence`]'s linked order.
///
/// Following [`left`](Link::left) and [`right`](Link::right) walks the keys in descending
/// and ascending order, one O(1) step at a time.
///
/// Links compare equal when they are the same entry of the same sequence.
///
/// # Examples
///
/// ```
/// use avl_sequence::Sequence;
///
/// let mut sequence = Sequence::new();
/// for key in [3, 1, 2] {
///     sequence.insert(key).unwrap();
/// }
///
/// let mut ascending = Vec::new();
/// let mut current = sequence.first();
/// while let Some(link) = current {
///     ascending.push(*link.value());
///     current = link.right();
/// }
/// assert_eq!(ascending, [1, 2, 3]);
/// ```
pub struct Link<'a, K, C = Natural> {
    sequence: &'a Sequence<K, C>,
    handle: LinkHandle<K>,
}

impl<'a, K, C> Link<'a, K, C> {
    pub(super) fn new(sequence: &'a Sequence<K, C>, handle: LinkHandle<K>) -> Self {
        Self {
            sequence,
            handle,
        }
    }

    /// Returns the key this link stands for.
    #[must_use]
    pub fn value(&self) -> &'a K {
        self.sequence.key(self.handle)
    }

    /// Returns the link of the next smaller key.
    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.sequence.links.get(self.handle).left().map(|handle| Self::new(self.sequence, handle))
    }

    /// Returns the link of the next larger key.
    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.sequence.links.get(self.handle).right().map(|handle| Self::new(self.sequence, handle))
    }
}

impl<K, C> Clone for Link<'_, K, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, C> Copy for Link<'_, K, C> {}

impl<K, C> PartialEq for Link<'_, K, C> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.sequence, other.sequence) && self.handle == other.handle
    }
}

impl<K, C> Eq for Link<'_, K, C> {}

impl<K: fmt::Debug, C> fmt::Debug for Link<'_, K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("value", self.value())
            .field("left", &self.left().map(|link| link.value()))
            .field("right", &self.right().map(|link| link.value()))
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn links_of_different_sequences_differ() {
        let mut a = Sequence::new();
        a.insert(1).unwrap();
        let mut b = Sequence::new();
        b.insert(1).unwrap();

        assert_eq!(a.get(&1), a.first());
        assert_ne!(a.get(&1), b.get(&1));
    }

    #[test]
    fn debug_shows_neighbors() {
        let mut sequence = Sequence::new();
        for key in [1, 2, 3] {
            sequence.insert(key).unwrap();
        }
        let link = sequence.get(&2).unwrap();
        assert_eq!(alloc::format!("{link:?}"), "Link { value: 2, left: Some(1), right: Some(3) }");
        let first = sequence.first().unwrap();
        assert_eq!(alloc::format!("{first:?}"), "Link { value: 1, left: None, right: Some(2) }");
    }
}
