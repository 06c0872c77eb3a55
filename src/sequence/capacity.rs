use super::Sequence;
use crate::comparator::Natural;
use crate::raw::{Arena, RawAvlTree};

impl<K> Sequence<K, Natural> {
    /// Creates an empty sequence with room for at least `capacity` keys before reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::Sequence;
    ///
    /// let sequence: Sequence<i32> = Sequence::with_capacity(16);
    /// assert!(sequence.is_empty());
    /// assert!(sequence.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<K, C> Sequence<K, C> {
    /// Creates an empty sequence ordered by `comparator` with room for at least `capacity`
    /// keys before reallocating.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Sequence {
            tree: RawAvlTree::with_capacity(capacity),
            links: Arena::with_capacity(capacity),
            comparator,
        }
    }

    /// Returns how many keys the sequence can hold without reallocating.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity().min(self.links.capacity())
    }
}
