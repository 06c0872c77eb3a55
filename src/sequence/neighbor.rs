use core::borrow::Borrow;
use core::cmp::Ordering;

use super::Sequence;
use crate::comparator::Comparator;
use crate::raw::Side;

impl<K, C> Sequence<K, C> {
    /// Returns the key equal to `probe`.
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
    /// assert_eq!(sequence.equal_to(&3), Some(&3));
    /// assert_eq!(sequence.equal_to(&4), None);
    /// ```
    pub fn equal_to<Q>(&self, probe: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.find(probe).map(|node| self.key_at(node))
    }

    /// Returns the smallest key strictly greater than `probe`.
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
    /// assert_eq!(sequence.greater_than(&0), Some(&1));
    /// assert_eq!(sequence.greater_than(&3), Some(&5));
    /// assert_eq!(sequence.greater_than(&5), None);
    /// ```
    pub fn greater_than<Q>(&self, probe: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.bound(probe, Ordering::Greater)
    }

    /// Returns the greatest key strictly less than `probe`.
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
    /// assert_eq!(sequence.less_than(&1), None);
    /// assert_eq!(sequence.less_than(&3), Some(&1));
    /// assert_eq!(sequence.less_than(&6), Some(&5));
    /// ```
    pub fn less_than<Q>(&self, probe: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.bound(probe, Ordering::Less)
    }

    /// Finds the key closest to `probe` among those ordering `beyond` it.
    ///
    /// Every key that qualifies becomes the best candidate so far, and the descent continues
    /// back towards `probe` looking for a closer one.
    fn bound<Q>(&self, probe: &Q, beyond: Ordering) -> Option<&K>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let (toward, away) = match beyond {
            Ordering::Greater => (Side::Left, Side::Right),
            _ => (Side::Right, Side::Left),
        };

        let mut best = None;
        let mut current = self.tree.root();
        while let Some(node) = current {
            let key = self.key_at(node);
            let side = if self.comparator.compare(key.borrow(), probe) == beyond {
                best = Some(key);
                toward
            } else {
                away
            };
            current = self.tree.node(node).child(side);
        }
        best
    }
}
