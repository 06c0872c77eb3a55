use core::cmp::Ordering;

use tracing::{debug, trace};

use super::Sequence;
use crate::comparator::Comparator;
use crate::error::{Error, JoinError};
use crate::raw::{Arena, LinkHandle, LinkNode, RawAvlTree, Side};

impl<K, C: Comparator<K> + PartialEq> Sequence<K, C> {
    /// Joins two sequences where every key of `left` orders before every key of `right`.
    ///
    /// Both inputs are consumed. Their trees are spliced together by the AVL join, which only
    /// walks the taller tree's outer spine down to the shorter tree's height, and the linked
    /// orders are connected at the single new boundary between `left`'s largest key and
    /// `right`'s smallest. The shorter side's storage is moved across in O(its size).
    ///
    /// # Errors
    ///
    /// The inputs are handed back inside the [`JoinError`] when
    ///
    /// - the comparators are not equal ([`Error::IncompatibleComparators`]), or
    /// - `left`'s largest key does not order before `right`'s smallest
    ///   ([`Error::Overlapping`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::Sequence;
    ///
    /// let mut left = Sequence::new();
    /// left.insert(1).unwrap();
    /// left.insert(2).unwrap();
    /// let mut right = Sequence::new();
    /// for key in 3..=7 {
    ///     right.insert(key).unwrap();
    /// }
    ///
    /// let joined = Sequence::join(left, right).unwrap();
    /// assert_eq!(joined.get(&2).unwrap().right(), joined.get(&3));
    /// assert_eq!(joined.get(&3).unwrap().left(), joined.get(&2));
    /// assert_eq!(joined.len(), 7);
    /// ```
    pub fn join(left: Self, right: Self) -> Result<Self, JoinError<K, C>> {
        if left.comparator != right.comparator {
            debug!("rejecting join of sequences with unequal comparators");
            return Err(JoinError::new(Error::IncompatibleComparators, left, right));
        }

        let (Some(left_max), Some(right_min)) = (left.last_handle(), right.first_handle()) else {
            return Ok(if left.is_empty() { right } else { left });
        };

        if left.comparator.compare(left.key(left_max), right.key(right_min)) != Ordering::Less {
            debug!(left_len = left.len(), right_len = right.len(), "rejecting join of overlapping sequences");
            return Err(JoinError::new(Error::Overlapping, left, right));
        }

        trace!(left_len = left.len(), right_len = right.len(), "joining sequences");

        let Sequence {
            tree: mut left_tree,
            links: left_links,
            comparator,
        } = left;
        let Sequence {
            tree: mut right_tree,
            links: right_links,
            ..
        } = right;

        // Link storage follows the tree: the side whose nodes get absorbed also hands over
        // its links, and the link handles its tree holds are rebased to match.
        let (links, left_max, right_min) = match RawAvlTree::absorbed_side(&left_tree, &right_tree) {
            Side::Right => {
                let mut links = left_links;
                let offset = absorb_links(&mut links, right_links, &mut right_tree);
                (links, left_max, right_min.rebased(offset))
            }
            Side::Left => {
                let mut links = right_links;
                let offset = absorb_links(&mut links, left_links, &mut left_tree);
                (links, left_max.rebased(offset), right_min)
            }
        };

        let mut joined = Sequence {
            tree: RawAvlTree::join(left_tree, right_tree),
            links,
            comparator,
        };
        joined.connect(Some(left_max), Some(right_min));
        Ok(joined)
    }
}

/// Moves `other` into `links` and points the items of `tree` at the moved links.
fn absorb_links<K>(
    links: &mut Arena<LinkNode<K>>,
    other: Arena<LinkNode<K>>,
    tree: &mut RawAvlTree<LinkHandle<K>>,
) -> usize {
    let offset = links.absorb(other, LinkNode::rebase);
    tree.rebase_items(|handle| *handle = handle.rebased(offset));
    offset
}
