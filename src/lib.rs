//! An ordered index of unique keys with linked neighbors and O(height difference) joins.
//!
//! This crate provides [`Sequence`], a sorted set of keys backed by an AVL tree whose
//! entries are also threaded onto a doubly linked list in key order:
//!
//! - [`insert`](Sequence::insert) / [`delete`](Sequence::delete) - O(log n), with the list
//!   spliced in place rather than rebuilt
//! - [`get`](Sequence::get) - the key's [`Link`], from which [`left`](Link::left) and
//!   [`right`](Link::right) reach the predecessor and successor in O(1)
//! - [`equal_to`](Sequence::equal_to), [`greater_than`](Sequence::greater_than),
//!   [`less_than`](Sequence::less_than) - O(log n) exact and neighbor lookups
//! - [`join`](Sequence::join) - merges two sequences whose keys do not interleave by
//!   splicing their trees together
//!
//! # Example
//!
//! ```
//! use avl_sequence::Sequence;
//!
//! let mut low = Sequence::new();
//! low.insert(1).unwrap();
//! low.insert(2).unwrap();
//!
//! let mut high = Sequence::new();
//! for key in [7, 3, 5] {
//!     high.insert(key).unwrap();
//! }
//! assert_eq!(high.get(&5).unwrap().left().map(|link| *link.value()), Some(3));
//!
//! let joined = Sequence::join(low, high).unwrap();
//! assert_eq!(joined.get(&2).unwrap().right(), joined.get(&3));
//! assert_eq!(joined.greater_than(&5), Some(&7));
//! ```
//!
//! # Ordering
//!
//! Keys are ordered by a [`Comparator`]. [`Natural`] (the default) uses [`Ord`];
//! [`FnComparator`] and [`Reverse`] cover custom orders. Key equality inside a sequence is
//! comparator equality, and only sequences with equal comparators can be joined.
//!
//! # Implementation
//!
//! Tree nodes and links live in two arenas addressed by handles, so parent back-references
//! and list neighbors are plain indices and rotations never allocate. A join moves the
//! shorter tree's arenas behind the taller one's, then grafts the shorter tree onto the
//! taller tree's outer spine at the matching height and rebalances on the way back up.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod comparator;
mod error;
mod raw;

pub mod sequence;

pub use comparator::{Comparator, FnComparator, Natural, Reverse};
pub use error::{Error, JoinError};
pub use sequence::{Link, Sequence};
