use core::fmt;

use thiserror::Error;

use crate::Sequence;
use crate::comparator::Natural;

/// Errors raised by [`Sequence`] operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
#[non_exhaustive]
pub enum Error {
    /// The inserted key compares equal to a key already in the sequence.
    #[error("key is already present in the sequence")]
    Duplicate,
    /// The sequences being joined were built with comparators that are not equal.
    #[error("sequences use incompatible comparators")]
    IncompatibleComparators,
    /// The left sequence's largest key does not order before the right sequence's smallest.
    #[error("left sequence's largest key is not below right sequence's smallest key")]
    Overlapping,
}

/// A rejected [`Sequence::join`], carrying both inputs back to the caller unchanged.
#[derive(Error)]
#[error("{kind}")]
pub struct JoinError<K, C = Natural> {
    kind: Error,
    left: Sequence<K, C>,
    right: Sequence<K, C>,
}

impl<K, C> JoinError<K, C> {
    pub(crate) fn new(kind: Error, left: Sequence<K, C>, right: Sequence<K, C>) -> Self {
        Self {
            kind,
            left,
            right,
        }
    }

    /// Returns why the join was rejected.
    #[must_use]
    pub fn kind(&self) -> Error {
        self.kind
    }

    /// Returns the `(left, right)` inputs of the rejected join.
    #[must_use]
    pub fn into_inner(self) -> (Sequence<K, C>, Sequence<K, C>) {
        (self.left, self.right)
    }
}

impl<K, C> fmt::Debug for JoinError<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinError")
            .field("kind", &self.kind)
            .field("left_len", &self.left.len())
            .field("right_len", &self.right.len())
            .finish()
    }
}

impl<K, C> From<JoinError<K, C>> for Error {
    fn from(error: JoinError<K, C>) -> Self {
        error.kind
    }
}
