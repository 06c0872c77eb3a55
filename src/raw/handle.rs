use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// A typed index into an [`Arena<T>`](super::arena::Arena).
///
/// The type parameter only tags which arena a handle belongs to, so a tree
/// node handle can never be used to address a link and vice versa.
#[repr(transparent)]
pub(crate) struct Handle<T> {
    raw: NonZero<RawHandle>,
    marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        let Some(raw) = NonZero::new((index + 1) as RawHandle) else {
            unreachable!()
        };
        Self {
            raw,
            marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.raw.get() - 1) as usize
    }

    /// Returns the handle this one becomes once its arena is appended after `offset` slots.
    #[inline]
    #[must_use]
    pub(crate) const fn rebased(self, offset: usize) -> Self {
        Self::from_index(self.to_index() + offset)
    }
}

// Manual impls: deriving would put bounds on `T`, which is only a tag.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.to_index())
    }
}
