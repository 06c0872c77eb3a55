use core::cmp::Ordering;
use core::fmt;

/// A total order over `T`.
///
/// A [`Sequence`](crate::Sequence) consults its comparator for every placement and lookup,
/// so key equality inside a sequence is comparator equality. Two sequences can only be
/// [joined](crate::Sequence::join) when their comparators compare equal with [`PartialEq`].
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use avl_sequence::{Comparator, Sequence};
///
/// #[derive(PartialEq)]
/// struct ByLength;
///
/// impl Comparator<str> for ByLength {
///     fn compare(&self, a: &str, b: &str) -> Ordering {
///         a.len().cmp(&b.len())
///     }
/// }
///
/// impl Comparator<&str> for ByLength {
///     fn compare(&self, a: &&str, b: &&str) -> Ordering {
///         a.len().cmp(&b.len())
///     }
/// }
///
/// let mut words = Sequence::with_comparator(ByLength);
/// words.insert("ccc").unwrap();
/// words.insert("a").unwrap();
/// assert!(words.insert("b").is_err()); // same length as "a"
/// assert_eq!(words.first().map(|link| *link.value()), Some("a"));
/// ```
pub trait Comparator<T: ?Sized> {
    /// Returns how `a` orders relative to `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The comparator of the [`Ord`] implementation. All `Natural`s are equal.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// A comparator backed by a plain function pointer.
///
/// Two `FnComparator`s are equal when they wrap the same function.
///
/// # Examples
///
/// ```
/// use avl_sequence::{FnComparator, Sequence};
///
/// fn descending(a: &i32, b: &i32) -> core::cmp::Ordering {
///     b.cmp(a)
/// }
///
/// let mut sequence = Sequence::with_comparator(FnComparator::new(descending));
/// sequence.insert(1).unwrap();
/// sequence.insert(3).unwrap();
/// assert_eq!(sequence.first().map(|link| *link.value()), Some(3));
/// ```
pub struct FnComparator<T: ?Sized>(fn(&T, &T) -> Ordering);

impl<T: ?Sized> FnComparator<T> {
    #[must_use]
    pub const fn new(f: fn(&T, &T) -> Ordering) -> Self {
        Self(f)
    }
}

impl<T: ?Sized> Comparator<T> for FnComparator<T> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}

impl<T: ?Sized> Clone for FnComparator<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for FnComparator<T> {}

impl<T: ?Sized> PartialEq for FnComparator<T> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::fn_addr_eq(self.0, other.0)
    }
}

impl<T: ?Sized> fmt::Debug for FnComparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnComparator").field(&(self.0 as *const ())).finish()
    }
}

/// Reverses the order of another comparator.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Reverse<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reverse<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}
