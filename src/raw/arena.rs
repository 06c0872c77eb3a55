use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage addressed by [`Handle`]s, with a free list for slot reuse.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle<T>>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle<T> {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()] = Some(element);
            h
        } else {
            assert!(
                self.slots.len() <= Handle::<T>::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::<T>::MAX
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle<T>) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle<T>) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Returns mutable references to two distinct elements at once.
    pub(crate) fn pair_mut(&mut self, a: Handle<T>, b: Handle<T>) -> (&mut T, &mut T) {
        let (ai, bi) = (a.to_index(), b.to_index());
        assert_ne!(ai, bi, "`Arena::pair_mut()` - handles must be distinct!");
        let (first, second) = if ai < bi {
            let (head, tail) = self.slots.split_at_mut(bi);
            (&mut head[ai], &mut tail[0])
        } else {
            let (head, tail) = self.slots.split_at_mut(ai);
            (&mut tail[0], &mut head[bi])
        };
        (
            first.as_mut().expect("`Arena::pair_mut()` - `a` is invalid!"),
            second.as_mut().expect("`Arena::pair_mut()` - `b` is invalid!"),
        )
    }

    pub(crate) fn take(&mut self, handle: Handle<T>) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Visits every live element.
    pub(crate) fn for_each_mut(&mut self, mut f: impl FnMut(&mut T)) {
        self.slots.iter_mut().flatten().for_each(&mut f);
    }

    /// Appends all slots of `other` after this arena's slots and returns the offset they
    /// were shifted by. Every handle stored inside a moved element must be rebased by that
    /// offset, which `rebase` is given the chance to do.
    ///
    /// Handles into `self` stay valid; handles into `other` become `handle.rebased(offset)`.
    pub(crate) fn absorb(&mut self, other: Self, mut rebase: impl FnMut(&mut T, usize)) -> usize {
        let offset = self.slots.len();
        assert!(
            offset + other.slots.len() <= Handle::<T>::MAX + 1,
            "`Arena::absorb()` - combined arena exceeds maximum capacity ({})",
            Handle::<T>::MAX
        );
        self.slots.reserve(other.slots.len());
        for mut slot in other.slots {
            if let Some(element) = slot.as_mut() {
                rebase(element, offset);
            }
            self.slots.push(slot);
        }
        self.free.extend(other.free.into_iter().map(|h| h.rebased(offset)));
        offset
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn arena_capacity() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert_eq!(arena.capacity(), 10);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut arena = Arena::new();
        let a = arena.alloc(1u32);
        let _b = arena.alloc(2u32);
        arena.take(a);
        let c = arena.alloc(3u32);
        assert_eq!(a, c);
        assert_eq!(*arena.get(c), 3);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn pair_mut_either_order() {
        let mut arena = Arena::new();
        let a = arena.alloc(1u32);
        let b = arena.alloc(2u32);

        let (x, y) = arena.pair_mut(b, a);
        core::mem::swap(x, y);
        assert_eq!(*arena.get(a), 2);
        assert_eq!(*arena.get(b), 1);

        let (x, y) = arena.pair_mut(a, b);
        assert_eq!((*x, *y), (2, 1));
    }

    #[test]
    #[should_panic(expected = "`Arena::pair_mut()` - handles must be distinct!")]
    fn pair_mut_same_handle() {
        let mut arena = Arena::new();
        let a = arena.alloc(1u32);
        let _ = arena.pair_mut(a, a);
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn get_freed_handle() {
        let mut arena = Arena::new();
        let a = arena.alloc(1u32);
        arena.take(a);
        let _ = arena.get(a);
    }

    #[test]
    fn absorb_rebases_handles_and_free_list() {
        // Elements store a handle to a sibling so the rebase closure has work to do.
        let mut left: Arena<(u32, Option<Handle<()>>)> = Arena::new();
        left.alloc((1, None));
        left.alloc((2, None));

        let mut right: Arena<(u32, Option<Handle<()>>)> = Arena::new();
        let r0 = right.alloc((10, Some(Handle::from_index(1))));
        let r1 = right.alloc((11, Some(Handle::from_index(0))));
        let r2 = right.alloc((12, None));
        right.take(r1);

        let offset = left.absorb(right, |(_, link), offset| {
            *link = link.map(|h| h.rebased(offset));
        });

        assert_eq!(offset, 2);
        assert_eq!(left.len(), 4);
        assert_eq!(*left.get(r0.rebased(offset)), (10, Some(Handle::from_index(3))));
        assert_eq!(*left.get(r2.rebased(offset)), (12, None));

        // The freed slot of `right` is reused first.
        let reused = left.alloc((13, None));
        assert_eq!(reused, r1.rebased(offset));
    }

    #[derive(Clone, Debug)]
    enum Step {
        Push(u32),
        Overwrite(usize, u32),
        Remove(usize),
        /// Absorbs a fresh arena holding these values, one of them already taken.
        Absorb(Vec<u32>),
        Reset,
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            16 => any::<u32>().prop_map(Step::Push),
            4 => (any::<usize>(), any::<u32>()).prop_map(|(at, value)| Step::Overwrite(at, value)),
            6 => any::<usize>().prop_map(Step::Remove),
            2 => prop::collection::vec(any::<u32>(), 1..16).prop_map(Step::Absorb),
            1 => Just(Step::Reset),
        ]
    }

    proptest! {
        /// Live handles keep addressing their values across removals and absorptions.
        #[test]
        fn handles_stay_valid(steps in prop::collection::vec(step(), 0..256)) {
            let mut arena: Arena<u32> = Arena::new();
            let mut live: Vec<(Handle<u32>, u32)> = Vec::new();

            for step in steps {
                match step {
                    Step::Push(value) => live.push((arena.alloc(value), value)),
                    Step::Overwrite(at, value) if !live.is_empty() => {
                        let at = at % live.len();
                        *arena.get_mut(live[at].0) = value;
                        live[at].1 = value;
                    }
                    Step::Remove(at) if !live.is_empty() => {
                        let (handle, expected) = live.swap_remove(at % live.len());
                        prop_assert_eq!(arena.take(handle), expected);
                    }
                    Step::Absorb(values) => {
                        let mut other = Arena::new();
                        let mut moved: Vec<(Handle<u32>, u32)> =
                            values.iter().map(|&value| (other.alloc(value), value)).collect();
                        let (gone, _) = moved.remove(0);
                        other.take(gone);

                        let offset = arena.absorb(other, |_, _| {});
                        live.extend(moved.into_iter().map(|(handle, value)| (handle.rebased(offset), value)));
                    }
                    Step::Reset => {
                        arena.clear();
                        live.clear();
                    }
                    Step::Overwrite(..) | Step::Remove(_) => {}
                }

                prop_assert_eq!(arena.len(), live.len());
                for &(handle, value) in &live {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }
}
