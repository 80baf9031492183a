use core::{
    fmt,
    marker::PhantomData,
    mem,
    ops::{Index, IndexMut},
};

use std::vec::Vec;

use slotted_core::{Slot, SlotStorage};

use crate::{
    error::ShrinkError,
    iter::{Entries, EntriesMut, Indices, IntoIter, Iter, IterMut},
};

/// A fixed number of slots, each of which may hold a value
///
/// Values stay at the index they were placed at until they are erased, so
/// indices can be handed out as stable handles. The indices of all occupied
/// slots are kept in a separate list, in the order the slots were filled,
/// so iteration only ever touches occupied slots.
///
/// The number of slots only changes through [`resize`](Self::resize), there
/// is no automatic growth. `S` is the per-slot storage, see [`SlotStorage`].
///
/// ```
/// use slotted_sparse::SparseArray;
///
/// let mut array = SparseArray::with_capacity(4);
/// array.emplace_at(1, "a");
/// array.emplace_at(3, "b");
/// assert_eq!(array.len(), 2);
/// assert_eq!(array.next_empty_index(), Some(0));
///
/// array.erase_if(|value| *value == "a");
/// assert_eq!(array.indices().collect::<Vec<_>>(), [3]);
/// assert_eq!(array[3], "b");
/// ```
pub struct SparseArray<T, S: SlotStorage<Item = T> = Slot<T>> {
    slots: Vec<S>,
    live: Vec<usize>,
    item: PhantomData<T>,
}

/// Re-synchronizes the live list with the slots if a bulk operation unwinds
/// part way through
struct Resync<'a, S: SlotStorage> {
    slots: &'a mut Vec<S>,
    live: &'a mut Vec<usize>,
}

impl<S: SlotStorage> Drop for Resync<'_, S> {
    fn drop(&mut self) {
        let slots = &*self.slots;
        self.live.retain(|&index| slots[index].has_value());
    }
}

impl<S: SlotStorage> Resync<'_, S> {
    fn defuse(self) { mem::forget(self) }
}

#[cold]
#[inline(never)]
#[track_caller]
fn index_out_of_bounds(index: usize, capacity: usize) -> ! {
    panic!(
        "index {} is out of bounds of a `SparseArray` with {} slots",
        index, capacity
    )
}

impl<T, S: SlotStorage<Item = T>> Default for SparseArray<T, S> {
    fn default() -> Self { Self::empty() }
}

impl<T> SparseArray<T> {
    /// Create an array with no slots
    pub fn new() -> Self { Self::empty() }

    /// Create an array with `capacity` empty slots
    pub fn with_capacity(capacity: usize) -> Self { Self::with_slots(capacity) }
}

impl<T, S: SlotStorage<Item = T>> SparseArray<T, S> {
    /// Create an array with no slots, using any slot storage
    pub fn empty() -> Self {
        Self {
            slots: Vec::new(),
            live: Vec::new(),
            item: PhantomData,
        }
    }

    /// Create an array with `capacity` empty slots, using any slot storage
    ///
    /// ```
    /// use slotted_sparse::SparseArray;
    ///
    /// let mut array = SparseArray::<u32, Option<u32>>::with_slots(2);
    /// array.emplace_at(1, 7);
    /// assert_eq!(array.get(1), Some(&7));
    /// ```
    pub fn with_slots(capacity: usize) -> Self {
        let mut array = Self::empty();
        array.resize(capacity);
        array
    }

    /// Returns the number of occupied slots
    #[inline]
    pub fn len(&self) -> usize { self.live.len() }

    /// Returns true if no slot is occupied
    #[inline]
    pub fn is_empty(&self) -> bool { self.live.is_empty() }

    /// Returns the number of slots, occupied or not
    #[inline]
    pub fn capacity(&self) -> usize { self.slots.len() }

    /// Returns how many live indices can be tracked without reallocating
    /// the live list. This is at least [`capacity`](Self::capacity).
    #[inline]
    pub fn live_capacity(&self) -> usize { self.live.capacity() }

    /// Change the number of slots to `new_capacity`
    ///
    /// New slots are empty, and existing values are never moved.
    ///
    /// # Panics
    ///
    /// If this would remove an occupied slot, see [`try_resize`](Self::try_resize)
    #[track_caller]
    pub fn resize(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_resize(new_capacity) {
            panic!("{}", err)
        }
    }

    /// Change the number of slots to `new_capacity`
    ///
    /// New slots are empty, and existing values are never moved. Shrinking is
    /// only allowed if every slot that would be removed is empty, otherwise
    /// the array is left untouched and a [`ShrinkError`] is returned.
    pub fn try_resize(&mut self, new_capacity: usize) -> Result<(), ShrinkError> {
        if new_capacity < self.slots.len() {
            if let Some(highest_live) = self.live.iter().copied().filter(|&index| index >= new_capacity).max() {
                return Err(ShrinkError {
                    requested: new_capacity,
                    highest_live,
                })
            }

            self.slots.truncate(new_capacity);
        } else {
            self.slots.resize_with(new_capacity, S::empty);
        }

        self.live.reserve(new_capacity - self.live.len());

        #[cfg(feature = "tracing")]
        tracing::debug!(capacity = new_capacity, live = self.live.len(), "resized `SparseArray`");

        Ok(())
    }

    /// Returns true if the slot at `index` holds a value
    pub fn contains(&self, index: usize) -> bool { self.slots.get(index).map_or(false, S::has_value) }

    /// Return a shared reference to the value at `index`
    ///
    /// Returns `None` if the slot is empty or out of bounds
    pub fn get(&self, index: usize) -> Option<&T> {
        let slot = self.slots.get(index)?;
        if slot.has_value() {
            Some(unsafe { slot.value_unchecked() })
        } else {
            None
        }
    }

    /// Return a unique reference to the value at `index`
    ///
    /// Returns `None` if the slot is empty or out of bounds
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let slot = self.slots.get_mut(index)?;
        if slot.has_value() {
            Some(unsafe { slot.value_unchecked_mut() })
        } else {
            None
        }
    }

    /// Return a shared reference to the value at `index` without checking
    /// bounds or occupancy
    ///
    /// # Safety
    ///
    /// `contains` should return true with the given index.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T { self.slots.get_unchecked(index).value_unchecked() }

    /// Return a unique reference to the value at `index` without checking
    /// bounds or occupancy
    ///
    /// # Safety
    ///
    /// `contains` should return true with the given index.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        self.slots.get_unchecked_mut(index).value_unchecked_mut()
    }

    /// Return a shared reference to the value at `index`
    ///
    /// Panics if the slot is empty or out of bounds
    #[track_caller]
    pub fn at(&self, index: usize) -> &T { self.get(index).expect("Tried to access an empty slot of a `SparseArray`") }

    /// Return a unique reference to the value at `index`
    ///
    /// Panics if the slot is empty or out of bounds
    #[track_caller]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index)
            .expect("Tried to access an empty slot of a `SparseArray`")
    }

    #[track_caller]
    fn put(&mut self, index: usize, value: T) -> (Option<T>, &mut T) {
        let capacity = self.slots.len();
        let slot = match self.slots.get_mut(index) {
            Some(slot) => slot,
            None => index_out_of_bounds(index, capacity),
        };

        let old = slot.take();
        if old.is_none() {
            self.live.push(index);
        }

        (old, slot.set(value))
    }

    /// Place `value` in the slot at `index`, returning a reference to it
    ///
    /// If the slot was empty, `index` becomes live and is visited last by
    /// iteration. If the slot was already occupied, the old value is dropped
    /// and replaced in place: the slot stays live exactly once and keeps its
    /// position in iteration order.
    ///
    /// # Panics
    ///
    /// If `index >= self.capacity()`
    #[track_caller]
    pub fn emplace_at(&mut self, index: usize, value: T) -> &mut T {
        let (old, value) = self.put(index, value);
        drop(old);
        value
    }

    /// Place `value` in the slot at `index`, returning the value that was
    /// there before
    ///
    /// This has the same effect on the array as [`emplace_at`](Self::emplace_at)
    ///
    /// # Panics
    ///
    /// If `index >= self.capacity()`
    #[track_caller]
    pub fn replace_at(&mut self, index: usize, value: T) -> Option<T> { self.put(index, value).0 }

    /// Place `value` in the lowest empty slot, returning its index
    ///
    /// If every slot is occupied, `value` is handed back
    pub fn insert(&mut self, value: T) -> Result<usize, T> {
        match self.next_empty_index() {
            Some(index) => {
                self.emplace_at(index, value);
                Ok(index)
            }
            None => Err(value),
        }
    }

    /// Returns the lowest index of an empty slot
    ///
    /// Returns `None` if every slot is occupied, which is checked
    /// before scanning the slots.
    pub fn next_empty_index(&self) -> Option<usize> {
        if self.live.len() == self.slots.len() {
            return None
        }

        self.slots.iter().position(|slot| !slot.has_value())
    }

    /// Remove and return the value at `index`
    ///
    /// Returns `None` if the slot is empty or out of bounds. The remaining
    /// live slots keep their iteration order.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        let value = self.slots.get_mut(index)?.take()?;
        if let Some(position) = self.live.iter().position(|&live| live == index) {
            self.live.remove(position);
        }
        Some(value)
    }

    /// Drop the value at `index`
    ///
    /// Returns true if there was a value to drop. Erasing an empty slot
    /// does nothing.
    pub fn erase_at(&mut self, index: usize) -> bool { self.remove_at(index).is_some() }

    /// Drop every value for which `predicate` returns true, returning how many
    /// were dropped
    ///
    /// The predicate is called exactly once for each slot that was live when
    /// this was called, in iteration order. The slots that are kept stay in
    /// the same relative order.
    pub fn erase_if<F: FnMut(&mut T) -> bool>(&mut self, mut predicate: F) -> usize {
        let before = self.live.len();
        let resync = Resync {
            slots: &mut self.slots,
            live: &mut self.live,
        };
        let slots = &mut *resync.slots;
        resync.live.retain(|&index| {
            let slot = unsafe { slots.get_unchecked_mut(index) };
            if predicate(unsafe { slot.value_unchecked_mut() }) {
                slot.reset();
                false
            } else {
                true
            }
        });
        resync.defuse();

        let erased = before - self.live.len();

        #[cfg(feature = "tracing")]
        tracing::trace!(erased, remaining = self.live.len(), "erased from `SparseArray`");

        erased
    }

    /// Retain only the values specified by the predicate
    ///
    /// If the predicate returns true for a given value, then the value is kept
    /// in the array. Has the same guarantees as [`erase_if`](Self::erase_if).
    pub fn retain<F: FnMut(&mut T) -> bool>(&mut self, mut f: F) { self.erase_if(move |value| !f(value)); }

    /// Call `visitor` with every value and its index, in iteration order
    pub fn for_each<F: FnMut(&mut T, usize)>(&mut self, mut visitor: F) {
        self.entries_mut().for_each(move |(index, value)| visitor(value, index))
    }

    /// Returns the first value, in iteration order, for which `predicate`
    /// returns true
    pub fn first_if<F: FnMut(&T) -> bool>(&self, mut predicate: F) -> Option<&T> {
        self.iter().find(move |value| predicate(*value))
    }

    /// Returns the first value, in iteration order, for which `predicate`
    /// returns true
    pub fn first_if_mut<F: FnMut(&T) -> bool>(&mut self, mut predicate: F) -> Option<&mut T> {
        self.iter_mut().find(move |value| predicate(&**value))
    }

    /// Returns the index of the first value, in iteration order, for which
    /// `predicate` returns true
    pub fn position_if<F: FnMut(&T) -> bool>(&self, mut predicate: F) -> Option<usize> {
        self.entries()
            .find(move |(_, value)| predicate(*value))
            .map(|(index, _)| index)
    }

    /// Drop every value, keeping the number of slots
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(dropped = self.live.len(), "clearing `SparseArray`");

        // popped before the reset, so a panicking destructor can't leave a stale index
        while let Some(index) = self.live.pop() {
            unsafe { self.slots.get_unchecked_mut(index) }.reset();
        }
    }

    /// The indices of all occupied slots, in iteration order
    pub fn indices(&self) -> Indices<'_> { self.live.iter().copied() }

    /// An iterator of shared references to the values, in iteration order
    pub fn iter(&self) -> Iter<'_, S> { Iter { entries: self.entries() } }

    /// An iterator of unique references to the values, in iteration order
    pub fn iter_mut(&mut self) -> IterMut<'_, S> {
        IterMut {
            entries: self.entries_mut(),
        }
    }

    /// An iterator of indices and shared references to the values, in
    /// iteration order
    pub fn entries(&self) -> Entries<'_, S> {
        Entries {
            slots: &self.slots,
            live: self.live.iter(),
        }
    }

    /// An iterator of indices and unique references to the values, in
    /// iteration order
    pub fn entries_mut(&mut self) -> EntriesMut<'_, S> {
        EntriesMut {
            slots: self.slots.as_mut_ptr(),
            live: self.live.iter(),
            lifetime: PhantomData,
        }
    }
}

impl<T, S: SlotStorage<Item = T>> IntoIterator for SparseArray<T, S> {
    type Item = T;
    type IntoIter = IntoIter<S>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            slots: self.slots,
            live: self.live.into_iter(),
        }
    }
}

impl<'a, T, S: SlotStorage<Item = T>> IntoIterator for &'a SparseArray<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a, T, S: SlotStorage<Item = T>> IntoIterator for &'a mut SparseArray<T, S> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, S>;

    fn into_iter(self) -> Self::IntoIter { self.iter_mut() }
}

impl<T, S: SlotStorage<Item = T>> Index<usize> for SparseArray<T, S> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output { self.at(index) }
}

impl<T, S: SlotStorage<Item = T>> IndexMut<usize> for SparseArray<T, S> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output { self.at_mut(index) }
}

impl<T, S: SlotStorage<Item = T> + Clone> Clone for SparseArray<T, S> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            live: self.live.clone(),
            item: PhantomData,
        }
    }
}

impl<T: fmt::Debug, S: SlotStorage<Item = T>> fmt::Debug for SparseArray<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.debug_map().entries(self.entries()).finish() }
}

#[cfg(all(test, feature = "std"))]
mod test {
    use super::*;
    use std::{cell::Cell, rc::Rc, vec::Vec};

    struct Tracked(Rc<Cell<usize>>);

    impl Drop for Tracked {
        fn drop(&mut self) { self.0.set(self.0.get() + 1) }
    }

    fn live_order<T, S: SlotStorage<Item = T>>(array: &SparseArray<T, S>) -> Vec<usize> { array.indices().collect() }

    #[test]
    fn basic() {
        let mut array = SparseArray::with_capacity(4);
        assert_eq!(array.capacity(), 4);
        assert!(array.is_empty());

        assert_eq!(*array.emplace_at(1, "a"), "a");
        assert_eq!(*array.emplace_at(3, "b"), "b");
        assert_eq!(array.len(), 2);
        assert_eq!(array.next_empty_index(), Some(0));
        assert!(array.contains(1));
        assert!(!array.contains(0));
        assert!(!array.contains(10));

        assert_eq!(array.erase_if(|value| *value == "a"), 1);
        assert_eq!(array.len(), 1);
        assert_eq!(live_order(&array), [3]);
        assert_eq!(array[3], "b");

        array.clear();
        assert_eq!(array.len(), 0);
        assert_eq!(array.next_empty_index(), Some(0));
        assert_eq!(array.capacity(), 4);
    }

    #[test]
    fn round_trip_through_erase() {
        let mut array = SparseArray::with_capacity(2);
        array.emplace_at(0, 10);
        assert_eq!(*array.at(0), 10);
        assert!(array.erase_at(0));
        assert_eq!(array.get(0), None);
        array.emplace_at(0, 20);
        assert_eq!(*array.at(0), 20);
    }

    #[test]
    fn emplace_on_occupied_slot_replaces_in_place() {
        let drops = Rc::new(Cell::new(0));
        let mut array = SparseArray::with_capacity(3);
        array.emplace_at(2, Tracked(drops.clone()));
        array.emplace_at(0, Tracked(drops.clone()));
        array.emplace_at(2, Tracked(drops.clone()));

        assert_eq!(drops.get(), 1);
        assert_eq!(array.len(), 2);
        assert_eq!(live_order(&array), [2, 0]);

        assert!(array.erase_at(2));
        assert!(!array.contains(2));
        assert_eq!(live_order(&array), [0]);
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn replace_at_returns_previous_value() {
        let mut array = SparseArray::with_capacity(1);
        assert_eq!(array.replace_at(0, 'a'), None);
        assert_eq!(array.replace_at(0, 'b'), Some('a'));
        assert_eq!(array.len(), 1);
        assert_eq!(array[0], 'b');
    }

    #[test]
    #[should_panic(expected = "index 4 is out of bounds of a `SparseArray` with 4 slots")]
    fn emplace_out_of_bounds() {
        let mut array = SparseArray::with_capacity(4);
        array.emplace_at(4, ());
    }

    #[test]
    #[should_panic(expected = "Tried to access an empty slot of a `SparseArray`")]
    fn index_empty_slot() {
        let array = SparseArray::<u8>::with_capacity(4);
        let _value = array[2];
    }

    #[test]
    fn next_empty_index_is_lowest() {
        let mut array = SparseArray::with_capacity(3);
        array.emplace_at(0, 0);
        array.emplace_at(2, 2);
        assert_eq!(array.next_empty_index(), Some(1));
        array.emplace_at(1, 1);
        assert_eq!(array.next_empty_index(), None);
        array.erase_at(2);
        array.erase_at(0);
        assert_eq!(array.next_empty_index(), Some(0));
    }

    #[test]
    fn insert_fills_lowest_empty_slot() {
        let mut array = SparseArray::with_capacity(2);
        assert_eq!(array.insert('x'), Ok(0));
        assert_eq!(array.insert('y'), Ok(1));
        assert_eq!(array.insert('z'), Err('z'));
        array.erase_at(0);
        assert_eq!(array.insert('z'), Ok(0));
        assert_eq!(live_order(&array), [1, 0]);
    }

    #[test]
    fn erase_empty_slot_is_a_no_op() {
        let mut array = SparseArray::with_capacity(2);
        array.emplace_at(1, 1);
        assert!(!array.erase_at(0));
        assert!(!array.erase_at(5));
        assert_eq!(array.remove_at(1), Some(1));
        assert!(!array.erase_at(1));
        assert!(array.is_empty());
    }

    #[test]
    fn erase_at_preserves_live_order() {
        let mut array = SparseArray::with_capacity(5);
        for &index in &[4, 0, 2, 1, 3] {
            array.emplace_at(index, index * 10);
        }
        array.erase_at(2);
        assert_eq!(live_order(&array), [4, 0, 1, 3]);
    }

    #[test]
    fn erase_if_visits_each_live_slot_once_in_order() {
        let mut array = SparseArray::with_capacity(6);
        for &index in &[5, 1, 3, 0, 4] {
            array.emplace_at(index, index);
        }

        let mut visited = Vec::new();
        let erased = array.erase_if(|value| {
            visited.push(*value);
            *value % 2 == 1
        });

        assert_eq!(erased, 3);
        assert_eq!(visited, [5, 1, 3, 0, 4]);
        assert_eq!(live_order(&array), [0, 4]);
        assert_eq!(array.len(), 2);
        assert!(!array.contains(1));
    }

    #[test]
    fn retain_keeps_matching() {
        let mut array = SparseArray::with_capacity(10);
        for i in 0..10 {
            array.emplace_at(i, i);
        }
        array.retain(|&mut i| i % 3 == 0);
        assert_eq!(array.iter().copied().collect::<Vec<_>>(), [0, 3, 6, 9]);
    }

    #[test]
    fn erase_if_resyncs_after_predicate_panic() {
        let mut array = SparseArray::with_capacity(4);
        for i in 0..4 {
            array.emplace_at(i, i);
        }

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            array.erase_if(|&mut value| {
                if value == 2 {
                    panic!("predicate failed")
                }
                value == 0
            })
        }));

        assert!(result.is_err());
        assert_eq!(live_order(&array), [1, 2, 3]);
        assert!(!array.contains(0));
    }

    #[test]
    fn erase_if_resyncs_after_destructor_panic() {
        struct Bomb(bool);

        impl Drop for Bomb {
            fn drop(&mut self) {
                if self.0 {
                    panic!("boom")
                }
            }
        }

        let mut array = SparseArray::with_capacity(3);
        array.emplace_at(0, Bomb(false));
        array.emplace_at(1, Bomb(true));
        array.emplace_at(2, Bomb(false));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| array.erase_if(|bomb| bomb.0)));

        assert!(result.is_err());
        assert_eq!(live_order(&array), [0, 2]);
        assert_eq!(array.len(), 2);
    }

    #[test]
    fn for_each_in_live_order() {
        let mut array = SparseArray::with_capacity(4);
        array.emplace_at(3, 1);
        array.emplace_at(0, 2);
        array.emplace_at(2, 3);

        let mut seen = Vec::new();
        array.for_each(|value, index| {
            *value *= 10;
            seen.push(index);
        });

        assert_eq!(seen, [3, 0, 2]);
        assert_eq!(array.iter().copied().collect::<Vec<_>>(), [10, 20, 30]);
        assert_eq!(array.iter().rev().copied().collect::<Vec<_>>(), [30, 20, 10]);
        assert_eq!(array.entries().len(), 3);
    }

    #[test]
    fn first_if_short_circuits() {
        let mut array = SparseArray::with_capacity(4);
        array.emplace_at(2, 5);
        array.emplace_at(0, 7);
        array.emplace_at(1, 9);

        let mut calls = 0;
        let found = array.first_if(|&value| {
            calls += 1;
            value > 6
        });
        assert_eq!(found, Some(&7));
        assert_eq!(calls, 2);

        assert_eq!(array.first_if(|&value| value > 100), None);
        assert_eq!(array.position_if(|&value| value == 9), Some(1));

        *array.first_if_mut(|&value| value == 5).unwrap() = 6;
        assert_eq!(array[2], 6);
    }

    #[test]
    fn clear_drops_every_value_once() {
        let drops = Rc::new(Cell::new(0));
        let mut array = SparseArray::with_capacity(8);
        for i in (0..8).step_by(2) {
            array.emplace_at(i, Tracked(drops.clone()));
        }
        array.clear();
        assert_eq!(drops.get(), 4);
        assert!(array.is_empty());
        drop(array);
        assert_eq!(drops.get(), 4);
    }

    #[test]
    fn drop_drops_every_value_once() {
        let drops = Rc::new(Cell::new(0));
        let mut array = SparseArray::with_capacity(8);
        for i in 0..5 {
            array.emplace_at(i, Tracked(drops.clone()));
        }
        array.erase_at(1);
        array.erase_if(|_| false);
        assert_eq!(drops.get(), 1);
        drop(array);
        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn resize_grows_without_disturbing_values() {
        let mut array = SparseArray::with_capacity(2);
        array.emplace_at(1, "one");
        array.resize(5);
        assert_eq!(array.capacity(), 5);
        assert!(array.live_capacity() >= 5);
        assert_eq!(array[1], "one");
        assert_eq!(array.len(), 1);
        assert_eq!(array.next_empty_index(), Some(0));
        array.emplace_at(4, "four");
        assert_eq!(live_order(&array), [1, 4]);
    }

    #[test]
    fn shrink_only_past_empty_slots() {
        let mut array = SparseArray::with_capacity(6);
        array.emplace_at(0, 0);
        array.emplace_at(3, 3);

        assert_eq!(
            array.try_resize(2),
            Err(ShrinkError {
                requested: 2,
                highest_live: 3
            })
        );
        assert_eq!(array.capacity(), 6);

        assert_eq!(array.try_resize(4), Ok(()));
        assert_eq!(array.capacity(), 4);
        assert_eq!(array[3], 3);
    }

    #[test]
    #[should_panic(expected = "cannot shrink `SparseArray` to 1 slots, slot 1 is still occupied")]
    fn resize_panics_on_illegal_shrink() {
        let mut array = SparseArray::with_capacity(2);
        array.emplace_at(1, ());
        array.resize(1);
    }

    #[test]
    fn into_iter_yields_live_values() {
        let drops = Rc::new(Cell::new(0));
        let mut array = SparseArray::with_capacity(4);
        for i in 0..4 {
            array.emplace_at(3 - i, (i, Tracked(drops.clone())));
        }

        let mut iter = array.into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next().map(|(i, _)| i), Some(0));
        assert_eq!(iter.next_back().map(|(i, _)| i), Some(3));
        assert_eq!(drops.get(), 2);
        drop(iter);
        assert_eq!(drops.get(), 4);
    }

    #[test]
    fn option_backed_storage() {
        let mut array = SparseArray::<&str, Option<&str>>::with_slots(3);
        array.emplace_at(2, "c");
        array.emplace_at(0, "a");
        assert_eq!(array.next_empty_index(), Some(1));
        assert_eq!(array.iter().copied().collect::<Vec<_>>(), ["c", "a"]);
        assert_eq!(array.remove_at(2), Some("c"));
        assert_eq!(array.len(), 1);
    }

    #[test]
    fn clone_and_debug() {
        let mut array = SparseArray::with_capacity(3);
        array.emplace_at(2, 'b');
        array.emplace_at(0, 'a');
        let clone = array.clone();
        assert_eq!(live_order(&clone), [2, 0]);
        assert_eq!(format!("{:?}", clone), "{2: 'b', 0: 'a'}");
    }
}
