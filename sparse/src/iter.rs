//! Iterators over the live slots of a [`SparseArray`](crate::SparseArray)
//!
//! All of these visit slots in live order, which is the order the slots were
//! filled in, not the order of their indices.

use core::{iter::FusedIterator, marker::PhantomData, slice};

use std::vec::{self, Vec};

use slotted_core::SlotStorage;

/// Returned by [`SparseArray::indices`](crate::SparseArray::indices)
pub type Indices<'a> = core::iter::Copied<slice::Iter<'a, usize>>;

/// Returned by [`SparseArray::iter`](crate::SparseArray::iter)
pub struct Iter<'a, S> {
    pub(crate) entries: Entries<'a, S>,
}

/// Returned by [`SparseArray::iter_mut`](crate::SparseArray::iter_mut)
pub struct IterMut<'a, S> {
    pub(crate) entries: EntriesMut<'a, S>,
}

/// Returned by [`SparseArray::entries`](crate::SparseArray::entries)
pub struct Entries<'a, S> {
    pub(crate) slots: &'a [S],
    pub(crate) live: slice::Iter<'a, usize>,
}

/// Returned by [`SparseArray::entries_mut`](crate::SparseArray::entries_mut)
pub struct EntriesMut<'a, S> {
    pub(crate) slots: *mut S,
    pub(crate) live: slice::Iter<'a, usize>,
    pub(crate) lifetime: PhantomData<&'a mut [S]>,
}

/// Returned by [`SparseArray::into_iter`](crate::SparseArray::into_iter)
pub struct IntoIter<S> {
    pub(crate) slots: Vec<S>,
    pub(crate) live: vec::IntoIter<usize>,
}

unsafe impl<S: Send> Send for EntriesMut<'_, S> {}
unsafe impl<S: Sync> Sync for EntriesMut<'_, S> {}

impl<'a, S: SlotStorage> Iterator for Entries<'a, S> {
    type Item = (usize, &'a S::Item);

    fn next(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        self.live
            .next()
            .map(|&index| (index, unsafe { slots.get_unchecked(index).value_unchecked() }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.live.size_hint() }
}

impl<S: SlotStorage> DoubleEndedIterator for Entries<'_, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        self.live
            .next_back()
            .map(|&index| (index, unsafe { slots.get_unchecked(index).value_unchecked() }))
    }
}

impl<'a, S: SlotStorage> Iterator for EntriesMut<'a, S> {
    type Item = (usize, &'a mut S::Item);

    fn next(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        // live indices are distinct and in bounds, so no two items alias
        self.live
            .next()
            .map(|&index| (index, unsafe { (*slots.add(index)).value_unchecked_mut() }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.live.size_hint() }
}

impl<S: SlotStorage> DoubleEndedIterator for EntriesMut<'_, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        self.live
            .next_back()
            .map(|&index| (index, unsafe { (*slots.add(index)).value_unchecked_mut() }))
    }
}

impl<'a, S: SlotStorage> Iterator for Iter<'a, S> {
    type Item = &'a S::Item;

    fn next(&mut self) -> Option<Self::Item> { self.entries.next().map(|(_, value)| value) }

    fn size_hint(&self) -> (usize, Option<usize>) { self.entries.size_hint() }
}

impl<S: SlotStorage> DoubleEndedIterator for Iter<'_, S> {
    fn next_back(&mut self) -> Option<Self::Item> { self.entries.next_back().map(|(_, value)| value) }
}

impl<'a, S: SlotStorage> Iterator for IterMut<'a, S> {
    type Item = &'a mut S::Item;

    fn next(&mut self) -> Option<Self::Item> { self.entries.next().map(|(_, value)| value) }

    fn size_hint(&self) -> (usize, Option<usize>) { self.entries.size_hint() }
}

impl<S: SlotStorage> DoubleEndedIterator for IterMut<'_, S> {
    fn next_back(&mut self) -> Option<Self::Item> { self.entries.next_back().map(|(_, value)| value) }
}

impl<S: SlotStorage> Iterator for IntoIter<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.live.next()?;
        self.slots[index].take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.live.size_hint() }
}

impl<S: SlotStorage> DoubleEndedIterator for IntoIter<S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.live.next_back()?;
        self.slots[index].take()
    }
}

impl<S: SlotStorage> ExactSizeIterator for Entries<'_, S> {}
impl<S: SlotStorage> ExactSizeIterator for EntriesMut<'_, S> {}
impl<S: SlotStorage> ExactSizeIterator for Iter<'_, S> {}
impl<S: SlotStorage> ExactSizeIterator for IterMut<'_, S> {}
impl<S: SlotStorage> ExactSizeIterator for IntoIter<S> {}

impl<S: SlotStorage> FusedIterator for Entries<'_, S> {}
impl<S: SlotStorage> FusedIterator for EntriesMut<'_, S> {}
impl<S: SlotStorage> FusedIterator for Iter<'_, S> {}
impl<S: SlotStorage> FusedIterator for IterMut<'_, S> {}
impl<S: SlotStorage> FusedIterator for IntoIter<S> {}
