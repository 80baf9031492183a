//! Optional values with an explicit construct/destroy lifecycle
//!
//! A [`SlotStorage`] is a cell that is either empty or holds exactly one
//! value. Values are constructed into the cell with [`SlotStorage::set`] and
//! destroyed with [`SlotStorage::reset`], and an empty cell never requires a
//! default value of the payload type.
//!
//! [`Slot`] is a presence flag next to uninitialized storage, and
//! [`Option`] also implements the contract.

use core::{fmt, mem::MaybeUninit};

/// A cell that holds at most one value
///
/// # Safety
///
/// * if `has_value` returns true, then `value_unchecked` and `value_unchecked_mut`
///   must return references to an initialized value
/// * after `set` returns, `has_value` must return true
/// * after `reset` or `take` returns *or unwinds*, `has_value` must return false
/// * `empty` must produce a cell where `has_value` returns false
pub unsafe trait SlotStorage {
    /// The type of the value held in the cell
    type Item;

    /// Create an empty cell
    fn empty() -> Self;

    /// Returns true if the cell currently holds a value
    fn has_value(&self) -> bool;

    /// Destroy the current value (if any), then move `value` into the cell
    fn set(&mut self, value: Self::Item) -> &mut Self::Item;

    /// Destroy the current value (if any), leaving the cell empty
    fn reset(&mut self);

    /// Move the current value (if any) out of the cell, leaving it empty
    fn take(&mut self) -> Option<Self::Item>;

    /// Get a shared reference to the value without checking if it exists
    ///
    /// # Safety
    ///
    /// `has_value` must return true
    unsafe fn value_unchecked(&self) -> &Self::Item;

    /// Get a unique reference to the value without checking if it exists
    ///
    /// # Safety
    ///
    /// `has_value` must return true
    unsafe fn value_unchecked_mut(&mut self) -> &mut Self::Item;
}

/// A value, or nothing, stored inline next to a presence flag
pub struct Slot<T> {
    occupied: bool,
    value: MaybeUninit<T>,
}

impl<T> Drop for Slot<T> {
    fn drop(&mut self) { self.reset() }
}

impl<T> Default for Slot<T> {
    fn default() -> Self { Self::new() }
}

impl<T> From<Option<T>> for Slot<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::with_value(value),
            None => Self::new(),
        }
    }
}

impl<T> Slot<T> {
    /// Create an empty slot
    pub const fn new() -> Self {
        Self {
            occupied: false,
            value: MaybeUninit::uninit(),
        }
    }

    /// Create an occupied slot
    pub const fn with_value(value: T) -> Self {
        Self {
            occupied: true,
            value: MaybeUninit::new(value),
        }
    }

    /// Returns true if the slot holds a value
    #[inline]
    pub fn is_occupied(&self) -> bool { self.occupied }

    /// Get a shared reference to the value, if there is one
    pub fn get(&self) -> Option<&T> {
        if self.occupied {
            Some(unsafe { &*self.value.as_ptr() })
        } else {
            None
        }
    }

    /// Get a unique reference to the value, if there is one
    pub fn get_mut(&mut self) -> Option<&mut T> {
        if self.occupied {
            Some(unsafe { &mut *self.value.as_mut_ptr() })
        } else {
            None
        }
    }

    /// Move the value out of the slot
    pub fn into_inner(mut self) -> Option<T> { SlotStorage::take(&mut self) }
}

unsafe impl<T> SlotStorage for Slot<T> {
    type Item = T;

    #[inline]
    fn empty() -> Self { Self::new() }

    #[inline]
    fn has_value(&self) -> bool { self.occupied }

    fn set(&mut self, value: T) -> &mut T {
        self.reset();
        self.value = MaybeUninit::new(value);
        self.occupied = true;
        unsafe { &mut *self.value.as_mut_ptr() }
    }

    fn reset(&mut self) {
        if self.occupied {
            // cleared first, so a panicking destructor can't cause a double drop
            self.occupied = false;
            unsafe { self.value.as_mut_ptr().drop_in_place() }
        }
    }

    fn take(&mut self) -> Option<T> {
        if self.occupied {
            self.occupied = false;
            Some(unsafe { self.value.as_ptr().read() })
        } else {
            None
        }
    }

    #[inline]
    unsafe fn value_unchecked(&self) -> &T { &*self.value.as_ptr() }

    #[inline]
    unsafe fn value_unchecked_mut(&mut self) -> &mut T { &mut *self.value.as_mut_ptr() }
}

unsafe impl<T> SlotStorage for Option<T> {
    type Item = T;

    #[inline]
    fn empty() -> Self { None }

    #[inline]
    fn has_value(&self) -> bool { self.is_some() }

    fn set(&mut self, value: T) -> &mut T {
        *self = None;
        self.get_or_insert(value)
    }

    fn reset(&mut self) { *self = None }

    fn take(&mut self) -> Option<T> { Option::take(self) }

    #[inline]
    unsafe fn value_unchecked(&self) -> &T {
        match self {
            Some(value) => value,
            None => core::hint::unreachable_unchecked(),
        }
    }

    #[inline]
    unsafe fn value_unchecked_mut(&mut self) -> &mut T {
        match self {
            Some(value) => value,
            None => core::hint::unreachable_unchecked(),
        }
    }
}

impl<T: Clone> Clone for Slot<T> {
    fn clone(&self) -> Self {
        match self.get() {
            Some(value) => Self::with_value(value.clone()),
            None => Self::new(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        match (self.get_mut(), source.get()) {
            (Some(value), Some(source)) => value.clone_from(source),
            _ => *self = source.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_struct("Occupied").field("value", value).finish(),
            None => f.debug_struct("Vacant").finish(),
        }
    }
}
