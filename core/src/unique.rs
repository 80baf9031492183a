//! Owning pointers that can't be null
//!
//! [`Unique`] always points to a live value. When a value must be filled in
//! later, use [`Deferred`], which makes the "not yet initialized" state
//! explicit instead of smuggling a null through a non-null type.
//!
//! `Option<Unique<T>>` is the same size as `Unique<T>`, so an optional owning
//! pointer costs nothing extra when stored in a [`SparseArray`] style
//! container.
//!
//! [`SparseArray`]: https://docs.rs/slotted-sparse

use core::{
    fmt,
    mem,
    ops::{Deref, DerefMut},
};

use std::boxed::Box;

use crate::slot::SlotStorage;

/// A uniquely owned heap value
#[repr(transparent)]
pub struct Unique<T: ?Sized>(Box<T>);

/// An owned heap value which may not have been initialized yet
pub enum Deferred<T: ?Sized> {
    /// No value has been provided yet
    Uninit,
    /// The value has been provided
    Init(Unique<T>),
}

impl<T> Unique<T> {
    /// Move `value` to the heap
    pub fn new(value: T) -> Self { Self(Box::new(value)) }

    /// Move the value back out of the heap
    pub fn into_inner(self) -> T { *self.0 }
}

impl<T: ?Sized> Unique<T> {
    /// Take ownership of a boxed value
    ///
    /// This is also how you convert to a trait object,
    /// `Unique::from_box(unique.into_box() as Box<dyn Trait>)`
    pub fn from_box(value: Box<T>) -> Self { Self(value) }

    /// Release ownership of the value as a `Box`
    pub fn into_box(self) -> Box<T> { self.0 }

    /// Get a shared reference to the value
    pub fn get(&self) -> &T { &self.0 }

    /// Get a unique reference to the value
    pub fn get_mut(&mut self) -> &mut T { &mut self.0 }

    /// Swap the values owned by `self` and `other`
    pub fn swap(&mut self, other: &mut Self) { mem::swap(&mut self.0, &mut other.0) }
}

impl<T: ?Sized> Deref for Unique<T> {
    type Target = T;

    fn deref(&self) -> &T { &self.0 }
}

impl<T: ?Sized> DerefMut for Unique<T> {
    fn deref_mut(&mut self) -> &mut T { &mut self.0 }
}

impl<T: ?Sized> From<Box<T>> for Unique<T> {
    fn from(value: Box<T>) -> Self { Self(value) }
}

impl<T: Clone> Clone for Unique<T> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Unique<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Debug::fmt(&self.0, f) }
}

impl<T: ?Sized> Default for Deferred<T> {
    fn default() -> Self { Self::Uninit }
}

impl<T> Deferred<T> {
    /// Create an initialized value
    pub fn new(value: T) -> Self { Self::Init(Unique::new(value)) }

    /// Initialize with `value`, destroying any previous value
    pub fn init(&mut self, value: T) -> &mut T { self.set(Unique::new(value)) }
}

impl<T: ?Sized> Deferred<T> {
    /// Create an uninitialized value
    pub const fn uninit() -> Self { Self::Uninit }

    /// Returns true if a value has been provided
    pub fn is_init(&self) -> bool { matches!(self, Self::Init(_)) }

    /// Get a shared reference to the value, if it has been provided
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Init(unique) => Some(unique.get()),
            Self::Uninit => None,
        }
    }

    /// Get a unique reference to the value, if it has been provided
    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Init(unique) => Some(unique.get_mut()),
            Self::Uninit => None,
        }
    }

    /// Initialize with an already allocated value, returning the previous one
    pub fn replace(&mut self, value: Unique<T>) -> Option<Unique<T>> {
        mem::replace(self, Self::Init(value)).into_option()
    }

    /// Convert into an optional owning pointer
    pub fn into_option(self) -> Option<Unique<T>> {
        match self {
            Self::Init(unique) => Some(unique),
            Self::Uninit => None,
        }
    }
}

impl<T: ?Sized> From<Unique<T>> for Deferred<T> {
    fn from(value: Unique<T>) -> Self { Self::Init(value) }
}

impl<T: ?Sized> From<Option<Box<T>>> for Deferred<T> {
    fn from(value: Option<Box<T>>) -> Self {
        match value {
            Some(value) => Self::Init(Unique(value)),
            None => Self::Uninit,
        }
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(unique) => f.debug_tuple("Init").field(unique).finish(),
            Self::Uninit => f.write_str("Uninit"),
        }
    }
}

unsafe impl<T: ?Sized> SlotStorage for Deferred<T> {
    type Item = Unique<T>;

    #[inline]
    fn empty() -> Self { Self::Uninit }

    #[inline]
    fn has_value(&self) -> bool { self.is_init() }

    fn set(&mut self, value: Unique<T>) -> &mut Unique<T> {
        *self = Self::Uninit;
        *self = Self::Init(value);
        unsafe { self.value_unchecked_mut() }
    }

    fn reset(&mut self) { *self = Self::Uninit }

    fn take(&mut self) -> Option<Unique<T>> { mem::take(self).into_option() }

    #[inline]
    unsafe fn value_unchecked(&self) -> &Unique<T> {
        match self {
            Self::Init(unique) => unique,
            Self::Uninit => core::hint::unreachable_unchecked(),
        }
    }

    #[inline]
    unsafe fn value_unchecked_mut(&mut self) -> &mut Unique<T> {
        match self {
            Self::Init(unique) => unique,
            Self::Uninit => core::hint::unreachable_unchecked(),
        }
    }
}
