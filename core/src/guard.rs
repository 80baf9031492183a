//! A value behind a reader/writer lock, accessed through closures
//!
//! [`Guarded`] never hands out the lock itself. Each access runs a closure
//! while the lock is held, and the lock is released when the closure returns
//! or unwinds. There are three ways in:
//!
//! * [`Guarded::lock`] - exclusive access, waits for every other reader and writer
//! * [`Guarded::shared_lock`] - shared access, waits only for writers
//! * [`Guarded::try_lock`] - exclusive access if it's available right now,
//!   otherwise runs a fallback instead of waiting
//!
//! With the `parking_lot` feature the lock is a `parking_lot::RwLock`,
//! otherwise it is a `std::sync::RwLock`. Poisoning is ignored: a panic while
//! the lock is held does not prevent later access.

use core::fmt;

cfg_if::cfg_if! {
    if #[cfg(feature = "parking_lot")] {
        use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

        fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> { lock.read() }

        fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> { lock.write() }

        fn try_write<T>(lock: &RwLock<T>) -> Option<RwLockWriteGuard<'_, T>> { lock.try_write() }

        fn try_read<T>(lock: &RwLock<T>) -> Option<RwLockReadGuard<'_, T>> { lock.try_read() }

        fn get_mut<T>(lock: &mut RwLock<T>) -> &mut T { lock.get_mut() }

        fn into_inner<T>(lock: RwLock<T>) -> T { lock.into_inner() }
    } else {
        use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, TryLockError};

        fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> { lock.read().unwrap_or_else(PoisonError::into_inner) }

        fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> { lock.write().unwrap_or_else(PoisonError::into_inner) }

        fn try_write<T>(lock: &RwLock<T>) -> Option<RwLockWriteGuard<'_, T>> {
            match lock.try_write() {
                Ok(guard) => Some(guard),
                Err(TryLockError::Poisoned(poison)) => Some(poison.into_inner()),
                Err(TryLockError::WouldBlock) => None,
            }
        }

        fn try_read<T>(lock: &RwLock<T>) -> Option<RwLockReadGuard<'_, T>> {
            match lock.try_read() {
                Ok(guard) => Some(guard),
                Err(TryLockError::Poisoned(poison)) => Some(poison.into_inner()),
                Err(TryLockError::WouldBlock) => None,
            }
        }

        fn get_mut<T>(lock: &mut RwLock<T>) -> &mut T { lock.get_mut().unwrap_or_else(PoisonError::into_inner) }

        fn into_inner<T>(lock: RwLock<T>) -> T { lock.into_inner().unwrap_or_else(PoisonError::into_inner) }
    }
}

/// Shared access to a [`Guarded`] value, released on drop
pub type ReadGuard<'a, T> = RwLockReadGuard<'a, T>;
/// Exclusive access to a [`Guarded`] value, released on drop
pub type WriteGuard<'a, T> = RwLockWriteGuard<'a, T>;

/// A value that can only be reached while holding its lock
pub struct Guarded<T> {
    lock: RwLock<T>,
}

impl<T: Default> Default for Guarded<T> {
    fn default() -> Self { Self::new(T::default()) }
}

impl<T> From<T> for Guarded<T> {
    fn from(value: T) -> Self { Self::new(value) }
}

impl<T> Guarded<T> {
    /// Put `value` behind a lock
    pub fn new(value: T) -> Self { Self { lock: RwLock::new(value) } }

    /// Remove the lock, returning the value
    pub fn into_inner(self) -> T { into_inner(self.lock) }

    /// Get the value without locking, unique access to `self` already
    /// rules out any other access
    pub fn get_mut(&mut self) -> &mut T { get_mut(&mut self.lock) }

    /// Run `f` with exclusive access to the value, blocking until
    /// every other reader and writer is done
    pub fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R { f(&mut *write(&self.lock)) }

    /// Run `f` with shared access to the value, blocking until
    /// every writer is done. Other readers may run at the same time.
    pub fn shared_lock<R, F: FnOnce(&T) -> R>(&self, f: F) -> R { f(&*read(&self.lock)) }

    /// Run `locked` with exclusive access to the value if the lock can be
    /// acquired without blocking, otherwise run `contended`
    pub fn try_lock<R, F, G>(&self, locked: F, contended: G) -> R
    where
        F: FnOnce(&mut T) -> R,
        G: FnOnce() -> R,
    {
        match try_write(&self.lock) {
            Some(mut guard) => locked(&mut *guard),
            None => {
                #[cfg(feature = "tracing")]
                tracing::trace!("`Guarded::try_lock` found the lock contended");

                contended()
            }
        }
    }

    /// Acquire exclusive access, held until the returned guard is dropped
    pub fn write(&self) -> WriteGuard<'_, T> { write(&self.lock) }

    /// Acquire shared access, held until the returned guard is dropped
    pub fn read(&self) -> ReadGuard<'_, T> { read(&self.lock) }

    /// Acquire exclusive access if that's possible without blocking
    pub fn try_write(&self) -> Option<WriteGuard<'_, T>> { try_write(&self.lock) }
}

impl<T: fmt::Debug> fmt::Debug for Guarded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match try_read(&self.lock) {
            Some(guard) => f.debug_struct("Guarded").field("value", &*guard).finish(),
            None => f.debug_struct("Guarded").field("value", &format_args!("<locked>")).finish(),
        }
    }
}
