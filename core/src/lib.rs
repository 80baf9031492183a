#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(missing_docs)]
#![deny(clippy::missing_safety_doc)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! The building blocks of `slotted`
//!
//! * [`slot`] - cells holding at most one value, with explicit construction
//!   and destruction, used as the per-slot storage of a sparse array
//! * [`unique`] - non-null owning pointers, and an explicitly deferred version
//!   of them
//! * [`guard`] - a reader/writer lock that is only accessed through closures
//!
//! # Features
//!
//! `std` (default) - enables `alloc`, and backs [`guard`] with `std::sync::RwLock`
//!
//! `alloc` - enables [`unique`]
//!
//! `parking_lot` - backs [`guard`] with `parking_lot::RwLock`
//!
//! `tracing` - emits `tracing` events on lock contention

#[cfg(all(not(feature = "std"), feature = "alloc",))]
extern crate alloc as std;

pub mod slot;

#[cfg(feature = "alloc")]
#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
pub mod unique;

#[cfg(any(feature = "std", feature = "parking_lot"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "parking_lot"))))]
pub mod guard;

pub use slot::{Slot, SlotStorage};
