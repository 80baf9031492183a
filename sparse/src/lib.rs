#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(missing_docs)]
#![deny(clippy::missing_safety_doc)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A fixed-capacity, index-addressed container whose slots may be empty
//!
//! [`SparseArray`] stores values at stable indices, and keeps a list of the
//! occupied indices next to the slots so that iteration, bulk removal and
//! "find the first match" never have to look at an empty slot.
//!
//! | operation | cost |
//! |-----------|------|
//! | [`get`](SparseArray::get), [`emplace_at`](SparseArray::emplace_at) | `O(1)` |
//! | [`erase_at`](SparseArray::erase_at) | `O(len)` |
//! | [`next_empty_index`](SparseArray::next_empty_index) | `O(capacity)`, `O(1)` when full |
//! | [`erase_if`](SparseArray::erase_if), [`iter`](SparseArray::iter), [`clear`](SparseArray::clear) | `O(len)` |
//!
//! The array itself is not synchronized, wrap it in a
//! [`Guarded`](slotted_core::guard::Guarded) to share it between threads.
//!
//! # Features
//!
//! `std` (default) - implements `std::error::Error` for [`ShrinkError`]
//!
//! `tracing` (default) - emits `tracing` events on resize, bulk erase and clear

#[cfg(not(feature = "std"))]
extern crate alloc as std;

mod array;
mod error;
pub mod iter;

pub use array::SparseArray;
pub use error::ShrinkError;

#[doc(hidden)]
pub use slotted_core;
