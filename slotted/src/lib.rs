#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(missing_docs)]

//! Fixed-capacity sparse arrays with stable indices
//!
//! * [`sparse`] holds [`SparseArray`], which maps slot indices to values and
//!   iterates only over the occupied slots, in the order they were filled
//! * [`core`] holds the building blocks: the [`SlotStorage`] contract with
//!   its default [`Slot`], owning pointers, and a closure-based lock for
//!   sharing an array between threads
//!
//! ```
//! use slotted::SparseArray;
//!
//! let mut array = SparseArray::with_capacity(4);
//! array.emplace_at(1, "a");
//! array.emplace_at(3, "b");
//! assert_eq!(array.next_empty_index(), Some(0));
//!
//! array.erase_if(|value| *value == "a");
//! assert_eq!(array.iter().collect::<Vec<_>>(), [&"b"]);
//! ```

pub use slotted_core as core;
pub use slotted_sparse as sparse;

pub use slotted_core::{Slot, SlotStorage};
pub use slotted_sparse::{ShrinkError, SparseArray};

#[cfg(any(feature = "std", feature = "parking_lot"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "parking_lot"))))]
pub use slotted_core::guard::Guarded;
