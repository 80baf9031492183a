use core::fmt;

/// Returned from [`SparseArray::try_resize`](crate::SparseArray::try_resize) when
/// the requested capacity would cut off an occupied slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShrinkError {
    /// The capacity that was asked for
    pub requested: usize,
    /// The highest occupied slot index, which is at least `requested`
    pub highest_live: usize,
}

impl fmt::Display for ShrinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot shrink `SparseArray` to {} slots, slot {} is still occupied",
            self.requested, self.highest_live
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShrinkError {}
