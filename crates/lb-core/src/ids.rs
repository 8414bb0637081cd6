//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The identifier following `self` in allocation order.
            #[inline(always)]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Sequence number of a request, assigned in generation order.
    ///
    /// Because the queue is FIFO, dispatch order is ascending `RequestId`
    /// order for requests that came from the same generator.
    pub struct RequestId(u64);
}

typed_id! {
    /// Stable identity of a worker.
    ///
    /// Unlike the worker's index in the pool, a `WorkerId` does not shift
    /// when a lower-indexed worker is removed.
    pub struct WorkerId(u32);
}
