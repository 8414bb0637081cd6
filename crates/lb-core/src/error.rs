//! Framework error type.
//!
//! The tick loop itself never fails; these errors come from constructing
//! values (requests, arrival models) out of untrusted input.

use thiserror::Error;

/// The top-level error type for `lb-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum LbError {
    #[error("request processing cost must be at least 1 cycle")]
    ZeroCost,

    #[error("invalid cost range [{low}, {high}]: bounds must satisfy 1 <= low <= high")]
    InvalidCostRange { low: u32, high: u32 },
}

/// Shorthand result type for all `lb-*` crates.
pub type LbResult<T> = Result<T, LbError>;
