//! `lb-core` — foundational types for the `rust_lb` load-balancer simulation.
//!
//! This crate is a dependency of every other `lb-*` crate.  It has no `lb-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `RequestId`, `WorkerId`                                   |
//! | [`request`] | `Address`, `Request`                                      |
//! | [`time`]    | `Tick`, `SimClock`, `SimConfig`                           |
//! | [`rng`]     | `RandomSource` trait, `SimRng` (seeded `SmallRng`)        |
//! | [`error`]   | `LbError`, `LbResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod request;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{LbError, LbResult};
pub use ids::{RequestId, WorkerId};
pub use request::{Address, Request};
pub use rng::{RandomSource, SimRng};
pub use time::{MIN_POOL_SIZE, SimClock, SimConfig, Tick, coerce_pool_size};
