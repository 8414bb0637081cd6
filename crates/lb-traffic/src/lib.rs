//! `lb-traffic` — where requests come from.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`model`]     | `CostRange`, `ArrivalModel` (tunable constants)       |
//! | [`generator`] | `RequestGenerator`, `random_address`                  |
//!
//! # Arrival model (summary)
//!
//! ```text
//! at construction:  pool_size * burst_per_worker requests, cost ~ U[1, 50]
//! every tick:       with p = 1/arrival_one_in, one request, cost ~ U[1, 100]
//! ```
//!
//! All draws go through an injected [`lb_core::RandomSource`], so a generator
//! never blocks and never fails once its model has been validated.

pub mod generator;
pub mod model;


pub use generator::{RequestGenerator, random_address};
pub use model::{ArrivalModel, CostRange};
