//! `lb-pool` — the things the engine owns and mutates.
//!
//! | Module     | Contents                                         |
//! |------------|--------------------------------------------------|
//! | [`worker`] | `Worker`, `WorkerState`, `Completion`            |
//! | [`pool`]   | `WorkerPool` (ordered, never empty)              |
//! | [`queue`]  | `RequestQueue` (unbounded FIFO)                  |
//!
//! # Worker state machine
//!
//! ```text
//!            assign(r)                 advance() with remaining > 1
//!   Idle ─────────────────▶ Busy ◀──────────────────────┐
//!    ▲                       │ └─────────────────────────┘
//!    └───────────────────────┘
//!      advance() with remaining == 1  → emits Completion
//! ```
//!
//! `assign` on a busy worker hands the request straight back; in-flight work
//! is never overwritten.

pub mod pool;
pub mod queue;
pub mod worker;


pub use pool::WorkerPool;
pub use queue::RequestQueue;
pub use worker::{Completion, Worker, WorkerState};
