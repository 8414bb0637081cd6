//! `lb-sim` — tick loop orchestrator for the rust_lb load-balancer simulation.
//!
//! # Six-step tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Arrival    — 1-in-20 chance of one new request at the back of the queue.
//!   ② Scale up   — queue_len > pool_len * 10  → append one idle worker.
//!   ③ Scale down — queue empty && pool_len > 1 → drop lowest-index idle worker.
//!   ④ Dispatch   — each idle worker (index order) takes the queue front.
//!   ⑤ Advance    — every worker spends one cycle; finished ones go idle.
//!   ⑥ Snapshot   — tick % 100 == 0 → {tick, queue_len, pool_len}.
//! ```
//!
//! Nothing in this crate prints.  The engine reports through
//! [`SimObserver`]; renderers and file writers live in `lb-output`.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lb_core::SimConfig;
//! use lb_sim::{EngineBuilder, NoopObserver};
//!
//! let mut engine = EngineBuilder::seeded(SimConfig::default()).build()?;
//! let report = engine.run(&mut NoopObserver);
//! assert_eq!(report.rejected_count, 0);
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod event;
pub mod observer;
pub mod report;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use engine::Engine;
pub use error::{SimError, SimResult};
pub use event::{CompletionEvent, DispatchEvent, ScaleEvent, SimEvent};
pub use observer::{EventLog, NoopObserver, SimObserver};
pub use report::{FinalReport, Snapshot, StartReport};
