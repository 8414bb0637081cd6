//! `lb-output` — reporters for the rust_lb simulation.
//!
//! Two kinds of reporter are provided, both implementing
//! `lb_sim::SimObserver`:
//!
//! | Type                   | Renders to                                      |
//! |------------------------|-------------------------------------------------|
//! | [`ConsoleReporter`]    | `tracing` events (the run's narration)          |
//! | [`SimOutputObserver`]  | any [`OutputWriter`]; [`CsvWriter`] ships here  |
//!
//! The CSV backend creates `events.csv`, `snapshots.csv`, and
//! `final_report.csv` in the output directory.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lb_output::{ConsoleReporter, CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = (ConsoleReporter::new(), SimOutputObserver::new(writer));
//! engine.run(&mut obs);
//! if let Some(e) = obs.1.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod console;
pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use console::ConsoleReporter;
pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{EventKind, EventRow, ReportRow, SnapshotRow};
pub use writer::OutputWriter;
