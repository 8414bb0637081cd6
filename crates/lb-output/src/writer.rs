//! The `OutputWriter` trait implemented by backend writers.

use crate::{EventRow, OutputResult, ReportRow, SnapshotRow};

/// Trait implemented by output backends.
///
/// Errors are returned to [`SimOutputObserver`][crate::SimOutputObserver],
/// which stores the first one for retrieval with `take_error`.
pub trait OutputWriter {
    /// Write one engine event.
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    /// Write one periodic snapshot.
    fn write_snapshot(&mut self, row: &SnapshotRow) -> OutputResult<()>;

    /// Write the end-of-run summary.
    fn write_report(&mut self, row: &ReportRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
