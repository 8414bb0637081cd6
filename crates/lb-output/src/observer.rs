//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use lb_core::{Request, Tick};
use lb_sim::{CompletionEvent, DispatchEvent, FinalReport, ScaleEvent, SimObserver, Snapshot};

use crate::row::{EventKind, EventRow, ReportRow, SnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes events, snapshots, and the final report to
/// any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `engine.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:         W,
    write_events:   bool,
    events_written: u64,
    last_error:     Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer` that records every event.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            write_events:   true,
            events_written: 0,
            last_error:     None,
        }
    }

    /// Only write snapshots and the final report.
    ///
    /// A long run produces one dispatch and one completion row per request;
    /// turn events off when only the aggregate picture matters.
    pub fn without_events(mut self) -> Self {
        self.write_events = false;
        self
    }

    /// Event rows handed to the writer so far.
    pub fn events_written(&self) -> u64 {
        self.events_written
    }

    /// Take the stored write error (if any) after `engine.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn event(&mut self, row: EventRow) {
        if !self.write_events {
            return;
        }
        let result = self.writer.write_event(&row);
        if result.is_ok() {
            self.events_written += 1;
        }
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_arrival(&mut self, tick: Tick, request: &Request) {
        self.event(EventRow::arrival(tick.0, request));
    }

    fn on_scale_up(&mut self, event: &ScaleEvent) {
        self.event(EventRow::scale(EventKind::ScaleUp, event));
    }

    fn on_scale_down(&mut self, event: &ScaleEvent) {
        self.event(EventRow::scale(EventKind::ScaleDown, event));
    }

    fn on_dispatch(&mut self, event: &DispatchEvent) {
        self.event(EventRow::dispatch(event));
    }

    fn on_completion(&mut self, event: &CompletionEvent) {
        self.event(EventRow::completion(event));
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        let result = self.writer.write_snapshot(&SnapshotRow::from(snapshot));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, report: &FinalReport) {
        let result = self.writer.write_report(&ReportRow::from(report));
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
