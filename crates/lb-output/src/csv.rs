//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `events.csv`
//! - `snapshots.csv`
//! - `final_report.csv`

use std::fmt::Display;
use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EventRow, OutputResult, ReportRow, SnapshotRow};

pub const EVENT_HEADERS: [&str; 8] =
    ["tick", "kind", "worker_index", "worker_id", "request_id", "origin", "cost", "pool_size"];
pub const SNAPSHOT_HEADERS: [&str; 4] = ["tick", "queue_length", "pool_size", "busy_workers"];
pub const REPORT_HEADERS: [&str; 11] = [
    "ticks_run",
    "starting_queue_length",
    "ending_queue_length",
    "pool_size",
    "peak_pool_size",
    "active_count",
    "idle_count",
    "rejected_count",
    "total_arrivals",
    "total_dispatched",
    "total_completed",
];

/// Empty cell for `None`.
fn cell<T: Display>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    events:    Writer<File>,
    snapshots: Writer<File>,
    report:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(EVENT_HEADERS)?;

        let mut snapshots = Writer::from_path(dir.join("snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADERS)?;

        let mut report = Writer::from_path(dir.join("final_report.csv"))?;
        report.write_record(REPORT_HEADERS)?;

        Ok(Self {
            events,
            snapshots,
            report,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.tick.to_string(),
            row.kind.to_string(),
            cell(row.worker_index),
            cell(row.worker_id),
            cell(row.request_id),
            cell(row.origin),
            cell(row.cost),
            cell(row.pool_size),
        ])?;
        Ok(())
    }

    fn write_snapshot(&mut self, row: &SnapshotRow) -> OutputResult<()> {
        self.snapshots.write_record(&[
            row.tick.to_string(),
            row.queue_length.to_string(),
            row.pool_size.to_string(),
            row.busy_workers.to_string(),
        ])?;
        Ok(())
    }

    fn write_report(&mut self, row: &ReportRow) -> OutputResult<()> {
        self.report.write_record(&[
            row.ticks_run.to_string(),
            row.starting_queue_length.to_string(),
            row.ending_queue_length.to_string(),
            row.pool_size.to_string(),
            row.peak_pool_size.to_string(),
            row.active_count.to_string(),
            row.idle_count.to_string(),
            row.rejected_count.to_string(),
            row.total_arrivals.to_string(),
            row.total_dispatched.to_string(),
            row.total_completed.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.snapshots.flush()?;
        self.report.flush()?;
        Ok(())
    }
}
