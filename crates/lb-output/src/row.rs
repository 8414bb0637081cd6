//! Plain data row types written by output backends.

use std::fmt;

use lb_core::Address;
use lb_sim::{CompletionEvent, DispatchEvent, FinalReport, ScaleEvent, Snapshot};

/// What an [`EventRow`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Arrival,
    ScaleUp,
    ScaleDown,
    Dispatch,
    Completion,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Arrival    => "arrival",
            EventKind::ScaleUp    => "scale_up",
            EventKind::ScaleDown  => "scale_down",
            EventKind::Dispatch   => "dispatch",
            EventKind::Completion => "completion",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One engine event, flattened.  Fields that do not apply to `kind` are
/// `None` and written as empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRow {
    pub tick:         u64,
    pub kind:         EventKind,
    pub worker_index: Option<usize>,
    pub worker_id:    Option<u32>,
    pub request_id:   Option<u64>,
    pub origin:       Option<Address>,
    pub cost:         Option<u32>,
    /// Pool size after a scale event.
    pub pool_size:    Option<usize>,
}

impl EventRow {
    fn bare(tick: u64, kind: EventKind) -> Self {
        Self {
            tick,
            kind,
            worker_index: None,
            worker_id:    None,
            request_id:   None,
            origin:       None,
            cost:         None,
            pool_size:    None,
        }
    }

    pub fn arrival(tick: u64, request: &lb_core::Request) -> Self {
        Self {
            request_id: Some(request.id().0),
            origin:     Some(request.origin()),
            cost:       Some(request.processing_cost()),
            ..Self::bare(tick, EventKind::Arrival)
        }
    }

    pub fn scale(kind: EventKind, e: &ScaleEvent) -> Self {
        Self {
            worker_index: Some(e.worker_index),
            worker_id:    Some(e.worker.0),
            pool_size:    Some(e.new_pool_size),
            ..Self::bare(e.tick.0, kind)
        }
    }

    pub fn dispatch(e: &DispatchEvent) -> Self {
        Self {
            worker_index: Some(e.worker_index),
            worker_id:    Some(e.worker.0),
            request_id:   Some(e.request.0),
            origin:       Some(e.origin),
            cost:         Some(e.processing_cost),
            ..Self::bare(e.tick.0, EventKind::Dispatch)
        }
    }

    pub fn completion(e: &CompletionEvent) -> Self {
        Self {
            worker_index: Some(e.worker_index),
            worker_id:    Some(e.worker.0),
            request_id:   Some(e.request.0),
            origin:       Some(e.origin),
            ..Self::bare(e.tick.0, EventKind::Completion)
        }
    }
}

/// Periodic status at one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotRow {
    pub tick:         u64,
    pub queue_length: u64,
    pub pool_size:    u64,
    pub busy_workers: u64,
}

impl From<&Snapshot> for SnapshotRow {
    fn from(s: &Snapshot) -> Self {
        Self {
            tick:         s.tick.0,
            queue_length: s.queue_length as u64,
            pool_size:    s.pool_size as u64,
            busy_workers: s.busy_workers as u64,
        }
    }
}

/// The final report as one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRow {
    pub ticks_run:             u64,
    pub starting_queue_length: u64,
    pub ending_queue_length:   u64,
    pub pool_size:             u64,
    pub peak_pool_size:        u64,
    pub active_count:          u64,
    pub idle_count:            u64,
    pub rejected_count:        u64,
    pub total_arrivals:        u64,
    pub total_dispatched:      u64,
    pub total_completed:       u64,
}

impl From<&FinalReport> for ReportRow {
    fn from(r: &FinalReport) -> Self {
        Self {
            ticks_run:             r.ticks_run,
            starting_queue_length: r.starting_queue_length as u64,
            ending_queue_length:   r.ending_queue_length as u64,
            pool_size:             r.pool_size as u64,
            peak_pool_size:        r.peak_pool_size as u64,
            active_count:          r.active_count as u64,
            idle_count:            r.idle_count as u64,
            rejected_count:        r.rejected_count,
            total_arrivals:        r.total_arrivals,
            total_dispatched:      r.total_dispatched,
            total_completed:       r.total_completed,
        }
    }
}
