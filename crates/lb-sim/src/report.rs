//! Plain report values handed to observers.

use std::fmt;

use lb_core::Tick;

/// State of the engine right after construction, before tick 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartReport {
    pub pool_size:             usize,
    pub starting_queue_length: usize,
}

/// Periodic status, emitted at the end of every snapshot-interval tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub tick:         Tick,
    pub queue_length: usize,
    pub pool_size:    usize,
    pub busy_workers: usize,
}

/// End-of-run summary.
///
/// `rejected_count` is always 0: the queue is unbounded and no request is
/// ever dropped.  It is reported so consumers do not have to infer that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalReport {
    pub ending_queue_length:   usize,
    pub pool_size:             usize,
    pub active_count:          usize,
    pub idle_count:            usize,
    pub rejected_count:        u64,

    pub starting_queue_length: usize,
    pub ticks_run:             u64,
    pub total_arrivals:        u64,
    pub total_dispatched:      u64,
    pub total_completed:       u64,
    pub peak_pool_size:        usize,
}

impl fmt::Display for FinalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ticks run:              {}", self.ticks_run)?;
        writeln!(f, "starting queue size:    {}", self.starting_queue_length)?;
        writeln!(f, "ending queue size:      {}", self.ending_queue_length)?;
        writeln!(
            f,
            "servers:                {} ({} active, {} idle, peak {})",
            self.pool_size, self.active_count, self.idle_count, self.peak_pool_size
        )?;
        writeln!(
            f,
            "requests:               {} arrived, {} dispatched, {} completed",
            self.total_arrivals, self.total_dispatched, self.total_completed
        )?;
        write!(f, "rejected:               {}", self.rejected_count)
    }
}
