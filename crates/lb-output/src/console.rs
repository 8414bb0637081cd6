//! `ConsoleReporter` — narrates a run through `tracing`.
//!
//! Each observer hook becomes one `info!` event with structured fields and a
//! short human-readable message.  Per-request events (arrival, dispatch,
//! completion) go out at `info` when the reporter is verbose and at `debug`
//! otherwise, so a quiet run still shows them under `RUST_LOG=debug`.

use lb_core::{Request, Tick};
use lb_sim::{
    CompletionEvent, DispatchEvent, FinalReport, ScaleEvent, SimObserver, Snapshot, StartReport,
};
use tracing::{debug, info};

/// A [`SimObserver`] that renders the run as log lines.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    verbose: bool,
    lines:   u64,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    /// A reporter that narrates every request.
    pub fn new() -> Self {
        Self { verbose: true, lines: 0 }
    }

    /// Demote per-request narration to `debug`.  Scale events, snapshots, and
    /// the start and end summaries stay at `info`.
    pub fn quiet() -> Self {
        Self { verbose: false, lines: 0 }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Number of `info`-level lines emitted so far.
    pub fn lines_emitted(&self) -> u64 {
        self.lines
    }

    fn per_request(&mut self) -> bool {
        if self.verbose {
            self.lines += 1;
        }
        self.verbose
    }
}

impl SimObserver for ConsoleReporter {
    fn on_sim_start(&mut self, start: &StartReport) {
        info!(servers = start.pool_size, "load balancer created");
        info!(requests = start.starting_queue_length, "starting queue size");
        self.lines += 2;
    }

    fn on_arrival(&mut self, tick: Tick, request: &Request) {
        if self.per_request() {
            info!(tick = tick.0, origin = %request.origin(), cost = request.processing_cost(), "new request queued");
        } else {
            debug!(tick = tick.0, origin = %request.origin(), cost = request.processing_cost(), "new request queued");
        }
    }

    fn on_scale_up(&mut self, event: &ScaleEvent) {
        info!(
            tick = event.tick.0,
            servers = event.new_pool_size,
            "high load detected, adding a new server"
        );
        self.lines += 1;
    }

    fn on_scale_down(&mut self, event: &ScaleEvent) {
        info!(
            tick = event.tick.0,
            servers = event.new_pool_size,
            "low load, removing idle server"
        );
        self.lines += 1;
    }

    fn on_dispatch(&mut self, event: &DispatchEvent) {
        if self.per_request() {
            info!(
                tick = event.tick.0,
                server = event.worker_index,
                origin = %event.origin,
                cycles = event.processing_cost,
                "server starting request"
            );
        } else {
            debug!(
                tick = event.tick.0,
                server = event.worker_index,
                origin = %event.origin,
                cycles = event.processing_cost,
                "server starting request"
            );
        }
    }

    fn on_completion(&mut self, event: &CompletionEvent) {
        if self.per_request() {
            info!(tick = event.tick.0, server = event.worker_index, origin = %event.origin, "server finished request");
        } else {
            debug!(tick = event.tick.0, server = event.worker_index, origin = %event.origin, "server finished request");
        }
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        info!(
            tick = snapshot.tick.0,
            queued = snapshot.queue_length,
            servers = snapshot.pool_size,
            busy = snapshot.busy_workers,
            "status"
        );
        self.lines += 1;
    }

    fn on_sim_end(&mut self, report: &FinalReport) {
        info!(ticks = report.ticks_run, "simulation finished");
        info!(remaining = report.ending_queue_length, "ending queue size");
        info!(
            servers = report.pool_size,
            active = report.active_count,
            idle = report.idle_count,
            peak = report.peak_pool_size,
            "final number of servers"
        );
        info!(rejected = report.rejected_count, "rejected / discarded requests (all requests are queued)");
        self.lines += 4;
    }
}
