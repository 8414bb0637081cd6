//! The `Engine` struct and its tick loop.

use lb_core::{Address, LbResult, RandomSource, Request, RequestId, SimClock, SimConfig, SimRng, Tick};
use lb_pool::{RequestQueue, WorkerPool};
use lb_traffic::RequestGenerator;
use tracing::{debug, trace};

use crate::{
    CompletionEvent, DispatchEvent, FinalReport, ScaleEvent, SimObserver, Snapshot, StartReport,
};

// ── Run statistics ────────────────────────────────────────────────────────────

/// Counters accumulated across ticks for the final report.
#[derive(Debug, Clone, Copy, Default)]
struct RunStats {
    ticks_run:        u64,
    total_arrivals:   u64,
    total_dispatched: u64,
    total_completed:  u64,
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// The load-balancer simulation.
///
/// `Engine<R>` owns the request queue, the worker pool, and the random
/// source, and drives the six-step tick:
///
/// 1. **Arrival**: roll for one random request; enqueue it on success.
/// 2. **Scale up**: if `queue_len > pool_len * scale_up_factor`, append one
///    idle worker.
/// 3. **Scale down**: if the queue is empty and the pool has more than one
///    worker, remove the lowest-indexed idle worker (if any).
/// 4. **Dispatch**: give the front of the queue to each idle worker in index
///    order until the queue runs dry.
/// 5. **Advance**: every worker spends one cycle, including those assigned in
///    step 4.
/// 6. **Snapshot**: on interval ticks, report queue length and pool size.
///
/// Each step sees the effects of the previous ones.  Scale-down runs before
/// dispatch, so a worker can be removed on a tick where the queue is empty at
/// step 3 even if an arrival at step 1 of the next tick would have used it.
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct Engine<R: RandomSource = SimRng> {
    /// Global configuration (total ticks, seed, thresholds, …).
    pub config: SimConfig,

    /// Simulation clock: the tick currently being processed.
    pub clock: SimClock,

    pub(crate) queue:     RequestQueue,
    pub(crate) pool:      WorkerPool,
    pub(crate) generator: RequestGenerator,
    pub(crate) rng:       R,
    pub(crate) start:     StartReport,
    stats:                RunStats,
}

impl<R: RandomSource> Engine<R> {
    pub(crate) fn from_parts(
        config:    SimConfig,
        queue:     RequestQueue,
        pool:      WorkerPool,
        generator: RequestGenerator,
        rng:       R,
    ) -> Self {
        let start = StartReport {
            pool_size:             pool.len(),
            starting_queue_length: queue.len(),
        };
        Self {
            config,
            clock: SimClock::new(),
            queue,
            pool,
            generator,
            rng,
            start,
            stats: RunStats::default(),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    ///
    /// Calls [`SimObserver::on_sim_start`] first and
    /// [`SimObserver::on_sim_end`] with the final report last.  A config with
    /// `total_ticks == 0` runs no ticks at all.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> FinalReport {
        observer.on_sim_start(&self.start);
        while self.clock.current_tick < self.config.end_tick() {
            self.tick(observer);
        }
        let report = self.final_report();
        observer.on_sim_end(&report);
        report
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.  Does not call the start
    /// and end hooks.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.tick(observer);
        }
    }

    /// Process one tick and advance the clock.
    pub fn tick<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        self.arrival_step(now, observer);
        self.scale_up_step(now, observer);
        self.scale_down_step(now, observer);
        self.dispatch_step(now, observer);
        self.advance_step(now, observer);

        if now.is_on_interval(self.config.snapshot_interval_ticks) {
            observer.on_snapshot(&self.snapshot());
        }

        observer.on_tick_end(now);
        self.stats.ticks_run += 1;
        self.clock.advance();
    }

    /// Append a caller-built request to the back of the queue.
    ///
    /// Generated requests created afterwards get higher IDs than `request`.
    pub fn enqueue(&mut self, request: Request) {
        self.generator.advance_past(request.id());
        self.queue.push(request);
    }

    /// Build a request with the next free ID and enqueue it.
    ///
    /// # Errors
    /// [`LbError::ZeroCost`][lb_core::LbError::ZeroCost] if `cost == 0`;
    /// nothing is enqueued and no ID is consumed.
    pub fn inject(&mut self, origin: Address, destination: Address, cost: u32) -> LbResult<RequestId> {
        let request = Request::new(self.generator.peek_id(), origin, destination, cost)?;
        let id = self.generator.allocate_id();
        self.queue.push(request);
        Ok(id)
    }

    // ── Read-only views ───────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn queue(&self) -> &RequestQueue {
        &self.queue
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    pub fn start_report(&self) -> StartReport {
        self.start
    }

    /// Status as of the last completed step, stamped with the current tick.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick:         self.clock.current_tick,
            queue_length: self.queue.len(),
            pool_size:    self.pool.len(),
            busy_workers: self.pool.busy_count(),
        }
    }

    /// Summarise the engine's current state.  Safe to call at any time.
    pub fn final_report(&self) -> FinalReport {
        let active_count = self.pool.busy_count();
        FinalReport {
            ending_queue_length:   self.queue.len(),
            pool_size:             self.pool.len(),
            active_count,
            idle_count:            self.pool.len() - active_count,
            rejected_count:        0,
            starting_queue_length: self.start.starting_queue_length,
            ticks_run:             self.stats.ticks_run,
            total_arrivals:        self.stats.total_arrivals,
            total_dispatched:      self.stats.total_dispatched,
            total_completed:       self.stats.total_completed,
            peak_pool_size:        self.pool.peak_size(),
        }
    }

    // ── Tick steps ────────────────────────────────────────────────────────

    fn arrival_step<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        if let Some(request) = self.generator.maybe_arrival(&mut self.rng) {
            observer.on_arrival(now, &request);
            self.queue.push(request);
            self.stats.total_arrivals += 1;
        }
    }

    fn scale_up_step<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        let threshold = self.pool.len().saturating_mul(self.config.scale_up_factor);
        if self.queue.len() <= threshold {
            return;
        }
        let (worker_index, worker) = self.pool.add_worker();
        debug!(
            tick = now.0,
            queue_len = self.queue.len(),
            pool_size = self.pool.len(),
            "high load, added worker"
        );
        observer.on_scale_up(&ScaleEvent {
            tick: now,
            worker_index,
            worker,
            new_pool_size: self.pool.len(),
        });
    }

    fn scale_down_step<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        if !self.queue.is_empty() {
            return;
        }
        // `remove_first_idle` refuses to shrink below the minimum size and
        // leaves an all-busy pool untouched.
        let Some((worker_index, worker)) = self.pool.remove_first_idle() else {
            return;
        };
        debug!(
            tick = now.0,
            worker_index,
            pool_size = self.pool.len(),
            "low load, removed idle worker"
        );
        observer.on_scale_down(&ScaleEvent {
            tick: now,
            worker_index,
            worker,
            new_pool_size: self.pool.len(),
        });
    }

    fn dispatch_step<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        for (worker_index, worker) in self.pool.iter_mut().enumerate() {
            if self.queue.is_empty() {
                break;
            }
            if worker.is_busy() {
                continue;
            }
            let Some(request) = self.queue.pop() else {
                break;
            };
            let event = DispatchEvent {
                tick: now,
                worker_index,
                worker: worker.id(),
                request: request.id(),
                origin: request.origin(),
                processing_cost: request.processing_cost(),
            };
            if let Err(request) = worker.assign(request) {
                self.queue.requeue_front(request);
                continue;
            }
            trace!(tick = now.0, worker_index, request = event.request.0, "dispatched");
            self.stats.total_dispatched += 1;
            observer.on_dispatch(&event);
        }
    }

    fn advance_step<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        for (worker_index, done) in self.pool.advance_all() {
            self.stats.total_completed += 1;
            observer.on_completion(&CompletionEvent {
                tick: now,
                worker_index,
                worker: done.worker,
                request: done.request.id(),
                origin: done.request.origin(),
            });
        }
    }
}
