//! Simulation observer trait for reporting and data collection.

use lb_core::{Request, Tick};

use crate::{
    CompletionEvent, DispatchEvent, FinalReport, ScaleEvent, SimEvent, Snapshot, StartReport,
};

/// Callbacks invoked by the [`Engine`][crate::Engine] as the tick loop runs.
///
/// The engine never prints anything itself; everything a reporter might want
/// to narrate arrives through these hooks, in the order it happened.  All
/// methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — scale watcher
///
/// ```rust,ignore
/// struct ScaleWatcher { ups: usize }
///
/// impl SimObserver for ScaleWatcher {
///     fn on_scale_up(&mut self, event: &ScaleEvent) {
///         self.ups += 1;
///         println!("{}: pool grew to {}", event.tick, event.new_pool_size);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once by [`Engine::run`][crate::Engine::run] before the first tick.
    fn on_sim_start(&mut self, _start: &StartReport) {}

    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// A random arrival joined the back of the queue.
    fn on_arrival(&mut self, _tick: Tick, _request: &Request) {}

    fn on_scale_up(&mut self, _event: &ScaleEvent) {}

    fn on_scale_down(&mut self, _event: &ScaleEvent) {}

    fn on_dispatch(&mut self, _event: &DispatchEvent) {}

    fn on_completion(&mut self, _event: &CompletionEvent) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_ticks`
    /// ticks, tick 0 included), after all workers have advanced.
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick) {}

    /// Called once by [`Engine::run`][crate::Engine::run] after the final tick.
    fn on_sim_end(&mut self, _report: &FinalReport) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_sim_start(&mut self, start: &StartReport) {
        (**self).on_sim_start(start);
    }
    fn on_tick_start(&mut self, tick: Tick) {
        (**self).on_tick_start(tick);
    }
    fn on_arrival(&mut self, tick: Tick, request: &Request) {
        (**self).on_arrival(tick, request);
    }
    fn on_scale_up(&mut self, event: &ScaleEvent) {
        (**self).on_scale_up(event);
    }
    fn on_scale_down(&mut self, event: &ScaleEvent) {
        (**self).on_scale_down(event);
    }
    fn on_dispatch(&mut self, event: &DispatchEvent) {
        (**self).on_dispatch(event);
    }
    fn on_completion(&mut self, event: &CompletionEvent) {
        (**self).on_completion(event);
    }
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        (**self).on_snapshot(snapshot);
    }
    fn on_tick_end(&mut self, tick: Tick) {
        (**self).on_tick_end(tick);
    }
    fn on_sim_end(&mut self, report: &FinalReport) {
        (**self).on_sim_end(report);
    }
}

/// Fan out every callback to two observers, first `A` then `B`.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_sim_start(&mut self, start: &StartReport) {
        self.0.on_sim_start(start);
        self.1.on_sim_start(start);
    }
    fn on_tick_start(&mut self, tick: Tick) {
        self.0.on_tick_start(tick);
        self.1.on_tick_start(tick);
    }
    fn on_arrival(&mut self, tick: Tick, request: &Request) {
        self.0.on_arrival(tick, request);
        self.1.on_arrival(tick, request);
    }
    fn on_scale_up(&mut self, event: &ScaleEvent) {
        self.0.on_scale_up(event);
        self.1.on_scale_up(event);
    }
    fn on_scale_down(&mut self, event: &ScaleEvent) {
        self.0.on_scale_down(event);
        self.1.on_scale_down(event);
    }
    fn on_dispatch(&mut self, event: &DispatchEvent) {
        self.0.on_dispatch(event);
        self.1.on_dispatch(event);
    }
    fn on_completion(&mut self, event: &CompletionEvent) {
        self.0.on_completion(event);
        self.1.on_completion(event);
    }
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.0.on_snapshot(snapshot);
        self.1.on_snapshot(snapshot);
    }
    fn on_tick_end(&mut self, tick: Tick) {
        self.0.on_tick_end(tick);
        self.1.on_tick_end(tick);
    }
    fn on_sim_end(&mut self, report: &FinalReport) {
        self.0.on_sim_end(report);
        self.1.on_sim_end(report);
    }
}

/// Records every event as an owned [`SimEvent`], in emission order.
///
/// Mostly useful in tests and for post-run analysis of short runs; a long
/// run with a large burst produces one dispatch and one completion event per
/// request.
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<SimEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over events of one kind using a projection.
    ///
    /// ```rust,ignore
    /// let dispatches: Vec<&DispatchEvent> = log
    ///     .filter(|e| match e { SimEvent::Dispatch(d) => Some(d), _ => None })
    ///     .collect();
    /// ```
    pub fn filter<'a, T: 'a>(
        &'a self,
        project: impl Fn(&'a SimEvent) -> Option<T> + 'a,
    ) -> impl Iterator<Item = T> + 'a {
        self.events.iter().filter_map(project)
    }

    pub fn dispatches(&self) -> impl Iterator<Item = &DispatchEvent> + '_ {
        self.filter(|e| match e {
            SimEvent::Dispatch(d) => Some(d),
            _ => None,
        })
    }

    pub fn completions(&self) -> impl Iterator<Item = &CompletionEvent> + '_ {
        self.filter(|e| match e {
            SimEvent::Completion(c) => Some(c),
            _ => None,
        })
    }

    pub fn scale_ups(&self) -> impl Iterator<Item = &ScaleEvent> + '_ {
        self.filter(|e| match e {
            SimEvent::ScaleUp(s) => Some(s),
            _ => None,
        })
    }

    pub fn scale_downs(&self) -> impl Iterator<Item = &ScaleEvent> + '_ {
        self.filter(|e| match e {
            SimEvent::ScaleDown(s) => Some(s),
            _ => None,
        })
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> + '_ {
        self.filter(|e| match e {
            SimEvent::Snapshot(s) => Some(s),
            _ => None,
        })
    }
}

impl SimObserver for EventLog {
    fn on_sim_start(&mut self, start: &StartReport) {
        self.events.push(SimEvent::Start(*start));
    }
    fn on_arrival(&mut self, tick: Tick, request: &Request) {
        self.events.push(SimEvent::Arrival { tick, request: request.clone() });
    }
    fn on_scale_up(&mut self, event: &ScaleEvent) {
        self.events.push(SimEvent::ScaleUp(*event));
    }
    fn on_scale_down(&mut self, event: &ScaleEvent) {
        self.events.push(SimEvent::ScaleDown(*event));
    }
    fn on_dispatch(&mut self, event: &DispatchEvent) {
        self.events.push(SimEvent::Dispatch(*event));
    }
    fn on_completion(&mut self, event: &CompletionEvent) {
        self.events.push(SimEvent::Completion(*event));
    }
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.events.push(SimEvent::Snapshot(*snapshot));
    }
    fn on_sim_end(&mut self, report: &FinalReport) {
        self.events.push(SimEvent::End(*report));
    }
}
