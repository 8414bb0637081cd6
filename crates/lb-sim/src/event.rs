//! Structured events emitted by the tick loop.

use lb_core::{Address, Request, RequestId, Tick, WorkerId};

use crate::{FinalReport, Snapshot, StartReport};

/// A worker joined or left the pool.
///
/// For scale-up `worker_index` is the new worker's index; for scale-down it
/// is the index the removed worker occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleEvent {
    pub tick:          Tick,
    pub worker_index:  usize,
    pub worker:        WorkerId,
    pub new_pool_size: usize,
}

/// A request left the queue for an idle worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchEvent {
    pub tick:            Tick,
    pub worker_index:    usize,
    pub worker:          WorkerId,
    pub request:         RequestId,
    pub origin:          Address,
    pub processing_cost: u32,
}

/// A worker finished its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionEvent {
    pub tick:         Tick,
    pub worker_index: usize,
    pub worker:       WorkerId,
    pub request:      RequestId,
    pub origin:       Address,
}

/// Everything an observer can see, as one owned value.  Recorded by
/// [`EventLog`][crate::EventLog].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    Start(StartReport),
    Arrival { tick: Tick, request: Request },
    ScaleUp(ScaleEvent),
    ScaleDown(ScaleEvent),
    Dispatch(DispatchEvent),
    Completion(CompletionEvent),
    Snapshot(Snapshot),
    End(FinalReport),
}

impl SimEvent {
    /// The tick the event happened at, if it belongs to one.
    pub fn tick(&self) -> Option<Tick> {
        match self {
            SimEvent::Start(_) | SimEvent::End(_) => None,
            SimEvent::Arrival { tick, .. } => Some(*tick),
            SimEvent::ScaleUp(e) | SimEvent::ScaleDown(e) => Some(e.tick),
            SimEvent::Dispatch(e) => Some(e.tick),
            SimEvent::Completion(e) => Some(e.tick),
            SimEvent::Snapshot(s) => Some(s.tick),
        }
    }
}
