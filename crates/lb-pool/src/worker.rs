//! Single-slot worker.

use std::num::NonZeroU32;

use lb_core::{Request, WorkerId};

/// What a worker is doing right now.
///
/// The busy variant carries both the request and a non-zero countdown, so
/// "busy ⟺ remaining > 0 ⟺ has a request" holds by construction.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum WorkerState {
    #[default]
    Idle,
    Busy {
        request:          Request,
        remaining_cycles: NonZeroU32,
    },
}

/// Emitted by [`Worker::advance`] when the in-flight request finishes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub worker:  WorkerId,
    pub request: Request,
}

/// A processor that holds at most one request at a time and works on it for
/// `processing_cost` consecutive ticks.
#[derive(Clone, Debug)]
pub struct Worker {
    id:        WorkerId,
    state:     WorkerState,
    completed: u64,
}

impl Worker {
    /// A new idle worker.
    pub fn new(id: WorkerId) -> Self {
        Self { id, state: WorkerState::Idle, completed: 0 }
    }

    #[inline]
    pub fn id(&self) -> WorkerId {
        self.id
    }

    #[inline]
    pub fn state(&self) -> &WorkerState {
        &self.state
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        matches!(self.state, WorkerState::Busy { .. })
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        !self.is_busy()
    }

    /// Ticks left on the current request; 0 when idle.
    #[inline]
    pub fn remaining_cycles(&self) -> u32 {
        match &self.state {
            WorkerState::Idle => 0,
            WorkerState::Busy { remaining_cycles, .. } => remaining_cycles.get(),
        }
    }

    pub fn current_request(&self) -> Option<&Request> {
        match &self.state {
            WorkerState::Idle => None,
            WorkerState::Busy { request, .. } => Some(request),
        }
    }

    /// Requests this worker has finished over its lifetime.
    #[inline]
    pub fn completed_count(&self) -> u64 {
        self.completed
    }

    /// Start working on `request`.
    ///
    /// # Errors
    /// A busy worker keeps its current request and returns `request` to the
    /// caller unchanged.
    pub fn assign(&mut self, request: Request) -> Result<(), Request> {
        if self.is_busy() {
            return Err(request);
        }
        let remaining_cycles = NonZeroU32::new(request.processing_cost()).unwrap_or(NonZeroU32::MIN);
        self.state = WorkerState::Busy { request, remaining_cycles };
        Ok(())
    }

    /// Spend one tick on the current request.
    ///
    /// Returns the finished request when the countdown reaches zero.  Idle
    /// workers are unaffected.
    pub fn advance(&mut self) -> Option<Completion> {
        let WorkerState::Busy { remaining_cycles, .. } = &mut self.state else {
            return None;
        };

        if let Some(left) = NonZeroU32::new(remaining_cycles.get() - 1) {
            *remaining_cycles = left;
            return None;
        }

        match std::mem::take(&mut self.state) {
            WorkerState::Busy { request, .. } => {
                self.completed += 1;
                Some(Completion { worker: self.id, request })
            }
            WorkerState::Idle => None,
        }
    }
}
