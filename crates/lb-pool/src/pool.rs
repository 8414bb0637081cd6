//! `WorkerPool` — the ordered, never-empty set of workers.
//!
//! Order matters: dispatch walks the pool from index 0 upward, and scale-down
//! removes the lowest-indexed idle worker.  Removing a worker shifts every
//! later worker down by one index; their `WorkerId`s stay the same.

use lb_core::{MIN_POOL_SIZE, WorkerId};

use crate::{Completion, Worker};

/// The engine's workers, in dispatch order.
#[derive(Clone, Debug)]
pub struct WorkerPool {
    workers: Vec<Worker>,
    next_id: WorkerId,
    peak:    usize,
}

impl WorkerPool {
    /// A pool of `size` idle workers.  Sizes below the minimum are raised to
    /// it.
    pub fn new(size: usize) -> Self {
        let size = size.max(MIN_POOL_SIZE);
        let mut pool = Self {
            workers: Vec::with_capacity(size),
            next_id: WorkerId(0),
            peak:    0,
        };
        for _ in 0..size {
            pool.add_worker();
        }
        pool
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    /// Always `false`; provided for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Largest size the pool has reached.
    #[inline]
    pub fn peak_size(&self) -> usize {
        self.peak
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Worker> {
        self.workers.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Worker> {
        self.workers.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Worker> {
        self.workers.iter_mut()
    }

    pub fn busy_count(&self) -> usize {
        self.workers.iter().filter(|w| w.is_busy()).count()
    }

    pub fn idle_count(&self) -> usize {
        self.len() - self.busy_count()
    }

    /// Append a new idle worker.  Returns its index and ID.
    pub fn add_worker(&mut self) -> (usize, WorkerId) {
        let id = self.next_id;
        self.next_id = id.next();
        self.workers.push(Worker::new(id));
        self.peak = self.peak.max(self.workers.len());
        (self.workers.len() - 1, id)
    }

    /// Remove the lowest-indexed idle worker.
    ///
    /// Returns `None` without touching the pool if it is already at the
    /// minimum size or every worker is busy.
    pub fn remove_first_idle(&mut self) -> Option<(usize, WorkerId)> {
        if self.workers.len() <= MIN_POOL_SIZE {
            return None;
        }
        let index = self.workers.iter().position(Worker::is_idle)?;
        let removed = self.workers.remove(index);
        Some((index, removed.id()))
    }

    /// Advance every worker by one tick, in index order.
    ///
    /// Returns `(index, completion)` for each worker that finished.
    pub fn advance_all(&mut self) -> Vec<(usize, Completion)> {
        self.workers
            .iter_mut()
            .enumerate()
            .filter_map(|(i, w)| w.advance().map(|c| (i, c)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a WorkerPool {
    type Item = &'a Worker;
    type IntoIter = std::slice::Iter<'a, Worker>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
