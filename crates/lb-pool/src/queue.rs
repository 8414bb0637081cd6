//! `RequestQueue` — the central, unbounded FIFO.

use std::collections::VecDeque;

use lb_core::Request;

/// Requests waiting for a worker, oldest first.
///
/// There is no capacity limit and no reordering: the order requests are
/// pushed is the order they are popped.
#[derive(Clone, Debug, Default)]
pub struct RequestQueue {
    inner:          VecDeque<Request>,
    total_enqueued: u64,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `request` to the back of the queue.
    pub fn push(&mut self, request: Request) {
        self.inner.push_back(request);
        self.total_enqueued += 1;
    }

    /// Remove and return the oldest request.
    pub fn pop(&mut self) -> Option<Request> {
        self.inner.pop_front()
    }

    /// Put a just-popped request back at the front, restoring its position.
    ///
    /// Does not count as a new enqueue.
    pub fn requeue_front(&mut self, request: Request) {
        self.inner.push_front(request);
    }

    pub fn front(&self) -> Option<&Request> {
        self.inner.front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Requests ever pushed, including ones already dispatched.
    #[inline]
    pub fn total_enqueued(&self) -> u64 {
        self.total_enqueued
    }

    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, Request> {
        self.inner.iter()
    }
}

impl Extend<Request> for RequestQueue {
    fn extend<I: IntoIterator<Item = Request>>(&mut self, iter: I) {
        for request in iter {
            self.push(request);
        }
    }
}

impl FromIterator<Request> for RequestQueue {
    fn from_iter<I: IntoIterator<Item = Request>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}
