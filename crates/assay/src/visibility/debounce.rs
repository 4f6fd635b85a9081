//! A single-slot, cancellable deferred operation.

use std::time::{Duration, Instant};

/// Holds at most one pending value and releases it after a quiet period.
///
/// Scheduling a new value replaces the pending one and restarts the quiet
/// period, so a burst of calls collapses into the last one. Time is passed in
/// explicitly; the caller drives polling from its event loop.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules `value`, returning the value it replaced, if any.
    pub fn schedule(&mut self, value: T, now: Instant) -> Option<T> {
        let deadline = now + self.delay;
        self.pending
            .replace((value, deadline))
            .map(|(replaced, _)| replaced)
    }

    /// Returns the pending value if its quiet period has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.deadline().is_some_and(|deadline| now >= deadline) {
            self.flush()
        } else {
            None
        }
    }

    /// Returns the pending value immediately, regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drops the pending value. Returns true if there was one.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The instant at which the pending value becomes ready.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }
}
