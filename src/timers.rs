//! Timers
//!
//! One-shot deferred events on a virtual clock. Nothing fires until the clock is
//! advanced; events due at the same instant fire in the order they were
//! scheduled. There is no cancellation.

use std::time::Duration;

#[derive(Debug)]
struct Scheduled<E> {
    deadline: Duration,
    event: E,
}

/// Deadline-ordered queue of pending events.
#[derive(Debug)]
pub struct Timers<E> {
    now: Duration,
    pending: Vec<Scheduled<E>>,
}

impl<E> Default for Timers<E> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            pending: Vec::new(),
        }
    }
}

impl<E> Timers<E> {
    /// Create an empty queue with the clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `event` to fire `delay` from now. Returns its deadline.
    pub fn schedule(&mut self, delay: Duration, event: E) -> Duration {
        let deadline = self.now.saturating_add(delay);

        // Sorted by deadline; ties go after existing entries.
        let at = self
            .pending
            .partition_point(|scheduled| scheduled.deadline <= deadline);

        self.pending.insert(
            at,
            Scheduled { deadline, event },
        );

        deadline
    }

    /// Move the clock forward by `by` and return every event now due, in firing order.
    pub fn advance(&mut self, by: Duration) -> Vec<E> {
        self.advance_to(self.now.saturating_add(by))
    }

    /// Move the clock to `at` (never backwards) and return every event now due.
    pub fn advance_to(&mut self, at: Duration) -> Vec<E> {
        self.now = self.now.max(at);

        let due = self
            .pending
            .partition_point(|scheduled| scheduled.deadline <= self.now);

        self.pending
            .drain(..due)
            .map(|scheduled| scheduled.event)
            .collect()
    }

    /// Deadline of the earliest pending event.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.first().map(|scheduled| scheduled.deadline)
    }

    /// Iterate over pending events in firing order.
    pub fn pending(&self) -> impl Iterator<Item = &E> {
        self.pending.iter().map(|scheduled| &scheduled.event)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[cfg(test)]
    fn is_ordered(&self) -> bool {
        self.pending.windows(2).all(|pair| match pair {
            [a, b] => a.deadline <= b.deadline,
            _ => true,
        })
    }
}
