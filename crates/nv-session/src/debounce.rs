use std::time::{Duration, Instant};

use log::trace;

/// A single-slot delayed task.
///
/// Submitting replaces whatever is waiting and restarts the delay, so only the
/// last value of a burst is ever released. Nothing is cancelled once released.
/// The caller supplies the clock.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    slot: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, slot: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value` for `now + delay`, returning the unstarted value it replaced.
    pub fn submit(&mut self, value: T, now: Instant) -> Option<T> {
        let replaced = self.slot.replace((now + self.delay, value)).map(|(_, v)| v);
        if replaced.is_some() {
            trace!("debounce: pending value replaced");
        }
        replaced
    }

    /// Release the pending value if its delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.due_at()?;
        if now < due {
            return None;
        }
        self.slot.take().map(|(_, v)| v)
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.slot.take().map(|(_, v)| v)
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    /// When the pending value becomes due, for hosts that sleep until then.
    pub fn due_at(&self) -> Option<Instant> {
        self.slot.as_ref().map(|(due, _)| *due)
    }
}
