use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerHandle(u64);

/// One-shot "load the next question" deadline. Scheduling replaces any
/// pending deadline; the handle lets a caller cancel only its own.
#[derive(Debug, Default)]
pub struct AdvanceTimer {
    pending: Option<(TimerHandle, Instant)>,
    next_id: u64,
}

impl AdvanceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending = Some((handle, now + delay));
        handle
    }

    /// Returns true if a pending advance was dropped.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn cancel_handle(&mut self, handle: TimerHandle) -> bool {
        match self.pending {
            Some((pending, _)) if pending == handle => self.cancel(),
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }

    /// Fires at most once per schedule.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some((_, deadline)) if now >= deadline => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
