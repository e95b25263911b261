use std::time::{Duration, Instant};

/// Coalesces a burst of scheduled payloads into at most one firing per quiet
/// period. Scheduling replaces any pending payload, so only the most recent
/// one ever fires, with its original arguments.
///
/// Time is supplied by the caller on every operation; nothing here reads the
/// clock, which keeps hosts and tests in control of it.
#[derive(Debug)]
pub struct DebounceScheduler {
    window: Duration,
    pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    due_at: Instant,
    query: String,
}

impl DebounceScheduler {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Registers a payload due one quiet window from `now`, cancelling any
    /// payload still pending. The cancelled one never fires.
    pub fn schedule(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            due_at: now + self.window,
            query: query.into(),
        });
    }

    /// Discards the pending payload. Called at disposal so nothing fires
    /// after the owning widget is gone.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Fires the pending payload once its quiet period has elapsed. At most
    /// one payload fires per call, and firings never overlap within one
    /// scheduler instance.
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref().is_some_and(|p| p.due_at > now) {
            return None;
        }
        self.pending.take().map(|p| p.query)
    }

    /// How long a host loop may sleep before the pending payload comes due.
    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        match &self.pending {
            Some(pending) => pending
                .due_at
                .saturating_duration_since(now)
                .min(default_timeout),
            None => default_timeout,
        }
    }
}
