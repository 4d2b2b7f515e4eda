//! Deferred cart clear after a confirmed order.

use std::time::{Duration, Instant};

/// Cart clear scheduled after a confirmed order.
///
/// Nothing runs on its own; the owner polls [`is_due`](Self::is_due) and
/// drops the value to cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredClear {
    due_at: Instant,
}

impl DeferredClear {
    pub fn after(now: Instant, delay: Duration) -> Self {
        Self {
            due_at: now + delay,
        }
    }

    pub fn due_at(&self) -> Instant {
        self.due_at
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due_at
    }
}
