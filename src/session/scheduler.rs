use std::time::{Duration, Instant};

/// Quiet window after the last keystroke before a caption renders.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Debounce for caption text edits.
///
/// Text edits push a single deadline forward; every other change renders immediately and
/// absorbs whatever text render was still waiting. Time is always passed in, so the scheduler
/// itself never reads the clock.
#[derive(Clone, Debug)]
pub struct RenderScheduler {
    window: Duration,
    deadline: Option<Instant>,
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl RenderScheduler {
    /// Idle scheduler with the given quiet window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Quiet window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Pending text deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True while a text edit waits to render.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Record a text edit at `now`, replacing any earlier deadline.
    pub fn text_edited(&mut self, now: Instant) -> Instant {
        let deadline = now + self.window;
        if self.deadline.replace(deadline).is_some() {
            tracing::debug!(window_ms = self.window.as_millis() as u64, "text debounce rescheduled");
        }
        deadline
    }

    /// True when a pending deadline has passed. Leaves it pending.
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    /// Consume the pending deadline if it has passed. True means render now.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                tracing::debug!("text debounce expired");
                true
            }
            _ => false,
        }
    }

    /// Fold a pending text render into an immediate one. Returns whether one was pending.
    pub fn coalesce(&mut self) -> bool {
        let had = self.deadline.take().is_some();
        if had {
            tracing::debug!("pending text render coalesced");
        }
        had
    }

    /// Drop any pending text render.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/scheduler.rs"]
mod tests;
