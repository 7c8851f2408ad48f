use std::time::{Duration, Instant};

/// Stopwatch that accumulates running time across start/stop cycles.
///
/// Every transition takes the current instant from the caller and returns a
/// new value, so the timer never reads the clock on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting an already running timer keeps the original start point.
    pub fn start(self, now: Instant) -> Self {
        if self.started_at.is_some() {
            return self;
        }
        Self {
            started_at: Some(now),
            ..self
        }
    }

    pub fn stop(self, now: Instant) -> Self {
        match self.started_at {
            Some(start) => Self {
                started_at: None,
                accumulated: self.accumulated + now.saturating_duration_since(start),
            },
            None => self,
        }
    }

    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Accumulated time plus the current interval when running.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(start) => self.accumulated + now.saturating_duration_since(start),
            None => self.accumulated,
        }
    }
}
