use std::time::{Duration, Instant};

/// Logs the time between its creation and drop at `info` level.
#[must_use = "the duration is logged when the guard is dropped"]
pub struct LogDuration {
    label: String,
    start: Instant,
}

impl LogDuration {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), start: Instant::now() }
    }

    pub fn elapsed(&self) -> Duration { self.start.elapsed() }
}

impl Drop for LogDuration {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        tracing::info!(label = %self.label, elapsed_ms = elapsed.as_secs_f64() * 1000.0, "operation finished");
    }
}

/// Time the rest of the enclosing scope.
#[macro_export]
macro_rules! log_duration {
    ($label:expr) => {
        let _log_duration_guard = $crate::LogDuration::new($label);
    };
}
