//! Elapsed-time stopwatch for a session.
//!
//! Time is always `now - start` from a captured instant; ticks only trigger a
//! redraw and are never counted, so a late or skipped tick cannot drift the clock.

/// Stopwatch over millisecond timestamps (`performance.now()` in the browser).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stopwatch {
    start_ms: f64,
    stopped_ms: Option<f64>,
}

impl Stopwatch {
    pub fn start(now_ms: f64) -> Self {
        Self { start_ms: now_ms, stopped_ms: None }
    }

    /// Whole seconds elapsed, frozen once stopped.
    pub fn elapsed_secs(&self, now_ms: f64) -> u64 {
        let end = self.stopped_ms.unwrap_or(now_ms);
        ((end - self.start_ms) / 1000.0).floor().max(0.0) as u64
    }

    /// Single-shot: returns `true` only on the first call.
    pub fn stop(&mut self, now_ms: f64) -> bool {
        if self.stopped_ms.is_some() {
            return false;
        }
        self.stopped_ms = Some(now_ms);
        true
    }

    pub fn is_running(&self) -> bool {
        self.stopped_ms.is_none()
    }
}

/// `M:SS`, minutes unpadded, no hour rollover.
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
