//! Global atomic counters for executor observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (e.g. at daemon shutdown).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters, lock-free.
pub struct Metrics {
    runs_started: AtomicU64,
    runs_timed_out: AtomicU64,
    runs_faulted: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            runs_started: AtomicU64::new(0),
            runs_timed_out: AtomicU64::new(0),
            runs_faulted: AtomicU64::new(0),
        }
    }

    /// Increment the runs-started counter by one.
    pub fn inc_runs_started(&self) {
        self.runs_started.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "runs_started", "counter incremented");
    }

    /// Increment the runs-timed-out counter by one.
    pub fn inc_timeouts(&self) {
        self.runs_timed_out.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "runs_timed_out", "counter incremented");
    }

    /// Increment the runs-faulted counter by one.
    pub fn inc_faults(&self) {
        self.runs_faulted.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "runs_faulted", "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            runs_started = self.runs_started(),
            runs_timed_out = self.runs_timed_out(),
            runs_faulted = self.runs_faulted(),
        );
    }

    pub fn runs_started(&self) -> u64 {
        self.runs_started.load(Ordering::Relaxed)
    }

    pub fn runs_timed_out(&self) -> u64 {
        self.runs_timed_out.load(Ordering::Relaxed)
    }

    pub fn runs_faulted(&self) -> u64 {
        self.runs_faulted.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.runs_started.store(0, Ordering::Relaxed);
        self.runs_timed_out.store(0, Ordering::Relaxed);
        self.runs_faulted.store(0, Ordering::Relaxed);
    }
}
