//! Review request metrics.
//!
//! Counts what happens to AI review requests over the life of the process:
//! how many were issued, how many resolved successfully or with an error, and
//! how many responses arrived after their detail view was gone and were
//! dropped.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

#[derive(Debug, Default)]
pub struct ReviewMetrics {
    requests: AtomicUsize,
    successes: AtomicUsize,
    failures: AtomicUsize,
    stale_discards: AtomicUsize,
}

static METRICS: OnceLock<ReviewMetrics> = OnceLock::new();

impl ReviewMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide instance used by the directory controller.
    pub fn global() -> &'static ReviewMetrics {
        METRICS.get_or_init(ReviewMetrics::new)
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_discard(&self) {
        self.stale_discards.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn stale_discards(&self) -> usize {
        self.stale_discards.load(Ordering::Relaxed)
    }

    pub fn report(&self) -> MetricsReport {
        let requests = self.requests();
        let successes = self.successes();
        let failures = self.failures();
        let resolved = successes + failures;
        let success_rate = if resolved > 0 {
            (successes as f64 / resolved as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            requests,
            successes,
            failures,
            stale_discards: self.stale_discards(),
            success_rate,
        }
    }
}

/// Snapshot of the review counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub requests: usize,
    pub successes: usize,
    pub failures: usize,

    /// Responses dropped because their detail view had been closed or replaced
    pub stale_discards: usize,

    /// Successful share of applied responses, as a percentage (0-100)
    pub success_rate: f64,
}
