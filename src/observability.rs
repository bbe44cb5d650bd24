//! Logging setup and in-process counters

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Honours `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    jobs_submitted: AtomicU64,
    jobs_retrieved: AtomicU64,
    jobs_expired: AtomicU64,
    jobs_missing: AtomicU64,
    qr_rendered: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job_submitted(&self) {
        self.jobs_submitted.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "jobs_submitted", "Metric incremented");
    }

    pub fn job_retrieved(&self) {
        self.jobs_retrieved.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "jobs_retrieved", "Metric incremented");
    }

    pub fn job_expired(&self) {
        self.jobs_expired.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "jobs_expired", "Metric incremented");
    }

    pub fn job_missing(&self) {
        self.jobs_missing.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "jobs_missing", "Metric incremented");
    }

    pub fn qr_rendered(&self, count: u64) {
        self.qr_rendered.fetch_add(count, Ordering::Relaxed);
        tracing::debug!(counter = "qr_rendered", count, "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            jobs_submitted: self.jobs_submitted.load(Ordering::Relaxed),
            jobs_retrieved: self.jobs_retrieved.load(Ordering::Relaxed),
            jobs_expired: self.jobs_expired.load(Ordering::Relaxed),
            jobs_missing: self.jobs_missing.load(Ordering::Relaxed),
            qr_rendered: self.qr_rendered.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub jobs_submitted: u64,
    pub jobs_retrieved: u64,
    pub jobs_expired: u64,
    pub jobs_missing: u64,
    pub qr_rendered: u64,
}
