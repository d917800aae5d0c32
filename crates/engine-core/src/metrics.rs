use serde::Serialize;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// Process-wide scan counters. Every field is updated with atomic adds only,
/// so workers can share one handle without further locking.
#[derive(Debug, Default)]
struct InnerMetrics {
    missing_in_source: AtomicU64,
    missing_in_target: AtomicU64,
    total_source_read: AtomicU64,
    total_target_read: AtomicU64,
    ranges_scanned: AtomicU64,
    incomplete_ranges: AtomicU64,
}

#[derive(Debug, Clone)]
pub struct ScanMetrics {
    inner: Arc<InnerMetrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub missing_in_source: u64,
    pub missing_in_target: u64,
    pub total_source_read: u64,
    pub total_target_read: u64,
    pub ranges_scanned: u64,
    pub incomplete_ranges: u64,
}

impl ScanMetrics {
    pub fn new() -> Self {
        ScanMetrics {
            inner: Arc::new(InnerMetrics::default()),
        }
    }

    pub fn increment_missing_in_source(&self, count: u64) {
        self.inner
            .missing_in_source
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_missing_in_target(&self, count: u64) {
        self.inner
            .missing_in_target
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_source_read(&self, count: u64) {
        self.inner
            .total_source_read
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_target_read(&self, count: u64) {
        self.inner
            .total_target_read
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_ranges(&self, count: u64) {
        self.inner
            .ranges_scanned
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_incomplete(&self, count: u64) {
        self.inner
            .incomplete_ranges
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            missing_in_source: self.inner.missing_in_source.load(Ordering::Relaxed),
            missing_in_target: self.inner.missing_in_target.load(Ordering::Relaxed),
            total_source_read: self.inner.total_source_read.load(Ordering::Relaxed),
            total_target_read: self.inner.total_target_read.load(Ordering::Relaxed),
            ranges_scanned: self.inner.ranges_scanned.load(Ordering::Relaxed),
            incomplete_ranges: self.inner.incomplete_ranges.load(Ordering::Relaxed),
        }
    }
}

impl Default for ScanMetrics {
    fn default() -> Self {
        Self::new()
    }
}
