use crate::metrics::ScanMetrics;
use model::records::key::RowKey;
use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

/// Keys collected from both clusters for one sub-range. Owned by the task
/// scanning that range and dropped once diffed.
#[derive(Debug, Default)]
pub struct RangeResult {
    pub source_keys: HashSet<RowKey>,
    pub target_keys: HashSet<RowKey>,
    /// False when the source side stopped on an error instead of end-of-data.
    pub source_complete: bool,
    /// False when the target side stopped on an error instead of end-of-data.
    pub target_complete: bool,
}

impl RangeResult {
    pub fn new() -> Self {
        Self {
            source_complete: true,
            target_complete: true,
            ..Default::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.source_complete && self.target_complete
    }

    /// Symmetric difference of the two key sets, each side sorted.
    pub fn diff(&self) -> RangeDiff {
        let mut missing_in_target: Vec<RowKey> = self
            .source_keys
            .difference(&self.target_keys)
            .cloned()
            .collect();
        let mut missing_in_source: Vec<RowKey> = self
            .target_keys
            .difference(&self.source_keys)
            .cloned()
            .collect();
        missing_in_target.sort();
        missing_in_source.sort();

        RangeDiff {
            missing_in_target,
            missing_in_source,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RangeDiff {
    /// Present in the source scan, absent from the target scan.
    pub missing_in_target: Vec<RowKey>,
    /// Present in the target scan, absent from the source scan.
    pub missing_in_source: Vec<RowKey>,
}

impl RangeDiff {
    pub fn is_empty(&self) -> bool {
        self.missing_in_target.is_empty() && self.missing_in_source.is_empty()
    }
}

/// Per-range counts handed back to the caller after folding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeTally {
    pub source_keys: u64,
    pub target_keys: u64,
    pub missing_in_source: u64,
    pub missing_in_target: u64,
    pub complete: bool,
}

/// Diffs per-range results and folds the counts into the shared metrics.
///
/// Missing keys are logged as they are found; callers run this inside a span
/// that identifies the worker and the range.
#[derive(Debug, Clone)]
pub struct DiffAggregator {
    metrics: ScanMetrics,
}

impl DiffAggregator {
    pub fn new(metrics: ScanMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    pub fn fold(&self, result: RangeResult) -> RangeTally {
        let diff = result.diff();

        for key in &diff.missing_in_target {
            warn!(key = %key, "Missing in target");
        }
        for key in &diff.missing_in_source {
            warn!(key = %key, "Missing in source");
        }

        let tally = RangeTally {
            source_keys: result.source_keys.len() as u64,
            target_keys: result.target_keys.len() as u64,
            missing_in_source: diff.missing_in_source.len() as u64,
            missing_in_target: diff.missing_in_target.len() as u64,
            complete: result.is_complete(),
        };

        self.metrics
            .increment_missing_in_target(tally.missing_in_target);
        self.metrics
            .increment_missing_in_source(tally.missing_in_source);
        self.metrics.increment_ranges(1);
        if !tally.complete {
            self.metrics.increment_incomplete(1);
        }

        tally
    }
}
