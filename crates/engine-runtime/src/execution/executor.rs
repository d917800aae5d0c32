use crate::{
    error::ScanError,
    execution::{
        handler::{RangeOutcome, RangeScanHandler},
        pool::WorkerPool,
        scanner::DualRangeScanner,
    },
};
use connectors::executor::QueryExecutor;
use engine_config::{report::summary::SummaryReport, settings::ScanSettings};
use engine_core::{
    diff::DiffAggregator, limiter::ThroughputLimiter, metrics::ScanMetrics, partition::key_ranges,
};
use model::{core::range::KeyRange, execution::task::ScanTask};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info};

/// Runs a full comparison: partitions the token space, scans every range on
/// a worker pool and returns the aggregated report once all workers are done.
pub async fn run(
    settings: Arc<ScanSettings>,
    source: Arc<dyn QueryExecutor>,
    target: Arc<dyn QueryExecutor>,
) -> Result<SummaryReport, ScanError> {
    let start = Instant::now();
    info!(
        source = source.name(),
        target = target.name(),
        splits = settings.split_count,
        workers = settings.workers,
        rate_limit = settings.rate_limit,
        "Starting scan..."
    );

    let metrics = ScanMetrics::new();
    let limiter = Arc::new(ThroughputLimiter::new(settings.rate_limit)?);
    let scanner = DualRangeScanner::new(&settings, source, target, limiter, metrics.clone());
    let handler = RangeScanHandler::new(scanner, DiffAggregator::new(metrics.clone()));

    let ranges = key_ranges(settings.split_count)?;
    debug!(count = ranges.len(), "Ranges computed");

    let mut pool = WorkerPool::new(settings.workers, settings.queue_capacity(), handler);
    pool.run();

    let queued = enqueue_ranges(&pool, ranges).await;
    // Dead workers close the queue early; their join error takes precedence.
    let outcomes = pool.wait().await?;
    queued?;
    let report = SummaryReport::new(
        metrics.snapshot(),
        incomplete_ranges(&outcomes),
        start.elapsed(),
    );

    info!(ranges = outcomes.len(), "Scan completed");
    Ok(report)
}

async fn enqueue_ranges(
    pool: &WorkerPool<ScanTask, RangeScanHandler>,
    ranges: Vec<KeyRange>,
) -> Result<(), ScanError> {
    for (range_id, bounds) in ranges.into_iter().enumerate() {
        pool.enqueue(ScanTask::new(range_id, bounds)).await?;
    }
    pool.stop().await
}

fn incomplete_ranges(outcomes: &[RangeOutcome]) -> Vec<KeyRange> {
    let mut ranges: Vec<KeyRange> = outcomes
        .iter()
        .filter(|outcome| !outcome.tally.complete)
        .map(|outcome| outcome.task.bounds)
        .collect();
    ranges.sort_by_key(|range| range.min);
    ranges
}
