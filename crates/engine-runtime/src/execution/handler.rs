use crate::execution::{pool::TaskHandler, scanner::DualRangeScanner};
use async_trait::async_trait;
use engine_core::diff::{DiffAggregator, RangeTally};
use model::execution::task::ScanTask;
use tracing::{Instrument, debug, info, info_span, warn};

/// What a worker hands back for each completed task.
#[derive(Debug, Clone, Copy)]
pub struct RangeOutcome {
    pub task: ScanTask,
    pub tally: RangeTally,
}

/// Scans a range on both clusters and folds its diff into the totals.
pub struct RangeScanHandler {
    scanner: DualRangeScanner,
    aggregator: DiffAggregator,
}

impl RangeScanHandler {
    pub fn new(scanner: DualRangeScanner, aggregator: DiffAggregator) -> Self {
        Self {
            scanner,
            aggregator,
        }
    }
}

#[async_trait]
impl TaskHandler<ScanTask> for RangeScanHandler {
    type Output = RangeOutcome;

    async fn handle(&self, worker_id: usize, task: ScanTask) -> RangeOutcome {
        let span = info_span!("scan", worker = worker_id, range = %task.bounds);

        async {
            info!(
                "Scanning records in range min: {}, max: {}",
                task.bounds.min, task.bounds.max
            );

            let result = self.scanner.scan(task.bounds).await;
            let tally = self.aggregator.fold(result);

            if !tally.complete {
                warn!("Scan incomplete, mismatches may be under-reported");
            }
            debug!(
                range_id = task.range_id,
                source_keys = tally.source_keys,
                target_keys = tally.target_keys,
                missing_in_source = tally.missing_in_source,
                missing_in_target = tally.missing_in_target,
                "Range finished"
            );

            RangeOutcome { task, tally }
        }
        .instrument(span)
        .await
    }
}
