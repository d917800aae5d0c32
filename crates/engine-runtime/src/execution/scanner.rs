use connectors::executor::{QueryExecutor, RowStream};
use engine_config::settings::ScanSettings;
use engine_core::{
    canonical::KeyCanonicalizer, diff::RangeResult, limiter::ThroughputLimiter,
    metrics::ScanMetrics,
};
use model::{core::range::KeyRange, records::key::RowKey};
use std::{collections::HashSet, fmt, sync::Arc};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => f.write_str("source"),
            Side::Target => f.write_str("target"),
        }
    }
}

/// Progress of one side of a range scan.
struct SideScan {
    side: Side,
    stream: Option<Box<dyn RowStream>>,
    keys: HashSet<RowKey>,
    exhausted: bool,
    complete: bool,
}

impl SideScan {
    fn open(side: Side, stream: Box<dyn RowStream>) -> Self {
        Self {
            side,
            stream: Some(stream),
            keys: HashSet::new(),
            exhausted: false,
            complete: true,
        }
    }

    fn failed(side: Side) -> Self {
        Self {
            side,
            stream: None,
            keys: HashSet::new(),
            exhausted: true,
            complete: false,
        }
    }
}

/// Drains one sub-range from both clusters and collects each side's keys.
///
/// Both iterators are advanced alternately inside the calling task; no extra
/// tasks are spawned. Every fetch attempt first passes the shared limiter.
pub struct DualRangeScanner {
    source: Arc<dyn QueryExecutor>,
    target: Arc<dyn QueryExecutor>,
    limiter: Arc<ThroughputLimiter>,
    canonicalizer: KeyCanonicalizer,
    metrics: ScanMetrics,
    query: Arc<str>,
}

impl DualRangeScanner {
    pub fn new(
        settings: &ScanSettings,
        source: Arc<dyn QueryExecutor>,
        target: Arc<dyn QueryExecutor>,
        limiter: Arc<ThroughputLimiter>,
        metrics: ScanMetrics,
    ) -> Self {
        Self {
            source,
            target,
            limiter,
            canonicalizer: KeyCanonicalizer::new(settings.key_mode),
            metrics,
            query: Arc::from(settings.query_template.as_str()),
        }
    }

    pub async fn scan(&self, bounds: KeyRange) -> RangeResult {
        let mut source = self.open(Side::Source, bounds).await;
        let mut target = self.open(Side::Target, bounds).await;

        while !(source.exhausted && target.exhausted) {
            if !source.exhausted {
                self.limiter.take().await;
                self.advance(&mut source).await;
            }
            if !target.exhausted {
                self.limiter.take().await;
                self.advance(&mut target).await;
            }
        }

        debug!(
            source_keys = source.keys.len(),
            target_keys = target.keys.len(),
            "Range drained"
        );

        RangeResult {
            source_keys: source.keys,
            target_keys: target.keys,
            source_complete: source.complete,
            target_complete: target.complete,
        }
    }

    async fn open(&self, side: Side, bounds: KeyRange) -> SideScan {
        let executor = match side {
            Side::Source => &self.source,
            Side::Target => &self.target,
        };

        match executor.execute(&self.query, bounds.min, bounds.max).await {
            Ok(stream) => SideScan::open(side, stream),
            Err(err) => {
                warn!(%side, error = %err, "Failed to start range query, side marked incomplete");
                SideScan::failed(side)
            }
        }
    }

    async fn advance(&self, scan: &mut SideScan) {
        let Some(stream) = scan.stream.as_mut() else {
            scan.exhausted = true;
            return;
        };

        match stream.next_row().await {
            Ok(Some(row)) => {
                scan.keys.insert(self.canonicalizer.canonicalize(&row));
                match scan.side {
                    Side::Source => self.metrics.increment_source_read(1),
                    Side::Target => self.metrics.increment_target_read(1),
                }
            }
            Ok(None) => {
                scan.exhausted = true;
                scan.stream = None;
            }
            Err(err) => {
                warn!(side = %scan.side, error = %err, "Fetch failed, side marked incomplete");
                scan.exhausted = true;
                scan.complete = false;
                scan.stream = None;
            }
        }
    }
}
