#[cfg(test)]
mod tests {
    use crate::execution::scanner::DualRangeScanner;
    use connectors::{
        executor::QueryExecutor,
        memory::{FaultKind, MemoryExecutor},
    };
    use engine_config::settings::ScanSettings;
    use engine_core::{canonical::CanonicalMode, limiter::ThroughputLimiter, metrics::ScanMetrics};
    use model::{
        core::{range::KeyRange, value::Value},
        records::{key::RowKey, row::Row},
    };
    use std::{sync::Arc, time::Duration};
    use tokio::time::Instant;

    const QUERY: &str = "SELECT * FROM ks.t WHERE token(id) > ? AND token(id) <= ?";

    fn row(id: i64, val: &str) -> Row {
        [("val", Value::from(val)), ("id", Value::Int(id))]
            .into_iter()
            .collect()
    }

    fn scanner(
        source: MemoryExecutor,
        target: MemoryExecutor,
        rate: u32,
        metrics: ScanMetrics,
    ) -> DualRangeScanner {
        let settings = ScanSettings::builder(QUERY)
            .rate_limit(rate)
            .build()
            .unwrap();
        let source: Arc<dyn QueryExecutor> = Arc::new(source);
        let target: Arc<dyn QueryExecutor> = Arc::new(target);
        let limiter = Arc::new(ThroughputLimiter::new(rate).unwrap());
        DualRangeScanner::new(&settings, source, target, limiter, metrics)
    }

    #[tokio::test]
    async fn test_collects_keys_from_both_sides() {
        let source = MemoryExecutor::new("source", vec![(1, row(1, "x")), (2, row(2, "y"))]);
        let target = MemoryExecutor::new("target", vec![(1, row(1, "x"))]);
        let metrics = ScanMetrics::new();

        let result = scanner(source, target, 100_000, metrics.clone())
            .scan(KeyRange::full())
            .await;

        assert!(result.is_complete());
        assert_eq!(result.source_keys.len(), 2);
        assert!(result.source_keys.contains(&RowKey::from("1 x")));
        assert!(result.source_keys.contains(&RowKey::from("2 y")));
        assert_eq!(result.target_keys.len(), 1);

        let snap = metrics.snapshot();
        assert_eq!(snap.total_source_read, 2);
        assert_eq!(snap.total_target_read, 1);
    }

    #[tokio::test]
    async fn test_only_rows_inside_bounds_are_read() {
        let source = MemoryExecutor::new("source", vec![(-5, row(1, "a")), (5, row(2, "b"))]);
        let target = MemoryExecutor::new("target", vec![(5, row(2, "b"))]);

        let result = scanner(source, target, 100_000, ScanMetrics::new())
            .scan(KeyRange::new(0, 10).unwrap())
            .await;

        assert_eq!(result.source_keys, result.target_keys);
    }

    #[tokio::test(start_paused = true)]
    async fn test_limiter_is_taken_per_fetch_attempt() {
        let source = MemoryExecutor::new(
            "source",
            vec![(1, row(1, "a")), (2, row(2, "b")), (3, row(3, "c"))],
        );
        let target = MemoryExecutor::new("target", vec![(1, row(1, "a"))]);

        let start = Instant::now();
        scanner(source, target, 10, ScanMetrics::new())
            .scan(KeyRange::full())
            .await;

        // Source: 3 rows + end-of-data = 4 attempts; target: 1 row + end = 2.
        // Six admissions at 10/s, the first one free.
        assert_eq!(start.elapsed(), Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_page_failure_marks_side_incomplete() {
        let source = MemoryExecutor::new("source", vec![(1, row(1, "a")), (2, row(2, "b"))]);
        let target = MemoryExecutor::new("target", vec![(1, row(1, "a")), (2, row(2, "b"))])
            .with_fault(1, FaultKind::AfterRows(1));
        let metrics = ScanMetrics::new();

        let result = scanner(source, target, 100_000, metrics.clone())
            .scan(KeyRange::full())
            .await;

        assert!(result.source_complete);
        assert!(!result.target_complete);
        // What was fetched before the failure is kept.
        assert_eq!(result.target_keys.len(), 1);
        assert_eq!(result.source_keys.len(), 2);
        assert_eq!(metrics.snapshot().total_target_read, 1);
    }

    #[tokio::test]
    async fn test_open_failure_still_drains_other_side() {
        let source = MemoryExecutor::new("source", vec![(1, row(1, "a"))])
            .with_fault(1, FaultKind::OnOpen);
        let target = MemoryExecutor::new("target", vec![(1, row(1, "a")), (2, row(2, "b"))]);

        let result = scanner(source, target, 100_000, ScanMetrics::new())
            .scan(KeyRange::full())
            .await;

        assert!(!result.source_complete);
        assert!(result.target_complete);
        assert!(result.source_keys.is_empty());
        assert_eq!(result.target_keys.len(), 2);
    }

    #[tokio::test]
    async fn test_named_key_mode() {
        let settings = ScanSettings::builder(QUERY)
            .key_mode(CanonicalMode::NamedPairs)
            .build()
            .unwrap();
        let source: Arc<dyn QueryExecutor> =
            Arc::new(MemoryExecutor::new("source", vec![(1, row(1, "a"))]));
        let target: Arc<dyn QueryExecutor> = Arc::new(MemoryExecutor::new("target", Vec::new()));
        let limiter = Arc::new(ThroughputLimiter::new(1000).unwrap());

        let result = DualRangeScanner::new(&settings, source, target, limiter, ScanMetrics::new())
            .scan(KeyRange::full())
            .await;

        assert!(result.source_keys.contains(&RowKey::from("id=1 val=a")));
    }
}
