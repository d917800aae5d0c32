use engine_core::metrics::MetricsSnapshot;
use model::core::range::KeyRange;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

/// Final outcome of a comparison run.
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
pub struct SummaryReport {
    pub missing_in_source: u64,
    pub missing_in_target: u64,
    pub total_source_read: u64,
    pub total_target_read: u64,
    pub ranges_scanned: u64,
    /// Ranges where at least one side stopped on an error; their mismatch
    /// counts may be under-reported.
    pub incomplete_ranges: Vec<KeyRange>,
    pub elapsed_ms: u64,
    pub rows_per_second: f64,
}

impl SummaryReport {
    pub fn new(
        snapshot: MetricsSnapshot,
        incomplete_ranges: Vec<KeyRange>,
        elapsed: Duration,
    ) -> Self {
        let total_read = snapshot.total_source_read + snapshot.total_target_read;
        let secs = elapsed.as_secs_f64();
        let rows_per_second = if secs > 0.0 {
            total_read as f64 / secs
        } else {
            0.0
        };

        SummaryReport {
            missing_in_source: snapshot.missing_in_source,
            missing_in_target: snapshot.missing_in_target,
            total_source_read: snapshot.total_source_read,
            total_target_read: snapshot.total_target_read,
            ranges_scanned: snapshot.ranges_scanned,
            incomplete_ranges,
            elapsed_ms: elapsed.as_millis() as u64,
            rows_per_second,
        }
    }

    pub fn has_mismatches(&self) -> bool {
        self.missing_in_source > 0 || self.missing_in_target > 0
    }

    pub fn is_complete(&self) -> bool {
        self.incomplete_ranges.is_empty()
    }

    /// Emits the end-of-run banner.
    pub fn log(&self) {
        info!("========================================");
        info!("Missing in source: {}", self.missing_in_source);
        info!("Missing in target: {}", self.missing_in_target);
        info!("Total source keys read: {}", self.total_source_read);
        info!("Total target keys read: {}", self.total_target_read);
        info!(
            "Ranges scanned: {} in {} ms ({:.1} rows/s)",
            self.ranges_scanned, self.elapsed_ms, self.rows_per_second
        );
        if !self.is_complete() {
            warn!(
                "Incomplete ranges: {} (mismatch counts may be under-reported)",
                self.incomplete_ranges.len()
            );
            for range in &self.incomplete_ranges {
                warn!("  incomplete range {range}");
            }
        }
        info!("========================================");
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> MetricsSnapshot {
        MetricsSnapshot {
            missing_in_source: 1,
            missing_in_target: 0,
            total_source_read: 60,
            total_target_read: 40,
            ranges_scanned: 4,
            incomplete_ranges: 0,
        }
    }

    #[test]
    fn test_throughput() {
        let report = SummaryReport::new(snapshot(), Vec::new(), Duration::from_secs(2));
        assert_eq!(report.elapsed_ms, 2000);
        assert!((report.rows_per_second - 50.0).abs() < f64::EPSILON);
        assert!(report.has_mismatches());
        assert!(report.is_complete());
    }

    #[test]
    fn test_zero_elapsed() {
        let report = SummaryReport::new(snapshot(), Vec::new(), Duration::ZERO);
        assert_eq!(report.rows_per_second, 0.0);
    }

    #[test]
    fn test_json_lists_incomplete_ranges() {
        let range = KeyRange::new(-10, 10).unwrap();
        let report = SummaryReport::new(snapshot(), vec![range], Duration::from_millis(5));
        assert!(!report.is_complete());

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["missing_in_source"], 1);
        assert_eq!(json["incomplete_ranges"][0]["min"], -10);
        assert_eq!(json["incomplete_ranges"][0]["max"], 10);
    }
}
