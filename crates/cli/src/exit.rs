use engine_config::report::summary::SummaryReport;

/// Process outcome of a completed scan. Errors never get here: `main`
/// returns them and the process exits with code 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every range completed (mismatches allowed unless asked otherwise).
    Success,
    /// At least one range stopped early on a fetch error.
    Incomplete,
    /// Missing keys were found and `--fail-on-mismatch` was given.
    Mismatch,
}

impl RunStatus {
    pub fn from_report(report: &SummaryReport, fail_on_mismatch: bool) -> Self {
        if !report.is_complete() {
            RunStatus::Incomplete
        } else if fail_on_mismatch && report.has_mismatches() {
            RunStatus::Mismatch
        } else {
            RunStatus::Success
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            RunStatus::Success => 0,
            RunStatus::Incomplete => 2,
            RunStatus::Mismatch => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::range::KeyRange;

    #[test]
    fn test_status_codes() {
        let clean = SummaryReport::default();
        assert_eq!(RunStatus::from_report(&clean, true), RunStatus::Success);

        let mismatched = SummaryReport {
            missing_in_target: 3,
            ..SummaryReport::default()
        };
        assert_eq!(
            RunStatus::from_report(&mismatched, false),
            RunStatus::Success
        );
        assert_eq!(RunStatus::from_report(&mismatched, true).code(), 3);

        let incomplete = SummaryReport {
            missing_in_target: 3,
            incomplete_ranges: vec![KeyRange::full()],
            ..SummaryReport::default()
        };
        assert_eq!(
            RunStatus::from_report(&incomplete, true),
            RunStatus::Incomplete
        );
        assert_eq!(RunStatus::Incomplete.code(), 2);
    }
}
