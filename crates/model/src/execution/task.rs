use crate::core::range::KeyRange;
use serde::{Deserialize, Serialize};

/// One unit of scan work: a single sub-range to compare on both clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTask {
    pub range_id: usize,
    pub bounds: KeyRange,
}

impl ScanTask {
    pub fn new(range_id: usize, bounds: KeyRange) -> Self {
        Self { range_id, bounds }
    }
}
