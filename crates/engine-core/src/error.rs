use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PartitionError {
    #[error("Split count must be at least 1, got {0}")]
    InvalidSplitCount(usize),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LimiterError {
    #[error("Rate limit must be at least 1 row per second, got {0}")]
    InvalidRate(u32),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("Unknown key mode: {0} (expected 'values' or 'named')")]
    UnknownMode(String),
}
