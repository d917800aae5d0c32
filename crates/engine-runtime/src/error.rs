use engine_core::error::{LimiterError, PartitionError};
use thiserror::Error;

/// Top-level errors for a comparison run.
///
/// Fetch failures are not in here: they end the affected side of a range
/// and are reported through the incomplete-range list instead.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The key space could not be partitioned.
    #[error("Partition error: {0}")]
    Partition(#[from] PartitionError),

    /// The throughput limiter could not be built.
    #[error("Rate limiter error: {0}")]
    Limiter(#[from] LimiterError),

    /// A task was enqueued after the queue had been closed, or after every
    /// worker had exited.
    #[error("Task queue closed")]
    QueueClosed,

    /// An error occurred while joining a worker.
    /// This usually indicates that the worker panicked.
    #[error("Worker join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
