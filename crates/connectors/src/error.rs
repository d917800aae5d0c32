use thiserror::Error;

/// Errors surfaced by query executors and their row streams.
///
/// A row stream never reports a failure as end-of-data: any error is
/// returned through this type so the scanner can mark the range incomplete.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Failed to establish a session with the cluster.
    #[error("Connection error for '{cluster}': {message}")]
    Connection { cluster: String, message: String },

    /// The query could not be started.
    #[error("Query failed on '{cluster}': {message}")]
    Query { cluster: String, message: String },

    /// Fetching the next page of an open query failed.
    #[error("Page fetch failed on '{cluster}' after {rows_read} rows: {message}")]
    Page {
        cluster: String,
        rows_read: u64,
        message: String,
    },

    /// A row could not be decoded into the row model.
    #[error("Failed to decode row from '{cluster}': {message}")]
    Decode { cluster: String, message: String },

    /// Reading a fixture file failed.
    #[error("Fixture error: {0}")]
    Fixture(#[from] std::io::Error),

    /// A fixture file did not contain the expected JSON layout.
    #[error("Invalid fixture: {0}")]
    InvalidFixture(#[from] serde_json::Error),
}
