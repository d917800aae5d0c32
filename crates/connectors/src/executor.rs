use crate::error::FetchError;
use async_trait::async_trait;
use model::records::row::Row;
use std::fmt::Debug;

/// Something able to run the parameterized scan query against one cluster.
///
/// The query text is opaque here: it takes exactly two positional
/// parameters, bound to a sub-range's `min` and `max`.
#[async_trait]
pub trait QueryExecutor: Debug + Send + Sync {
    /// Label used in logs and errors ("source", "target", a host list...).
    fn name(&self) -> &str;

    /// Starts the query and returns a paginated row iterator.
    async fn execute(
        &self,
        query: &str,
        min: i64,
        max: i64,
    ) -> Result<Box<dyn RowStream>, FetchError>;
}

/// Paginated row iterator returned by [`QueryExecutor::execute`].
#[async_trait]
pub trait RowStream: Send {
    /// `Ok(None)` means the result set is exhausted. Errors are never folded
    /// into `Ok(None)`.
    async fn next_row(&mut self) -> Result<Option<Row>, FetchError>;
}
