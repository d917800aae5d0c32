use crate::{
    error::FetchError,
    executor::{QueryExecutor, RowStream},
};
use async_trait::async_trait;
use model::{core::range::KeyRange, records::row::Row};
use std::{
    collections::VecDeque,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};
use tracing::debug;

/// Injected failure used to exercise the incomplete-scan paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// `execute` itself fails.
    OnOpen,
    /// The stream fails after yielding this many rows.
    AfterRows(usize),
}

#[derive(Debug, Clone, Copy)]
struct Fault {
    token: i64,
    kind: FaultKind,
}

/// Executor over an in-memory token-ordered table.
///
/// Rows are tagged with their partition token and served for any query whose
/// `(min, max)` range contains the token. The query text is ignored.
#[derive(Debug, Clone)]
pub struct MemoryExecutor {
    name: String,
    entries: Arc<Vec<(i64, Row)>>,
    page_size: usize,
    fault: Option<Fault>,
    queries: Arc<AtomicUsize>,
}

impl MemoryExecutor {
    pub fn new(name: impl Into<String>, entries: Vec<(i64, Row)>) -> Self {
        let mut entries = entries;
        entries.sort_by_key(|(token, _)| *token);
        Self {
            name: name.into(),
            entries: Arc::new(entries),
            page_size: 1000,
            fault: None,
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Fail any query whose range contains `token`.
    pub fn with_fault(mut self, token: i64, kind: FaultKind) -> Self {
        self.fault = Some(Fault { token, kind });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of `execute` calls served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryExecutor for MemoryExecutor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(
        &self,
        _query: &str,
        min: i64,
        max: i64,
    ) -> Result<Box<dyn RowStream>, FetchError> {
        self.queries.fetch_add(1, Ordering::SeqCst);

        let bounds = KeyRange::new(min, max).map_err(|err| FetchError::Query {
            cluster: self.name.clone(),
            message: err.to_string(),
        })?;

        let mut fail_after = None;
        if let Some(fault) = self.fault
            && bounds.contains(fault.token)
        {
            match fault.kind {
                FaultKind::OnOpen => {
                    return Err(FetchError::Query {
                        cluster: self.name.clone(),
                        message: format!("injected failure for range {bounds}"),
                    });
                }
                FaultKind::AfterRows(rows) => fail_after = Some(rows),
            }
        }

        let entries = &self.entries;
        let position = entries.partition_point(|(token, _)| *token < bounds.min);
        debug!(cluster = %self.name, range = %bounds, position, "Opening in-memory scan");

        Ok(Box::new(MemoryRowStream {
            cluster: self.name.clone(),
            entries: self.entries.clone(),
            bounds,
            position,
            page: VecDeque::with_capacity(self.page_size),
            page_size: self.page_size,
            rows_read: 0,
            fail_after,
            exhausted: false,
        }))
    }
}

struct MemoryRowStream {
    cluster: String,
    entries: Arc<Vec<(i64, Row)>>,
    bounds: KeyRange,
    position: usize,
    page: VecDeque<Row>,
    page_size: usize,
    rows_read: u64,
    fail_after: Option<usize>,
    exhausted: bool,
}

impl MemoryRowStream {
    fn fill_page(&mut self) {
        while self.page.len() < self.page_size {
            let Some((token, row)) = self.entries.get(self.position) else {
                self.exhausted = true;
                return;
            };
            if *token > self.bounds.max {
                self.exhausted = true;
                return;
            }
            if self.bounds.contains(*token) {
                self.page.push_back(row.clone());
            }
            self.position += 1;
        }
    }
}

#[async_trait]
impl RowStream for MemoryRowStream {
    async fn next_row(&mut self) -> Result<Option<Row>, FetchError> {
        if let Some(limit) = self.fail_after
            && self.rows_read >= limit as u64
        {
            return Err(FetchError::Page {
                cluster: self.cluster.clone(),
                rows_read: self.rows_read,
                message: "injected page failure".to_string(),
            });
        }

        if self.page.is_empty() && !self.exhausted {
            self.fill_page();
        }

        let row = self.page.pop_front();
        if row.is_some() {
            self.rows_read += 1;
        }
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::value::Value;

    fn row(id: i64) -> Row {
        [("id", Value::Int(id))].into_iter().collect()
    }

    async fn drain(stream: &mut Box<dyn RowStream>) -> Vec<i64> {
        let mut ids = Vec::new();
        while let Some(row) = stream.next_row().await.unwrap() {
            ids.push(row.get_value("id").as_i64().unwrap());
        }
        ids
    }

    #[tokio::test]
    async fn test_serves_rows_inside_range_across_pages() {
        let executor = MemoryExecutor::new(
            "mem",
            vec![(30, row(3)), (10, row(1)), (20, row(2)), (40, row(4))],
        )
        .with_page_size(1);

        let mut stream = executor.execute("q", 10, 30).await.unwrap();
        assert_eq!(drain(&mut stream).await, vec![2, 3]);
        assert_eq!(executor.query_count(), 1);
    }

    #[tokio::test]
    async fn test_first_range_includes_token_min() {
        let executor = MemoryExecutor::new("mem", vec![(i64::MIN, row(0)), (5, row(5))]);
        let mut stream = executor.execute("q", i64::MIN, 0).await.unwrap();
        assert_eq!(drain(&mut stream).await, vec![0]);
    }

    #[tokio::test]
    async fn test_fault_on_open() {
        let executor = MemoryExecutor::new("mem", vec![(5, row(5))])
            .with_fault(5, FaultKind::OnOpen);
        assert!(matches!(
            executor.execute("q", 0, 10).await,
            Err(FetchError::Query { .. })
        ));
        // Ranges not containing the fault token are unaffected.
        assert!(executor.execute("q", 10, 20).await.is_ok());
    }

    #[tokio::test]
    async fn test_fault_after_rows_is_an_error_not_end_of_data() {
        let executor = MemoryExecutor::new("mem", vec![(1, row(1)), (2, row(2)), (3, row(3))])
            .with_fault(2, FaultKind::AfterRows(1));

        let mut stream = executor.execute("q", 0, 10).await.unwrap();
        assert!(stream.next_row().await.unwrap().is_some());
        assert!(matches!(
            stream.next_row().await,
            Err(FetchError::Page { rows_read: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_inverted_bounds_rejected() {
        let executor = MemoryExecutor::new("mem", Vec::new());
        assert!(executor.execute("q", 10, 0).await.is_err());
    }
}
