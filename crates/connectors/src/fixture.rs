use crate::{error::FetchError, memory::MemoryExecutor};
use model::records::row::Row;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// One record of a fixture file.
///
/// ```json
/// [{ "token": -42, "row": { "id": 1, "val": "x" } }]
/// ```
#[derive(Debug, Deserialize)]
struct FixtureEntry {
    token: i64,
    row: serde_json::Map<String, serde_json::Value>,
}

/// Parses fixture JSON into token-tagged rows.
pub fn parse_fixture(content: &str) -> Result<Vec<(i64, Row)>, FetchError> {
    let entries: Vec<FixtureEntry> = serde_json::from_str(content)?;
    Ok(entries
        .into_iter()
        .map(|entry| (entry.token, Row::from(entry.row)))
        .collect())
}

/// Loads a fixture file and serves it through an in-memory executor, so a
/// side of the comparison can run without a cluster.
pub async fn load_fixture(
    name: &str,
    path: impl AsRef<Path>,
    page_size: usize,
) -> Result<MemoryExecutor, FetchError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await?;
    let entries = parse_fixture(&content)?;
    info!(
        cluster = name,
        rows = entries.len(),
        "Loaded fixture {}",
        path.display()
    );
    let executor = MemoryExecutor::new(name, entries);
    Ok(executor.with_page_size(page_size))
}
