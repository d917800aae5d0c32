#![allow(dead_code)]

use super::{FAST_RATE, TEST_QUERY};
use connectors::{executor::QueryExecutor, memory::MemoryExecutor};
use engine_config::{
    report::summary::SummaryReport,
    settings::{ScanSettings, ScanSettingsBuilder},
};
use engine_runtime::execution::executor::run;
use model::{core::value::Value, records::row::Row};
use serde_json::json;
use std::{io::Write, path::PathBuf, sync::Arc};
use tempfile::NamedTempFile;

/// Builds an `{id, val}` row.
pub fn item(id: i64, val: &str) -> Row {
    [("id", Value::Int(id)), ("val", Value::from(val))]
        .into_iter()
        .collect()
}

/// Spreads `ids` evenly over the token ring so that every split gets rows.
pub fn spread(ids: impl IntoIterator<Item = i64>) -> Vec<(i64, Row)> {
    ids.into_iter()
        .map(|id| (token_for(id), item(id, &format!("v{id}"))))
        .collect()
}

/// Deterministic token for an id, scattered over the whole ring.
pub fn token_for(id: i64) -> i64 {
    (id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) as i64
}

pub fn settings() -> ScanSettingsBuilder {
    ScanSettings::builder(TEST_QUERY).rate_limit(FAST_RATE)
}

pub fn memory(name: &str, entries: Vec<(i64, Row)>) -> MemoryExecutor {
    MemoryExecutor::new(name, entries)
}

/// Runs a full comparison between two executors.
pub async fn compare(
    settings: ScanSettings,
    source: impl QueryExecutor + 'static,
    target: impl QueryExecutor + 'static,
) -> SummaryReport {
    run(Arc::new(settings), Arc::new(source), Arc::new(target))
        .await
        .expect("scan should finish")
}

/// Writes fixture JSON to a temp file that lives as long as the handle.
pub fn fixture_file(entries: &[(i64, serde_json::Value)]) -> (NamedTempFile, PathBuf) {
    let json: Vec<serde_json::Value> = entries
        .iter()
        .map(|(token, row)| json!({ "token": token, "row": row }))
        .collect();

    let mut file = NamedTempFile::new().expect("create fixture file");
    let content = serde_json::Value::Array(json).to_string();
    file.write_all(content.as_bytes()).expect("write fixture");
    let path = file.path().to_path_buf();
    (file, path)
}
