use crate::error::CliError;
use engine_config::report::summary::SummaryReport;
use std::path::Path;

pub async fn write_report(report: &SummaryReport, path: &Path) -> Result<(), CliError> {
    let json = report.to_json()?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
