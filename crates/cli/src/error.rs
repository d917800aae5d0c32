use connectors::error::FetchError;
use engine_config::settings::SettingsError;
use engine_core::error::PartitionError;
use engine_runtime::error::ScanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to open a cluster or fixture: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to run the scan: {0}")]
    Scan(#[from] ScanError),

    #[error("Failed to compute ranges: {0}")]
    Partition(#[from] PartitionError),

    #[error("Failed to write the report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error(
        "No fixture given for the {0} side and cluster support is not compiled in \
         (rebuild with --features cassandra)"
    )]
    ClusterSupportDisabled(&'static str),

    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}
