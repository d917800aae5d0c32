use crate::error::CliError;
use connectors::{executor::QueryExecutor, fixture::load_fixture};
use engine_config::settings::{ClusterSettings, ScanSettings};
use std::{path::Path, sync::Arc};
use tracing::info;

/// Which half of the comparison an executor serves.
#[derive(Debug, Clone, Copy)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn name(&self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Target => "target",
        }
    }

    fn cluster<'a>(&self, settings: &'a ScanSettings) -> &'a ClusterSettings {
        match self {
            Side::Source => &settings.source,
            Side::Target => &settings.target,
        }
    }
}

/// Builds the executor for one side: a fixture file when one is given,
/// otherwise a live cluster session.
pub async fn open_executor(
    side: Side,
    fixture: Option<&Path>,
    settings: &ScanSettings,
) -> Result<Arc<dyn QueryExecutor>, CliError> {
    if let Some(path) = fixture {
        let name = side.name();
        info!("Using fixture {} for the {name} side", path.display());
        let executor = load_fixture(side.name(), path, settings.page_size).await?;
        return Ok(Arc::new(executor));
    }

    let cluster = side.cluster(settings);
    connect_cluster(side, cluster, settings).await
}

#[cfg(feature = "cassandra")]
async fn connect_cluster(
    side: Side,
    cluster: &ClusterSettings,
    settings: &ScanSettings,
) -> Result<Arc<dyn QueryExecutor>, CliError> {
    use connectors::cassandra::{CassandraExecutor, CassandraOptions};

    let options = CassandraOptions {
        hosts: cluster.hosts.clone(),
        port: cluster.port,
        username: cluster.username.clone(),
        password: cluster.password.clone(),
        keyspace: settings.keyspace.clone(),
        connections: settings.connections,
        page_size: settings.page_size,
        consistency: settings.consistency,
    };
    info!(options = ?options, "Connecting to the {} cluster", side.name());

    let executor = CassandraExecutor::connect(side.name(), &options).await?;
    Ok(Arc::new(executor))
}

#[cfg(not(feature = "cassandra"))]
async fn connect_cluster(
    side: Side,
    _cluster: &ClusterSettings,
    _settings: &ScanSettings,
) -> Result<Arc<dyn QueryExecutor>, CliError> {
    Err(CliError::ClusterSupportDisabled(side.name()))
}
