use crate::settings::{cluster::ClusterSettings, error::SettingsError};
use engine_core::canonical::CanonicalMode;
use model::execution::consistency::ConsistencyLevel;
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 1000;
pub const DEFAULT_SPLIT_COUNT: usize = 1000;
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_RATE_LIMIT: u32 = 1000;
pub const DEFAULT_CONNECTIONS: usize = 1;

/// Immutable, validated configuration for one comparison run.
///
/// Built once at startup and shared by reference with the worker pool, the
/// scanner and the limiter.
#[derive(Debug, Clone, Serialize)]
pub struct ScanSettings {
    /// Cluster treated as the reference copy
    pub source: ClusterSettings,
    /// Cluster checked against the source
    pub target: ClusterSettings,
    /// Keyspace used on both clusters
    pub keyspace: String,
    /// Read consistency passed through to both executors
    pub consistency: ConsistencyLevel,
    /// Connections per host
    pub connections: usize,
    /// Rows fetched per page per iterator
    pub page_size: usize,
    /// Number of sub-ranges the token space is split into
    pub split_count: usize,
    /// Number of concurrent scan workers
    pub workers: usize,
    /// Global row fetch budget, in rows per second
    pub rate_limit: u32,
    /// Scan query taking a sub-range's (min, max) as positional parameters
    pub query_template: String,
    /// How rows are turned into comparison keys
    pub key_mode: CanonicalMode,
}

impl ScanSettings {
    pub fn builder(query_template: impl Into<String>) -> ScanSettingsBuilder {
        ScanSettingsBuilder::new(query_template)
    }

    pub fn from_builder(builder: ScanSettingsBuilder) -> Result<Self, SettingsError> {
        let settings = Self {
            source: builder.source.unwrap_or_default(),
            target: builder.target.unwrap_or_default(),
            keyspace: builder.keyspace.unwrap_or_default(),
            consistency: builder.consistency.unwrap_or_default(),
            connections: builder.connections.unwrap_or(DEFAULT_CONNECTIONS),
            page_size: builder.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            split_count: builder.split_count.unwrap_or(DEFAULT_SPLIT_COUNT),
            workers: builder.workers.unwrap_or(DEFAULT_WORKERS),
            rate_limit: builder.rate_limit.unwrap_or(DEFAULT_RATE_LIMIT),
            query_template: builder.query_template.trim().to_string(),
            key_mode: builder.key_mode.unwrap_or_default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.query_template.is_empty() {
            return Err(SettingsError::MissingQueryTemplate);
        }
        if self.page_size == 0 {
            return Err(SettingsError::NotPositive("page_size"));
        }
        if self.split_count == 0 {
            return Err(SettingsError::NotPositive("split_count"));
        }
        if self.workers == 0 {
            return Err(SettingsError::NotPositive("workers"));
        }
        if self.rate_limit == 0 {
            return Err(SettingsError::NotPositive("rate_limit"));
        }
        if self.connections == 0 {
            return Err(SettingsError::NotPositive("connections"));
        }
        if self.source.hosts.is_empty() {
            return Err(SettingsError::MissingHosts("source"));
        }
        if self.target.hosts.is_empty() {
            return Err(SettingsError::MissingHosts("target"));
        }
        Ok(())
    }

    /// Capacity of the task queue. Producers block once this many tasks are
    /// waiting.
    pub fn queue_capacity(&self) -> usize {
        self.workers
    }
}

#[derive(Debug, Default)]
pub struct ScanSettingsBuilder {
    pub source: Option<ClusterSettings>,
    pub target: Option<ClusterSettings>,
    pub keyspace: Option<String>,
    pub consistency: Option<ConsistencyLevel>,
    pub connections: Option<usize>,
    pub page_size: Option<usize>,
    pub split_count: Option<usize>,
    pub workers: Option<usize>,
    pub rate_limit: Option<u32>,
    pub query_template: String,
    pub key_mode: Option<CanonicalMode>,
}

impl ScanSettingsBuilder {
    pub fn new(query_template: impl Into<String>) -> Self {
        Self {
            query_template: query_template.into(),
            ..Default::default()
        }
    }

    pub fn source(mut self, source: ClusterSettings) -> Self {
        self.source = Some(source);
        self
    }

    pub fn target(mut self, target: ClusterSettings) -> Self {
        self.target = Some(target);
        self
    }

    pub fn keyspace(mut self, keyspace: impl Into<String>) -> Self {
        self.keyspace = Some(keyspace.into());
        self
    }

    pub fn consistency(mut self, consistency: ConsistencyLevel) -> Self {
        self.consistency = Some(consistency);
        self
    }

    pub fn connections(mut self, connections: usize) -> Self {
        self.connections = Some(connections);
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn split_count(mut self, split_count: usize) -> Self {
        self.split_count = Some(split_count);
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn rate_limit(mut self, rate_limit: u32) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    pub fn key_mode(mut self, key_mode: CanonicalMode) -> Self {
        self.key_mode = Some(key_mode);
        self
    }

    pub fn build(self) -> Result<ScanSettings, SettingsError> {
        ScanSettings::from_builder(self)
    }
}
