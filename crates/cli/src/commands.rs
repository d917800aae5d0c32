use clap::{Args, Subcommand};
use engine_core::canonical::CanonicalMode;
use model::execution::consistency::ConsistencyLevel;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Compare every row key of the source cluster against the target cluster
    Scan(ScanArgs),

    /// Print the token sub-ranges a scan would use, without connecting
    Splits {
        #[arg(long, env = "RANGECHECK_SPLIT_SIZE", default_value_t = 1000)]
        split_size: usize,
    },
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    #[arg(
        long,
        env = "RANGECHECK_SOURCE_HOSTS",
        default_value = "localhost",
        help = "Comma-separated source hosts"
    )]
    pub source_hosts: String,

    #[arg(long, env = "RANGECHECK_SOURCE_PORT", default_value_t = 9042)]
    pub source_port: u16,

    #[arg(long, env = "RANGECHECK_SOURCE_USERNAME")]
    pub source_username: Option<String>,

    #[arg(long, env = "RANGECHECK_SOURCE_PASSWORD", hide_env_values = true)]
    pub source_password: Option<String>,

    #[arg(
        long,
        env = "RANGECHECK_TARGET_HOSTS",
        default_value = "localhost",
        help = "Comma-separated target hosts"
    )]
    pub target_hosts: String,

    #[arg(long, env = "RANGECHECK_TARGET_PORT", default_value_t = 9042)]
    pub target_port: u16,

    #[arg(long, env = "RANGECHECK_TARGET_USERNAME")]
    pub target_username: Option<String>,

    #[arg(long, env = "RANGECHECK_TARGET_PASSWORD", hide_env_values = true)]
    pub target_password: Option<String>,

    #[arg(long, env = "RANGECHECK_KEYSPACE", default_value = "")]
    pub keyspace: String,

    #[arg(
        long,
        env = "RANGECHECK_CONSISTENCY_LEVEL",
        default_value = "LOCAL_QUORUM"
    )]
    pub consistency_level: ConsistencyLevel,

    #[arg(
        long,
        env = "RANGECHECK_CONNECTIONS",
        default_value_t = 1,
        help = "Connections per host"
    )]
    pub connections: usize,

    #[arg(long, env = "RANGECHECK_PAGE_SIZE", default_value_t = 1000)]
    pub page_size: usize,

    #[arg(
        long,
        env = "RANGECHECK_SPLIT_SIZE",
        default_value_t = 1000,
        help = "Number of token sub-ranges"
    )]
    pub split_size: usize,

    #[arg(long, env = "RANGECHECK_WORKERS", default_value_t = 4)]
    pub workers: usize,

    #[arg(
        long,
        env = "RANGECHECK_RATELIMIT",
        default_value_t = 1000,
        help = "Rows fetched per second, both clusters combined"
    )]
    pub ratelimit: u32,

    #[arg(
        long,
        env = "RANGECHECK_QUERY_TEMPLATE",
        help = "Scan query with two positional parameters for the range bounds, e.g. \
                SELECT * FROM t WHERE token(pk) > ? AND token(pk) <= ?"
    )]
    pub query_template: String,

    #[arg(
        long,
        env = "RANGECHECK_KEY_MODE",
        default_value = "values",
        help = "Row key format: values or named"
    )]
    pub key_mode: CanonicalMode,

    #[arg(
        long,
        env = "RANGECHECK_SOURCE_FIXTURE",
        help = "Serve the source side from a JSON fixture file"
    )]
    pub source_fixture: Option<PathBuf>,

    #[arg(
        long,
        env = "RANGECHECK_TARGET_FIXTURE",
        help = "Serve the target side from a JSON fixture file"
    )]
    pub target_fixture: Option<PathBuf>,

    #[arg(long, help = "If specified, also writes the JSON report to this file")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Exit with a non-zero code when any key is missing")]
    pub fail_on_mismatch: bool,
}
