use crate::{
    commands::{Commands, ScanArgs},
    conn::{Side, open_executor},
    error::CliError,
    exit::RunStatus,
};
use clap::Parser;
use engine_config::settings::{ClusterSettings, ScanSettings};
use engine_core::partition::key_ranges;
use engine_runtime::execution::executor;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod conn;
mod error;
mod exit;
mod output;

#[derive(Parser)]
#[command(
    name = "rangecheck",
    version = "0.1.0",
    about = "Finds rows present in one Cassandra cluster but not the other"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "RANGECHECK_LOG_LEVEL",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Log level, overridden by RUST_LOG"
    )]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Scan(args) => {
            let status = scan(args).await?;
            if status != RunStatus::Success {
                std::process::exit(status.code());
            }
        }
        Commands::Splits { split_size } => {
            let ranges = key_ranges(split_size)?;
            output::print_json(&ranges)?;
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<(), CliError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(log_level),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

async fn scan(args: ScanArgs) -> Result<RunStatus, CliError> {
    let settings = Arc::new(resolve_settings(&args)?);
    info!(
        keyspace = %settings.keyspace,
        consistency = %settings.consistency,
        key_mode = ?settings.key_mode,
        "Configuration resolved"
    );

    let fixture = args.source_fixture.as_deref();
    let source = open_executor(Side::Source, fixture, &settings).await?;
    let fixture = args.target_fixture.as_deref();
    let target = open_executor(Side::Target, fixture, &settings).await?;

    let report = executor::run(settings, source, target).await?;
    report.log();

    if let Some(path) = &args.output {
        output::write_report(&report, path).await?;
        info!("Report written to {}", path.display());
    }

    Ok(RunStatus::from_report(&report, args.fail_on_mismatch))
}

fn resolve_settings(args: &ScanArgs) -> Result<ScanSettings, CliError> {
    let source = ClusterSettings::new(&args.source_hosts, args.source_port)
        .with_credentials(args.source_username.clone(), args.source_password.clone());
    let target = ClusterSettings::new(&args.target_hosts, args.target_port)
        .with_credentials(args.target_username.clone(), args.target_password.clone());

    let settings = ScanSettings::builder(args.query_template.as_str())
        .source(source)
        .target(target)
        .keyspace(args.keyspace.as_str())
        .consistency(args.consistency_level)
        .connections(args.connections)
        .page_size(args.page_size)
        .split_count(args.split_size)
        .workers(args.workers)
        .rate_limit(args.ratelimit)
        .key_mode(args.key_mode)
        .build()?;
    Ok(settings)
}
