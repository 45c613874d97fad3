//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// GeoVAN Agent - Single-vehicle motion simulation and telemetry publisher
#[derive(Parser, Debug)]
#[command(
    name = "geovan-agent",
    author,
    version,
    about = "GeoVAN vehicle telemetry agent",
    long_about = "A telemetry agent that simulates a vehicle moving along a cyclic \n\
                  geographic route and publishes protobuf position reports to a \n\
                  broker at a fixed interval."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "GEOVAN_AGENT_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "GEOVAN_AGENT_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the telemetry agent
    Run(RunArgs),

    /// Validate a route file without running
    Validate(ValidateArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Vehicle identifier carried in every report
    #[arg(long, default_value = "vehicle-001", env = "GEOVAN_AGENT_ID")]
    pub id: String,

    /// Broker endpoint (host:port, optional tcp:// scheme)
    #[arg(long, default_value = "localhost:1883", env = "GEOVAN_AGENT_BROKER")]
    pub broker: String,

    /// Topic to publish position reports on
    #[arg(long, default_value = "geovan/positions", env = "GEOVAN_AGENT_TOPIC")]
    pub topic: String,

    /// Path to a route file (lat,lon per line); built-in route if omitted
    #[arg(short, long, env = "GEOVAN_AGENT_ROUTE")]
    pub route: Option<PathBuf>,

    /// Publish interval in milliseconds
    #[arg(long, default_value = "2000", env = "GEOVAN_AGENT_INTERVAL_MS")]
    pub interval_ms: u64,

    /// Maximum number of reports to attempt (0 = unlimited)
    #[arg(long, default_value = "0", env = "GEOVAN_AGENT_MAX_TICKS")]
    pub max_ticks: u64,

    /// Transport used for publishing
    #[arg(
        long,
        value_enum,
        default_value = "broker",
        env = "GEOVAN_AGENT_TRANSPORT"
    )]
    pub transport: TransportKind,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "GEOVAN_AGENT_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the route file to validate
    #[arg(short, long)]
    pub route: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Transport selection for the `run` command
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum TransportKind {
    /// TCP connection to the broker endpoint
    #[default]
    Broker,
    /// Log each report locally instead of publishing
    Log,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
