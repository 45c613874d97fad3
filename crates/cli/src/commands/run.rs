//! `run` command implementation.

use anyhow::{Context, Result};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `run` command
pub async fn run_agent(args: &RunArgs) -> Result<()> {
    if args.interval_ms == 0 {
        return Err(CliError::config_validation("--interval-ms must be greater than zero").into());
    }
    if args.id.is_empty() {
        return Err(CliError::config_validation("--id must not be empty").into());
    }
    if args.topic.is_empty() {
        return Err(CliError::config_validation("--topic must not be empty").into());
    }

    // Build pipeline configuration
    let pipeline_config = PipelineConfig {
        vehicle_id: args.id.clone(),
        broker: args.broker.clone(),
        topic: args.topic.clone(),
        route_path: args.route.clone(),
        interval: Duration::from_millis(args.interval_ms),
        max_ticks: if args.max_ticks == 0 {
            None
        } else {
            Some(args.max_ticks)
        },
        transport: args.transport,
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
    };

    // Create pipeline
    let pipeline = Pipeline::new(pipeline_config);

    // Setup graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        setup_shutdown_signal().await;
        warn!("Received shutdown signal, stopping agent...");
        let _ = shutdown_tx.send(true);
    });

    info!("Starting agent...");

    let stats = pipeline
        .run(shutdown_rx)
        .await
        .context("Agent execution failed")?;

    info!(
        reports_published = stats.reports_published,
        publish_failures = stats.publish_failures,
        duration_secs = stats.duration.as_secs_f64(),
        rate = format!("{:.2}", stats.reports_per_sec()),
        "Agent completed"
    );

    // Print detailed statistics
    stats.print_summary();

    info!("GeoVAN agent finished");
    Ok(())
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
