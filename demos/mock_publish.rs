//! Mock Publish Example
//!
//! Runs the agent with LogTransport: every report is decoded and logged
//! instead of being sent anywhere. No broker required.
//!
//! Run with: cargo run --bin mock_publish [route_path]

use std::time::Duration;

use contracts::RouteSource;
use motion::MotionModel;
use publisher::{AgentConfig, LogTransport, PublishAgent, VehicleSession};
use route::{default_route, FileRouteSource, RouteStore};
use tokio::sync::watch;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Starting Mock Publish Demo");

    // ==== Stage 1: Use built-in route or load from file ====
    let mut route = RouteStore::new(default_route());
    if let Some(path) = std::env::args().nth(1) {
        let source = FileRouteSource::new(path);
        tracing::info!(source = %source.describe(), "Loading route");
        route.replace(source.load()?)?;
    }
    tracing::info!(waypoints = route.len(), "Route ready");

    // ==== Stage 2: Assemble the agent ====
    let config = AgentConfig {
        vehicle_id: "vehicle-001".to_string(),
        topic: "geovan/positions".to_string(),
        interval: Duration::from_millis(500),
        max_ticks: Some(10),
    };

    let agent = PublishAgent::new(
        config,
        route,
        VehicleSession::new(MotionModel::new()),
        LogTransport::default(),
    );
    let metrics = agent.metrics();

    // ==== Stage 3: Run the publish loop ====
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    let result = tokio::time::timeout(Duration::from_secs(30), agent.run(shutdown_rx)).await;

    match result {
        Ok(Ok(())) => {
            let snapshot = metrics.snapshot();
            tracing::info!(
                published = snapshot.publish_count,
                failures = snapshot.failure_count,
                "Demo completed successfully"
            );
        }
        Ok(Err(e)) => tracing::warn!("Agent error: {:?}", e),
        Err(_) => tracing::warn!("Demo timed out"),
    }

    Ok(())
}
