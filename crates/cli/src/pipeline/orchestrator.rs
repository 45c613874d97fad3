//! Pipeline orchestrator - wires route, motion, transport, and agent together.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use contracts::{RouteSource, Transport};
use motion::MotionModel;
use publisher::{
    AgentConfig, BrokerTransport, LogTransport, PublishAgent, VehicleSession,
};
use route::{default_route, FileRouteSource, RouteStore};
use tokio::sync::watch;
use tracing::{info, warn};

use super::RunStats;
use crate::cli::TransportKind;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Vehicle identifier carried in every report
    pub vehicle_id: String,

    /// Broker endpoint (host:port)
    pub broker: String,

    /// Publish topic
    pub topic: String,

    /// Route file path (None = built-in route)
    pub route_path: Option<PathBuf>,

    /// Interval between reports
    pub interval: Duration,

    /// Maximum number of reports to attempt (None = unlimited)
    pub max_ticks: Option<u64>,

    /// Transport selection
    pub transport: TransportKind,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the agent to completion
    pub async fn run(self, shutdown: watch::Receiver<bool>) -> Result<RunStats> {
        let start_time = Instant::now();

        // Initialize Metrics (optional)
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        // Resolve the route
        let route = self.build_route();
        observability::record_route_waypoints(route.len());

        info!(
            vehicle = %self.config.vehicle_id,
            topic = %self.config.topic,
            interval_ms = self.config.interval.as_millis() as u64,
            max_ticks = ?self.config.max_ticks,
            waypoints = route.len(),
            "Agent configured"
        );

        match self.config.transport {
            TransportKind::Broker => {
                let transport = BrokerTransport::new(self.config.broker.clone());
                info!(endpoint = %transport.endpoint(), "Using broker transport");
                self.run_with(route, transport, shutdown, start_time).await
            }
            TransportKind::Log => {
                info!("Using log transport (no broker required)");
                self.run_with(route, LogTransport::default(), shutdown, start_time)
                    .await
            }
        }
    }

    /// Build the route store, falling back to the built-in route
    ///
    /// A route file that cannot be read or yields no waypoints is not
    /// fatal; the built-in route stays in effect.
    fn build_route(&self) -> RouteStore {
        let mut route = RouteStore::new(default_route());

        if let Some(ref path) = self.config.route_path {
            let source = FileRouteSource::new(path);
            match source.load() {
                Ok(waypoints) => match route.replace(waypoints) {
                    Ok(()) => {
                        info!(
                            source = %source.describe(),
                            waypoints = route.len(),
                            "Route loaded"
                        );
                    }
                    Err(e) => {
                        warn!(
                            source = %source.describe(),
                            error = %e,
                            "Route file has no usable waypoints, keeping built-in route"
                        );
                    }
                },
                Err(e) => {
                    warn!(
                        source = %source.describe(),
                        error = %e,
                        "Failed to load route file, keeping built-in route"
                    );
                }
            }
        }

        route
    }

    /// Run the agent with a concrete transport
    async fn run_with<T: Transport>(
        self,
        route: RouteStore,
        transport: T,
        shutdown: watch::Receiver<bool>,
        start_time: Instant,
    ) -> Result<RunStats> {
        let agent_config = AgentConfig {
            vehicle_id: self.config.vehicle_id.clone(),
            topic: self.config.topic.clone(),
            interval: self.config.interval,
            max_ticks: self.config.max_ticks,
        };

        let session = VehicleSession::new(MotionModel::new());
        let agent = PublishAgent::new(agent_config, route, session, transport);
        let metrics = agent.metrics();

        agent
            .run(shutdown)
            .await
            .context("Agent run failed")?;

        let snapshot = metrics.snapshot();
        Ok(RunStats::from_snapshot(&snapshot, start_time.elapsed()))
    }
}
