//! PublishAgent - tick loop and connection lifecycle

use std::sync::Arc;
use std::time::{Duration, Instant};

use contracts::{current_timestamp_ms, wire, AgentError, TelemetryReport, Transport};
use motion::{bearing_between, normalize_heading};
use route::RouteStore;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

use crate::metrics::AgentMetrics;
use crate::session::VehicleSession;

/// Agent configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Vehicle identifier carried in every report
    pub vehicle_id: String,

    /// Topic reports are published on
    pub topic: String,

    /// Delay between ticks
    pub interval: Duration,

    /// Stop after this many reports have been emitted (None = unlimited)
    ///
    /// Failed publishes count too: the bound is on consumed sequence
    /// numbers, not on delivered reports.
    pub max_ticks: Option<u64>,
}

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Report published; the vehicle advanced to the next waypoint
    Published { sequence: u32 },

    /// Publish failed; the vehicle stayed put but the sequence number is
    /// consumed, leaving a gap for subscribers
    PublishFailed { sequence: u32 },

    /// Route was empty; nothing emitted, no sequence consumed
    EmptyRoute,
}

/// Single-vehicle publishing agent
///
/// Owns the route, the session state, and the transport. One logical
/// control flow: connect, then tick/sleep until shutdown, then disconnect.
pub struct PublishAgent<T: Transport> {
    config: AgentConfig,
    route: RouteStore,
    session: VehicleSession,
    transport: T,
    metrics: Arc<AgentMetrics>,
}

impl<T: Transport> PublishAgent<T> {
    /// Create a new agent
    pub fn new(
        config: AgentConfig,
        route: RouteStore,
        session: VehicleSession,
        transport: T,
    ) -> Self {
        Self {
            config,
            route,
            session,
            transport,
            metrics: Arc::new(AgentMetrics::new()),
        }
    }

    /// Shared handle to the agent's metrics
    pub fn metrics(&self) -> Arc<AgentMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Mutable access to the active route (route swaps, tests)
    pub fn route_mut(&mut self) -> &mut RouteStore {
        &mut self.route
    }

    /// Mutable access to the transport (tests drive connect directly)
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Execute one tick: sample motion, assemble a report, publish it
    ///
    /// Requires a connected transport. The emitted position is the
    /// waypoint the vehicle currently sits on; the index advances only
    /// after a successful publish.
    #[instrument(name = "agent_tick", skip(self), fields(vehicle = %self.config.vehicle_id))]
    pub async fn tick(&mut self) -> TickOutcome {
        let Some(position) = self.route.waypoint_at(self.session.current_index()) else {
            error!("Route is empty, skipping tick");
            self.metrics.inc_skipped_count();
            observability::record_tick_skipped();
            return TickOutcome::EmptyRoute;
        };

        let next_index = self.route.next_index(self.session.current_index());

        // A heading needs two distinct waypoints; short routes report 0
        // plus noise.
        let bearing = if self.route.len() < 2 {
            0.0
        } else {
            let next = self.route.waypoint_at(next_index).unwrap_or(position);
            bearing_between(position, next)
        };

        let heading = normalize_heading(bearing + self.session.motion().heading_noise());
        let speed = self.session.motion().sample_speed();
        let sequence = self.session.next_sequence();

        let report = TelemetryReport {
            vehicle_id: self.config.vehicle_id.clone(),
            position,
            speed,
            heading,
            timestamp_ms: current_timestamp_ms(),
            sequence,
        };

        let payload = match wire::encode_report(&report) {
            Ok(payload) => payload,
            Err(e) => {
                error!(sequence, error = %e, "Failed to encode report");
                self.metrics.inc_failure_count();
                observability::record_report_published(&self.config.topic, false);
                return TickOutcome::PublishFailed { sequence };
            }
        };

        let started = Instant::now();
        match self.transport.publish(&self.config.topic, payload).await {
            Ok(()) => {
                let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
                self.session.advance_to(next_index);

                self.metrics.inc_publish_count();
                self.metrics.record_latency_ms(latency_ms);
                observability::record_report_published(&self.config.topic, true);
                observability::record_publish_latency_ms(latency_ms);
                observability::record_last_sequence(sequence);

                info!(
                    sequence,
                    lat = position.lat,
                    lon = position.lon,
                    speed = format!("{:.2}", speed),
                    heading = format!("{:.1}", heading),
                    "Report published"
                );

                TickOutcome::Published { sequence }
            }
            Err(e) => {
                error!(sequence, error = %e, "Publish failed");
                self.metrics.inc_failure_count();
                observability::record_report_published(&self.config.topic, false);
                TickOutcome::PublishFailed { sequence }
            }
        }
    }

    /// Run the full lifecycle: connect, tick loop, disconnect
    ///
    /// A connect failure is fatal and returned immediately. Publish
    /// failures inside the loop are reported per tick and the loop keeps
    /// going. The wait between ticks races against the shutdown channel,
    /// so shutdown latency is bounded by one interval.
    #[instrument(
        name = "agent_run",
        skip(self, shutdown),
        fields(vehicle = %self.config.vehicle_id, transport = %self.transport.name())
    )]
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Result<(), AgentError> {
        info!(topic = %self.config.topic, "Connecting transport...");
        self.transport.connect().await?;
        info!("Transport connected");

        let mut emitted: u64 = 0;

        loop {
            let outcome = self.tick().await;

            if matches!(
                outcome,
                TickOutcome::Published { .. } | TickOutcome::PublishFailed { .. }
            ) {
                emitted += 1;
                if let Some(max) = self.config.max_ticks {
                    if emitted >= max {
                        info!(emitted, "Reached max ticks limit");
                        break;
                    }
                }
            }

            tokio::select! {
                _ = shutdown.changed() => {
                    info!("Shutdown requested, stopping publish loop");
                    break;
                }
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }

        if let Err(e) = self.transport.disconnect().await {
            warn!(error = %e, "Disconnect failed during shutdown");
        }
        debug!(emitted, "Publish loop finished");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockTransport, MockTransportConfig};
    use contracts::Waypoint;
    use motion::MotionModel;

    fn test_config(max_ticks: Option<u64>) -> AgentConfig {
        AgentConfig {
            vehicle_id: "vehicle-001".to_string(),
            topic: "geovan/positions".to_string(),
            interval: Duration::from_millis(5),
            max_ticks,
        }
    }

    fn two_point_route() -> RouteStore {
        RouteStore::new(vec![Waypoint::new(0.0, 0.0), Waypoint::new(1.0, 1.0)])
    }

    fn agent_with(transport: MockTransport, route: RouteStore) -> PublishAgent<MockTransport> {
        PublishAgent::new(
            test_config(None),
            route,
            VehicleSession::new(MotionModel::seeded(42)),
            transport,
        )
    }

    #[tokio::test]
    async fn test_tick_publishes_and_advances() {
        let mock = MockTransport::new();
        let handle = mock.clone();
        let mut agent = agent_with(mock, two_point_route());
        agent.transport_mut().connect().await.unwrap();

        let outcome = agent.tick().await;
        assert_eq!(outcome, TickOutcome::Published { sequence: 0 });

        let published = handle.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, "geovan/positions");

        let decoded = wire::decode_position(&published[0].1).unwrap();
        assert_eq!(decoded.id, "vehicle-001");
        assert_eq!(decoded.seq, 0);
        let pos = decoded.pos.unwrap();
        assert_eq!(pos.lat, 0.0);
        assert_eq!(pos.lon, 0.0);
        assert!((8.0..=15.0).contains(&decoded.speed));
        assert!((0.0..360.0).contains(&decoded.heading));
    }

    #[tokio::test]
    async fn test_failed_publish_keeps_position_and_consumes_sequence() {
        let mock = MockTransport::with_config(MockTransportConfig {
            fail_publishes: vec![1],
            ..Default::default()
        });
        let handle = mock.clone();
        let mut agent = agent_with(mock, two_point_route());
        agent.transport_mut().connect().await.unwrap();

        assert_eq!(agent.tick().await, TickOutcome::Published { sequence: 0 });
        assert_eq!(
            agent.tick().await,
            TickOutcome::PublishFailed { sequence: 1 }
        );
        assert_eq!(agent.tick().await, TickOutcome::Published { sequence: 2 });

        let published = handle.published();
        assert_eq!(published.len(), 2);

        let first = wire::decode_position(&published[0].1).unwrap();
        let retry = wire::decode_position(&published[1].1).unwrap();

        // Tick 3 re-emits the position the failed tick 2 tried to send,
        // with a sequence gap in between.
        assert_eq!(first.seq, 0);
        assert_eq!(retry.seq, 2);
        assert_eq!(retry.pos.unwrap().lat, 1.0);
    }

    #[tokio::test]
    async fn test_empty_route_skips_without_consuming_sequence() {
        let mock = MockTransport::new();
        let handle = mock.clone();
        let mut agent = agent_with(mock, RouteStore::default());
        agent.transport_mut().connect().await.unwrap();

        assert_eq!(agent.tick().await, TickOutcome::EmptyRoute);
        assert_eq!(agent.tick().await, TickOutcome::EmptyRoute);
        assert!(handle.published().is_empty());
        assert_eq!(agent.metrics().skipped_count(), 2);

        // Installing a route resumes publishing from sequence 0.
        agent
            .route_mut()
            .replace(vec![Waypoint::new(5.0, 5.0)])
            .unwrap();
        assert_eq!(agent.tick().await, TickOutcome::Published { sequence: 0 });
    }

    #[tokio::test]
    async fn test_single_waypoint_heading_is_noise_around_zero() {
        let mock = MockTransport::new();
        let handle = mock.clone();
        let mut agent = agent_with(mock, RouteStore::new(vec![Waypoint::new(2.0, 3.0)]));
        agent.transport_mut().connect().await.unwrap();

        for _ in 0..20 {
            agent.tick().await;
        }

        for (_, payload) in handle.published() {
            let decoded = wire::decode_position(&payload).unwrap();
            assert!(
                decoded.heading <= 5.0 || decoded.heading >= 355.0,
                "heading should be noise around 0, got {}",
                decoded.heading
            );
        }
    }

    #[tokio::test]
    async fn test_run_connect_failure_is_fatal() {
        let mock = MockTransport::with_config(MockTransportConfig {
            fail_connect: true,
            ..Default::default()
        });
        let handle = mock.clone();
        let agent = agent_with(mock, two_point_route());

        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let result = agent.run(shutdown_rx).await;

        assert!(matches!(result, Err(AgentError::BrokerConnection { .. })));
        assert!(handle.published().is_empty());
    }

    #[tokio::test]
    async fn test_run_respects_max_ticks() {
        let mock = MockTransport::new();
        let handle = mock.clone();
        let mut config = test_config(Some(3));
        config.interval = Duration::from_millis(1);
        let agent = PublishAgent::new(
            config,
            two_point_route(),
            VehicleSession::new(MotionModel::seeded(42)),
            mock,
        );

        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        agent.run(shutdown_rx).await.unwrap();

        assert_eq!(handle.published().len(), 3);
        assert_eq!(handle.disconnect_count(), 1);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown_within_one_interval() {
        let mock = MockTransport::new();
        let handle = mock.clone();
        let mut config = test_config(None);
        config.interval = Duration::from_secs(30);
        let agent = PublishAgent::new(
            config,
            two_point_route(),
            VehicleSession::new(MotionModel::seeded(42)),
            mock,
        );

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(agent.run(shutdown_rx));

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown_tx.send(true).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .expect("shutdown should not wait out the full interval")
            .unwrap();
        assert!(result.is_ok());

        // Only the immediate first tick ran before the long sleep.
        assert_eq!(handle.published().len(), 1);
        assert_eq!(handle.disconnect_count(), 1);
    }

    #[tokio::test]
    async fn test_run_continues_after_disconnect_failure() {
        let mock = MockTransport::with_config(MockTransportConfig {
            fail_disconnect: true,
            ..Default::default()
        });
        let handle = mock.clone();
        let mut config = test_config(Some(1));
        config.interval = Duration::from_millis(1);
        let agent = PublishAgent::new(
            config,
            two_point_route(),
            VehicleSession::new(MotionModel::seeded(42)),
            mock,
        );

        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        // Disconnect failure is logged, not propagated.
        assert!(agent.run(shutdown_rx).await.is_ok());
        assert_eq!(handle.published().len(), 1);
    }
}
