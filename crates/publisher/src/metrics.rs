//! Agent metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use observability::{RunningStats, StatsSummary};

/// Metrics for a publishing session
#[derive(Debug, Default)]
pub struct AgentMetrics {
    /// Total successful publishes
    publish_count: AtomicU64,
    /// Total publish failures
    failure_count: AtomicU64,
    /// Total ticks skipped because the route was empty
    skipped_count: AtomicU64,
    /// Publish latency running stats (milliseconds)
    latency_ms: Mutex<RunningStats>,
}

impl AgentMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total publish count
    pub fn publish_count(&self) -> u64 {
        self.publish_count.load(Ordering::Relaxed)
    }

    /// Increment publish count
    pub fn inc_publish_count(&self) {
        self.publish_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get failure count
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Increment failure count
    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get skipped tick count
    pub fn skipped_count(&self) -> u64 {
        self.skipped_count.load(Ordering::Relaxed)
    }

    /// Increment skipped tick count
    pub fn inc_skipped_count(&self) {
        self.skipped_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one publish latency sample
    pub fn record_latency_ms(&self, latency_ms: f64) {
        self.latency_ms
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(latency_ms);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> AgentMetricsSnapshot {
        let latency = self.latency_ms.lock().unwrap_or_else(|e| e.into_inner());
        AgentMetricsSnapshot {
            publish_count: self.publish_count(),
            failure_count: self.failure_count(),
            skipped_count: self.skipped_count(),
            latency_ms: StatsSummary::from(&*latency),
        }
    }
}

/// Snapshot of agent metrics (for reporting)
#[derive(Debug, Clone)]
pub struct AgentMetricsSnapshot {
    pub publish_count: u64,
    pub failure_count: u64,
    pub skipped_count: u64,
    pub latency_ms: StatsSummary,
}
