//! Agent run statistics.

use std::time::Duration;

use observability::StatsSummary;
use publisher::AgentMetricsSnapshot;

/// Statistics from an agent run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Reports successfully published
    pub reports_published: u64,

    /// Publish attempts that failed
    pub publish_failures: u64,

    /// Ticks skipped because the route was empty
    pub ticks_skipped: u64,

    /// Total duration of the run
    pub duration: Duration,

    /// Publish latency summary (milliseconds)
    pub publish_latency_ms: StatsSummary,
}

impl RunStats {
    /// Build run statistics from an agent metrics snapshot
    pub fn from_snapshot(snapshot: &AgentMetricsSnapshot, duration: Duration) -> Self {
        Self {
            reports_published: snapshot.publish_count,
            publish_failures: snapshot.failure_count,
            ticks_skipped: snapshot.skipped_count,
            duration,
            publish_latency_ms: snapshot.latency_ms.clone(),
        }
    }

    /// Calculate reports per second throughput
    pub fn reports_per_sec(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.reports_published as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate failure rate as percentage
    #[allow(dead_code)]
    pub fn failure_rate(&self) -> f64 {
        let total = self.reports_published + self.publish_failures;
        if total > 0 {
            (self.publish_failures as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                     Agent Run Statistics                     ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Reports published: {}", self.reports_published);
        println!("   ├─ Publish failures: {}", self.publish_failures);
        println!("   ├─ Ticks skipped: {}", self.ticks_skipped);
        println!("   └─ Reports/sec: {:.2}", self.reports_per_sec());

        println!("\n📈 Publish Latency (ms)");
        println!("   └─ {}", self.publish_latency_ms);

        println!();
    }
}
