//! # Observability
//!
//! 可观测性模块：Prometheus 指标导出与在线统计。
//!
//! Tracing 订阅由 CLI 初始化, 这里只负责指标。
//!
//! ## 使用示例
//!
//! ```ignore
//! use observability::{init_metrics_only, record_report_published};
//!
//! // 启动 Prometheus 端点
//! observability::init_metrics_only(9000)?;
//!
//! // 每次发布后记录
//! record_report_published("geovan/positions", true);
//! ```

pub mod metrics;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;

// Re-exports
pub use crate::metrics::{
    record_last_sequence, record_publish_latency_ms, record_report_published,
    record_route_waypoints, record_tick_skipped, RunningStats, StatsSummary,
};

/// 初始化 Prometheus 指标端点（不初始化 Tracing）
///
/// 监听 0.0.0.0:{port}, 供抓取 `/metrics`。
pub fn init_metrics_only(port: u16) -> Result<()> {
    let builder = PrometheusBuilder::new();
    builder
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .context("Failed to install Prometheus recorder")?;

    tracing::info!(port = port, "Prometheus metrics endpoint initialized");
    Ok(())
}
