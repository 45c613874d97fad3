//! 发布代理指标收集模块
//!
//! 记录发布循环的 Prometheus 指标, 并提供摘要用的在线统计。

use metrics::{counter, gauge, histogram};

/// 记录一次报告发布
///
/// 每个 tick 在发布 (或发布失败) 后调用。
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_report_published;
///
/// match transport.publish(topic, payload).await {
///     Ok(()) => record_report_published(topic, true),
///     Err(_) => record_report_published(topic, false),
/// }
/// ```
pub fn record_report_published(topic: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "geovan_agent_reports_published_total",
        "topic" => topic.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// 记录发布延迟 (从编码完成到 transport 返回)
pub fn record_publish_latency_ms(latency_ms: f64) {
    histogram!("geovan_agent_publish_latency_ms").record(latency_ms);
}

/// 记录一次被跳过的 tick (路线为空)
pub fn record_tick_skipped() {
    counter!("geovan_agent_ticks_skipped_total").increment(1);
}

/// 记录最近消耗的序列号 (用于检测断流)
pub fn record_last_sequence(sequence: u32) {
    gauge!("geovan_agent_last_sequence").set(sequence as f64);
}

/// 记录当前路线的航点数量
pub fn record_route_waypoints(count: usize) {
    gauge!("geovan_agent_route_waypoints").set(count as f64);
}

/// 统计摘要
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// 在线统计计算器 (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// 添加新值
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// 样本数量
    pub fn count(&self) -> u64 {
        self.count
    }

    /// 均值
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// 方差
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// 标准差
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// 最小值
    pub fn min(&self) -> f64 {
        self.min
    }

    /// 最大值
    pub fn max(&self) -> f64 {
        self.max
    }
}
