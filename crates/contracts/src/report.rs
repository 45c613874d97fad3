//! TelemetryReport - PublishAgent 输出
//!
//! 单次 tick 组装的车辆遥测报告。

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::Waypoint;

/// 车辆遥测报告
///
/// 每个 tick 组装一次，编码为线上格式后发布。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryReport {
    /// 车辆 ID
    pub vehicle_id: String,

    /// 当前路点 (推进前的位置)
    pub position: Waypoint,

    /// 速度 (units/sec)
    pub speed: f64,

    /// 航向角 (度, [0, 360))
    pub heading: f64,

    /// 组装时刻的墙钟时间 (毫秒, Unix epoch)
    pub timestamp_ms: i64,

    /// 会话内单调递增的序列号
    pub sequence: u32,
}

/// 当前墙钟时间 (毫秒, Unix epoch)
///
/// 系统时钟早于 epoch 时返回 0。
pub fn current_timestamp_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
