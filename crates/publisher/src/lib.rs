//! # Publisher
//!
//! 遥测发布模块。
//!
//! 负责：
//! - 维护 `VehicleSession` (路点索引、序列号、运动模型)
//! - 每个 tick 组装并发布一条 `TelemetryReport`
//! - connect → loop → disconnect 生命周期与优雅关闭

pub mod agent;
pub mod metrics;
pub mod mock;
pub mod session;
pub mod transports;

pub use agent::{AgentConfig, PublishAgent, TickOutcome};
pub use contracts::{Transport, Waypoint};
pub use metrics::{AgentMetrics, AgentMetricsSnapshot};
pub use mock::{MockTransport, MockTransportConfig};
pub use session::VehicleSession;
pub use transports::{BrokerTransport, LogTransport};
