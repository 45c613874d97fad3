//! Mock 传输
//!
//! 用于单元测试的 mock 实现，支持注入失败场景。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use contracts::{AgentError, Transport};
use tracing::instrument;

/// Mock 传输配置
#[derive(Debug, Default, Clone)]
pub struct MockTransportConfig {
    /// connect 是否失败
    pub fail_connect: bool,
    /// 应该失败的 publish 调用序号 (0-based)
    pub fail_publishes: Vec<u64>,
    /// disconnect 是否失败
    pub fail_disconnect: bool,
}

/// Mock 传输
///
/// 克隆后共享内部状态，测试可以保留一个句柄用于断言。
#[derive(Clone)]
pub struct MockTransport {
    /// 配置（可注入失败场景）
    config: MockTransportConfig,
    /// 共享状态
    state: Arc<MockState>,
}

#[derive(Debug, Default)]
struct MockState {
    /// 连接状态
    connected: Mutex<bool>,
    /// publish 调用计数 (含失败)
    publish_calls: AtomicU64,
    /// disconnect 调用计数
    disconnect_calls: AtomicU64,
    /// 已记录的 (topic, payload)
    published: Mutex<Vec<(String, Bytes)>>,
}

impl MockTransport {
    /// 创建默认 mock 传输
    pub fn new() -> Self {
        Self::with_config(MockTransportConfig::default())
    }

    /// 使用配置创建 mock 传输
    pub fn with_config(config: MockTransportConfig) -> Self {
        Self {
            config,
            state: Arc::new(MockState::default()),
        }
    }

    /// 当前是否连接
    pub fn is_connected(&self) -> bool {
        *self.state.connected.lock().unwrap()
    }

    /// publish 调用总数 (含失败)
    pub fn publish_call_count(&self) -> u64 {
        self.state.publish_calls.load(Ordering::SeqCst)
    }

    /// disconnect 调用总数
    pub fn disconnect_count(&self) -> u64 {
        self.state.disconnect_calls.load(Ordering::SeqCst)
    }

    /// 成功记录的全部 (topic, payload)
    pub fn published(&self) -> Vec<(String, Bytes)> {
        self.state.published.lock().unwrap().clone()
    }

    fn ensure_connected(&self, topic: &str) -> Result<(), AgentError> {
        if *self.state.connected.lock().unwrap() {
            Ok(())
        } else {
            Err(AgentError::publish(topic, "not connected"))
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    #[instrument(name = "mock_transport_connect", skip(self))]
    async fn connect(&mut self) -> Result<(), AgentError> {
        if self.config.fail_connect {
            return Err(AgentError::broker_connection("mock", "mock failure"));
        }
        *self.state.connected.lock().unwrap() = true;
        Ok(())
    }

    #[instrument(name = "mock_transport_publish", skip(self, payload), fields(topic))]
    async fn publish(&mut self, topic: &str, payload: Bytes) -> Result<(), AgentError> {
        self.ensure_connected(topic)?;

        let call = self.state.publish_calls.fetch_add(1, Ordering::SeqCst);
        if self.config.fail_publishes.contains(&call) {
            return Err(AgentError::publish(topic, "mock failure"));
        }

        self.state
            .published
            .lock()
            .unwrap()
            .push((topic.to_string(), payload));
        Ok(())
    }

    #[instrument(name = "mock_transport_disconnect", skip(self))]
    async fn disconnect(&mut self) -> Result<(), AgentError> {
        self.state.disconnect_calls.fetch_add(1, Ordering::SeqCst);
        if self.config.fail_disconnect {
            return Err(AgentError::disconnect("mock failure"));
        }
        *self.state.connected.lock().unwrap() = false;
        Ok(())
    }
}
