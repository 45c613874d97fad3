//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约往返测试
//! - 模拟 e2e 测试（无需 broker）
//! - 发布生命周期回归

#[cfg(test)]
mod contract_tests {
    use contracts::{wire, TelemetryReport, Waypoint};

    #[test]
    fn test_wire_contract_round_trip() {
        // 验证 contracts crate 的编码往返
        let report = TelemetryReport {
            vehicle_id: "vehicle-001".to_string(),
            position: Waypoint::new(28.7041, 77.1025),
            speed: 11.5,
            heading: 132.4,
            timestamp_ms: 1_700_000_000_000,
            sequence: 42,
        };

        let payload = wire::encode_report(&report).unwrap();
        let decoded = wire::decode_position(&payload).unwrap();

        assert_eq!(decoded.id, report.vehicle_id);
        assert_eq!(decoded.seq, report.sequence);
        assert_eq!(decoded.timestamp, report.timestamp_ms);
        let pos = decoded.pos.unwrap();
        assert_eq!(pos.lat, report.position.lat);
        assert_eq!(pos.lon, report.position.lon);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::io::Write;
    use std::time::Duration;

    use contracts::{wire, RouteSource, Waypoint};
    use motion::MotionModel;
    use publisher::{
        AgentConfig, MockTransport, MockTransportConfig, PublishAgent, VehicleSession,
    };
    use route::{default_route, FileRouteSource, RouteStore};
    use tokio::sync::watch;

    fn agent_config(max_ticks: Option<u64>) -> AgentConfig {
        AgentConfig {
            vehicle_id: "vehicle-001".to_string(),
            topic: "geovan/positions".to_string(),
            interval: Duration::from_millis(1),
            max_ticks,
        }
    }

    fn build_agent(
        transport: MockTransport,
        route: RouteStore,
        max_ticks: Option<u64>,
    ) -> PublishAgent<MockTransport> {
        PublishAgent::new(
            agent_config(max_ticks),
            route,
            VehicleSession::new(MotionModel::seeded(7)),
            transport,
        )
    }

    /// End-to-end test: route -> motion -> agent -> mock transport
    ///
    /// 验证完整的发布流程：
    /// 1. 内置路线循环推进
    /// 2. 编码后的报告带连续序列号
    /// 3. 速度/航向落在模型范围内
    #[tokio::test]
    async fn test_e2e_mock_publish_run() {
        let mock = MockTransport::new();
        let handle = mock.clone();
        let agent = build_agent(mock, RouteStore::new(default_route()), Some(5));
        let metrics = agent.metrics();

        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let result = tokio::time::timeout(Duration::from_secs(5), agent.run(shutdown_rx)).await;
        assert!(result.is_ok(), "Agent run timed out");
        result.unwrap().unwrap();

        let published = handle.published();
        assert_eq!(published.len(), 5);

        // 内置路线: A -> B -> A, 循环
        let expected_lats = [28.7041, 28.6139, 28.7041, 28.7041, 28.6139];

        for (i, (topic, payload)) in published.iter().enumerate() {
            assert_eq!(topic, "geovan/positions");

            let decoded = wire::decode_position(payload).unwrap();
            assert_eq!(decoded.id, "vehicle-001");
            assert_eq!(decoded.seq, i as u32);
            assert_eq!(decoded.pos.unwrap().lat, expected_lats[i]);
            assert!((8.0..=15.0).contains(&decoded.speed));
            assert!((0.0..360.0).contains(&decoded.heading));
            assert!(decoded.timestamp > 0);
        }

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.publish_count, 5);
        assert_eq!(snapshot.failure_count, 0);
        assert_eq!(snapshot.skipped_count, 0);
        assert_eq!(snapshot.latency_ms.count, 5);

        assert_eq!(handle.disconnect_count(), 1);
    }

    /// Injected publish failure: sequence gap, position retried
    #[tokio::test]
    async fn test_e2e_failure_leaves_sequence_gap() {
        let mock = MockTransport::with_config(MockTransportConfig {
            fail_publishes: vec![1],
            ..Default::default()
        });
        let handle = mock.clone();
        let agent = build_agent(mock, RouteStore::new(default_route()), Some(4));
        let metrics = agent.metrics();

        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        tokio::time::timeout(Duration::from_secs(5), agent.run(shutdown_rx))
            .await
            .expect("Agent run timed out")
            .unwrap();

        let published = handle.published();
        assert_eq!(published.len(), 3);

        let decoded: Vec<_> = published
            .iter()
            .map(|(_, payload)| wire::decode_position(payload).unwrap())
            .collect();

        // 第二个 tick 失败: 序列号 1 被消耗, 位置下一个 tick 重发
        let seqs: Vec<u32> = decoded.iter().map(|p| p.seq).collect();
        assert_eq!(seqs, vec![0, 2, 3]);

        let lats: Vec<f64> = decoded.iter().map(|p| p.pos.unwrap().lat).collect();
        assert_eq!(lats, vec![28.7041, 28.6139, 28.7041]);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.publish_count, 3);
        assert_eq!(snapshot.failure_count, 1);
    }

    /// Route file drives the published positions
    #[tokio::test]
    async fn test_e2e_route_file_drives_positions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1.5,2.5").unwrap();
        writeln!(file, "oops").unwrap();
        writeln!(file, "3.5,4.5").unwrap();
        file.flush().unwrap();

        let mut store = RouteStore::new(default_route());
        let loaded = FileRouteSource::new(file.path()).load().unwrap();
        store.replace(loaded).unwrap();
        assert_eq!(store.len(), 2);

        let mock = MockTransport::new();
        let handle = mock.clone();
        let agent = build_agent(mock, store, Some(3));

        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        tokio::time::timeout(Duration::from_secs(5), agent.run(shutdown_rx))
            .await
            .expect("Agent run timed out")
            .unwrap();

        let positions: Vec<(f64, f64)> = handle
            .published()
            .iter()
            .map(|(_, payload)| {
                let pos = wire::decode_position(payload).unwrap().pos.unwrap();
                (pos.lat, pos.lon)
            })
            .collect();

        // 两点路线循环, 畸形行已被跳过
        assert_eq!(positions, vec![(1.5, 2.5), (3.5, 4.5), (1.5, 2.5)]);
    }

    /// Shutdown signal stops the loop without waiting out the interval
    #[tokio::test]
    async fn test_e2e_shutdown_stops_promptly() {
        let mock = MockTransport::new();
        let handle = mock.clone();

        let mut config = agent_config(None);
        config.interval = Duration::from_secs(30);
        let agent = PublishAgent::new(
            config,
            RouteStore::new(vec![Waypoint::new(10.0, 20.0)]),
            VehicleSession::new(MotionModel::seeded(7)),
            mock,
        );
        let metrics = agent.metrics();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(agent.run(shutdown_rx));

        // 模拟 CLI 的信号任务: 延迟后触发关闭
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let _ = shutdown_tx.send(true);
        });

        let result = tokio::time::timeout(Duration::from_secs(2), task).await;
        assert!(result.is_ok(), "Shutdown waited out the publish interval");
        result.unwrap().unwrap().unwrap();

        assert_eq!(handle.published().len(), 1);
        assert_eq!(handle.disconnect_count(), 1);
        assert_eq!(metrics.snapshot().publish_count, 1);
    }
}
