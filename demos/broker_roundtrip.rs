//! Broker Roundtrip Example
//!
//! Spins up a minimal in-process broker that accepts one TCP connection
//! and decodes every frame it receives, then points the agent at it.
//! Demonstrates the full wire path: encode, frame, publish, decode.
//!
//! Run with: cargo run --bin broker_roundtrip

use std::time::Duration;

use contracts::wire;
use motion::MotionModel;
use publisher::{AgentConfig, BrokerTransport, PublishAgent, VehicleSession};
use route::{default_route, RouteStore};
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Broker Roundtrip Demo");

    // ==== Stage 1: Start the in-process broker ====
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let endpoint = listener.local_addr()?.to_string();
    info!(endpoint = %endpoint, "Demo broker listening");

    let broker_handle = tokio::spawn(async move {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Accept failed: {:?}", e);
                return 0u64;
            }
        };
        info!(peer = %peer, "Agent connected");
        consume_frames(stream).await
    });

    // ==== Stage 2: Run the agent against it ====
    let config = AgentConfig {
        vehicle_id: "vehicle-001".to_string(),
        topic: "geovan/positions".to_string(),
        interval: Duration::from_millis(200),
        max_ticks: Some(5),
    };

    let agent = PublishAgent::new(
        config,
        RouteStore::new(default_route()),
        VehicleSession::new(MotionModel::new()),
        BrokerTransport::new(endpoint),
    );

    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::time::timeout(Duration::from_secs(30), agent.run(shutdown_rx)).await??;

    // ==== Stage 3: Report what the broker saw ====
    match tokio::time::timeout(Duration::from_secs(5), broker_handle).await {
        Ok(Ok(received)) => info!(received, "Demo completed successfully"),
        Ok(Err(e)) => warn!("Broker task error: {:?}", e),
        Err(_) => warn!("Broker task timed out"),
    }

    Ok(())
}

/// Read length-prefixed frames until the agent disconnects
async fn consume_frames(mut stream: TcpStream) -> u64 {
    let mut received = 0u64;

    loop {
        let topic_len = match stream.read_u16().await {
            Ok(len) => len as usize,
            // Clean EOF when the agent disconnects
            Err(_) => break,
        };

        let mut topic = vec![0u8; topic_len];
        if stream.read_exact(&mut topic).await.is_err() {
            break;
        }

        let payload_len = match stream.read_u32().await {
            Ok(len) => len as usize,
            Err(_) => break,
        };

        let mut payload = vec![0u8; payload_len];
        if stream.read_exact(&mut payload).await.is_err() {
            break;
        }

        received += 1;

        match wire::decode_position(&payload) {
            Ok(position) => {
                let (lat, lon) = position
                    .pos
                    .map(|p| (p.lat, p.lon))
                    .unwrap_or((f64::NAN, f64::NAN));
                info!(
                    topic = %String::from_utf8_lossy(&topic),
                    vehicle = %position.id,
                    seq = position.seq,
                    lat,
                    lon,
                    speed = format!("{:.2}", position.speed),
                    heading = format!("{:.1}", position.heading),
                    "Frame received"
                );
            }
            Err(e) => warn!(bytes = payload_len, "Undecodable payload: {:?}", e),
        }
    }

    received
}
