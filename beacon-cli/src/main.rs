use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use beacon_client::{ClientConfig, RoomClient, SessionEvent, SignalingSession, WsTransport};
use beacon_core::{IceServerConfig, MessageCodec};
use beacon_webrtc::{EngineConfig, RtcEngine};

/// Public STUN servers used when none are given. Deployments should run
/// their own STUN/TURN infrastructure.
const DEFAULT_STUN_SERVERS: &[&str] = &[
    "stun:stun.l.google.com:19302",
    "stun:stun1.l.google.com:19302",
];

#[derive(Parser, Debug)]
#[command(name = "beacon", about = "Join a signaling room and negotiate a peer session")]
struct Args {
    /// Room identifier to join.
    #[arg(long)]
    room: String,

    /// Base URL of the room server.
    #[arg(long, default_value = "https://appr.tc")]
    server: String,

    /// STUN/TURN server URL for the peer engine. Repeatable.
    #[arg(long = "stun")]
    stun_servers: Vec<String>,

    /// Expect bare signal objects instead of the double-JSON envelope.
    #[arg(long)]
    no_envelope: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = ClientConfig {
        server_url: args.server.clone(),
        unwrap_envelope: !args.no_envelope,
    };

    let urls = if args.stun_servers.is_empty() {
        DEFAULT_STUN_SERVERS.iter().map(|s| s.to_string()).collect()
    } else {
        args.stun_servers.clone()
    };

    let (engine_tx, engine_rx) = mpsc::unbounded_channel();
    let engine = RtcEngine::new(
        EngineConfig {
            ice_servers: vec![IceServerConfig {
                urls,
                username: None,
                credential: None,
            }],
        },
        engine_tx,
    )
    .await
    .context("failed to build peer engine")?;

    // with no media attached the offer still needs an m-line to negotiate
    engine
        .peer_connection
        .create_data_channel("data", None)
        .await
        .context("failed to create data channel")?;

    let (handle, mut events, session) = SignalingSession::new(
        MessageCodec::new(config.unwrap_envelope),
        Arc::new(RoomClient::new(config.server_url.clone())),
        Arc::new(WsTransport::new()),
        Arc::new(engine),
        engine_rx,
    );
    tokio::spawn(session.run());

    handle
        .join(args.room.clone())
        .await
        .context("join rejected")?;
    info!(room = %args.room, "join requested");

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(SessionEvent::Joined { room_id, client_id, is_initiator }) => {
                        info!(room_id = %room_id, client_id = %client_id, initiator = is_initiator, "joined room");
                    }
                    Some(SessionEvent::RoomFull) => {
                        info!("room is full, pick another room");
                        break;
                    }
                    Some(SessionEvent::Error(message)) => info!("{message}"),
                    Some(SessionEvent::Left) => {
                        info!("session ended");
                        break;
                    }
                    None => break,
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("leaving room");
                handle.leave().await;
            }
        }
    }

    Ok(())
}
