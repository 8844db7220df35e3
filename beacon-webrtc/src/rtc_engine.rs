use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;

use beacon_client::engine::{EngineError, EngineEvent, PeerEngine};
use beacon_core::{IceCandidate, IceServerConfig, SdpKind};

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub ice_servers: Vec<IceServerConfig>,
}

/// [`PeerEngine`] over a real `RTCPeerConnection`.
///
/// The peer connection is public: media tracks and data channels are the
/// host's business, the signaling layer never touches them.
pub struct RtcEngine {
    pub peer_connection: Arc<RTCPeerConnection>,
}

impl RtcEngine {
    /// Build the peer connection and start forwarding locally gathered
    /// candidates as [`EngineEvent`]s on `event_tx`.
    pub async fn new(
        config: EngineConfig,
        event_tx: mpsc::UnboundedSender<EngineEvent>,
    ) -> Result<Self, EngineError> {
        let mut media_engine = MediaEngine::default();
        media_engine.register_default_codecs().map_err(engine_err)?;

        let registry =
            register_default_interceptors(Registry::new(), &mut media_engine).map_err(engine_err)?;

        let api = APIBuilder::new()
            .with_media_engine(media_engine)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: config
                .ice_servers
                .into_iter()
                .map(|server| RTCIceServer {
                    urls: server.urls,
                    username: server.username.unwrap_or_default(),
                    credential: server.credential.unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(api.new_peer_connection(rtc_config).await.map_err(engine_err)?);

        // Trickle ICE: every gathered candidate goes straight to the session.
        peer_connection.on_ice_candidate(Box::new(move |candidate: Option<RTCIceCandidate>| {
            let tx = event_tx.clone();
            Box::pin(async move {
                let Some(candidate) = candidate else { return };
                let Ok(json) = candidate.to_json() else {
                    warn!("failed to serialize local candidate");
                    return;
                };
                debug!("local candidate gathered");
                let _ = tx.send(EngineEvent::LocalCandidate(IceCandidate {
                    sdp_mline_index: i32::from(json.sdp_mline_index.unwrap_or(0)),
                    sdp_mid: json.sdp_mid,
                    sdp: json.candidate,
                }));
            })
        }));

        Ok(Self { peer_connection })
    }
}

#[async_trait]
impl PeerEngine for RtcEngine {
    async fn apply_remote_description(&self, kind: SdpKind, sdp: &str) -> Result<(), EngineError> {
        let description = match kind {
            SdpKind::Offer => RTCSessionDescription::offer(sdp.to_string()),
            SdpKind::Answer => RTCSessionDescription::answer(sdp.to_string()),
        }
        .map_err(engine_err)?;

        self.peer_connection
            .set_remote_description(description)
            .await
            .map_err(engine_err)
    }

    async fn create_offer(&self) -> Result<String, EngineError> {
        let offer = self
            .peer_connection
            .create_offer(None)
            .await
            .map_err(engine_err)?;
        self.peer_connection
            .set_local_description(offer.clone())
            .await
            .map_err(engine_err)?;
        Ok(offer.sdp)
    }

    async fn create_answer(&self) -> Result<String, EngineError> {
        let answer = self
            .peer_connection
            .create_answer(None)
            .await
            .map_err(engine_err)?;
        self.peer_connection
            .set_local_description(answer.clone())
            .await
            .map_err(engine_err)?;
        Ok(answer.sdp)
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), EngineError> {
        let init = RTCIceCandidateInit {
            candidate: candidate.sdp,
            sdp_mid: candidate.sdp_mid,
            sdp_mline_index: Some(u16::try_from(candidate.sdp_mline_index).unwrap_or(0)),
            username_fragment: None,
        };
        self.peer_connection
            .add_ice_candidate(init)
            .await
            .map_err(engine_err)
    }

    async fn close(&self) -> Result<(), EngineError> {
        self.peer_connection.close().await.map_err(engine_err)
    }
}

fn engine_err(e: impl std::fmt::Display) -> EngineError {
    EngineError(e.to_string())
}
