use async_trait::async_trait;
use thiserror::Error;

use beacon_core::{IceCandidate, SdpKind};

#[derive(Debug, Clone, Error)]
#[error("peer engine: {0}")]
pub struct EngineError(pub String);

/// Events the engine pushes back at the session.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// A locally gathered ICE candidate, ready to be relayed to the peer.
    LocalCandidate(IceCandidate),
}

/// The seam to the peer-connection engine that does the actual ICE, DTLS
/// and media work. The session only ever drives it through this surface;
/// candidates the engine gathers come back as [`EngineEvent`]s on the
/// channel the engine was constructed with.
#[async_trait]
pub trait PeerEngine: Send + Sync {
    async fn apply_remote_description(&self, kind: SdpKind, sdp: &str) -> Result<(), EngineError>;

    /// Create an offer and install it as the local description.
    async fn create_offer(&self) -> Result<String, EngineError>;

    /// Create an answer and install it as the local description.
    async fn create_answer(&self) -> Result<String, EngineError>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), EngineError>;

    async fn close(&self) -> Result<(), EngineError>;
}
