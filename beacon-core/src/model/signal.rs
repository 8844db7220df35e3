use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

/// A single ICE candidate as carried on the signaling wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceCandidate {
    pub sdp_mline_index: i32,
    pub sdp_mid: Option<String>,
    pub sdp: String,
}

/// Which half of the SDP exchange a description belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdpKind {
    Offer,
    Answer,
}

impl SdpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SdpKind::Offer => "offer",
            SdpKind::Answer => "answer",
        }
    }
}

/// One decoded signaling message. `Unrecognized` covers everything the
/// codec could not make sense of; the protocol is best-effort and such
/// messages are dropped, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalMessage {
    Candidate(IceCandidate),
    Offer { sdp: String },
    Answer { sdp: String },
    Bye,
    Unrecognized,
}
