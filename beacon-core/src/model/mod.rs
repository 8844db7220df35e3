mod codec;
mod room;
mod signal;

pub use codec::{MessageCodec, bye_payload, register_payload};
pub use room::{JoinParams, JoinResponse, JoinResult, RoomInfo};
pub use signal::{IceCandidate, IceServerConfig, SdpKind, SignalMessage};
