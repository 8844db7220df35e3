pub mod buffer;
pub mod config;
pub mod engine;
pub mod room;
pub mod session;
pub mod transport;

pub use buffer::CandidateBuffer;
pub use config::ClientConfig;
pub use engine::{EngineError, EngineEvent, PeerEngine};
pub use room::{RoomApi, RoomClient};
pub use session::{RoomStatus, SessionCommand, SessionEvent, SessionHandle, SignalingSession};
pub use transport::{SignalTransport, TransportError, TransportEvent, WsTransport};
