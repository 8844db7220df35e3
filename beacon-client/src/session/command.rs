use tokio::sync::oneshot;

use beacon_core::{RoomError, RoomInfo, SessionError, SignalMessage};

/// Commands funneled into the session actor. Session state is only ever
/// touched on the actor task.
pub enum SessionCommand {
    /// Caller wants to join a room. The reply settles as soon as the state
    /// check passes; the join outcome itself arrives as a `SessionEvent`.
    Join {
        room_id: String,
        reply: oneshot::Sender<Result<(), SessionError>>,
    },

    /// The in-flight join call finished.
    JoinResolved(Result<RoomInfo, RoomError>),

    /// Caller wants an outbound signal relayed through the gateway.
    Send {
        message: SignalMessage,
        reply: oneshot::Sender<Result<(), SessionError>>,
    },

    /// Caller wants out. A no-op when already idle.
    Leave,
}
