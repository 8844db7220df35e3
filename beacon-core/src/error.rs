use thiserror::Error;

/// Failures talking to the room coordination service.
#[derive(Debug, Clone, Error)]
pub enum RoomError {
    /// The room already has its two participants.
    #[error("room is full")]
    Full,

    /// The request never completed (connect, send, or non-success status).
    #[error("room server transport error: {0}")]
    Transport(String),

    /// The response arrived but could not be understood.
    #[error("room server decode error: {0}")]
    Decode(String),
}

/// Contract violations surfaced to the caller of a session handle. None of
/// these are fatal to the session itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session already joined to a room")]
    AlreadyJoined,

    #[error("session is not joined to a room")]
    NotJoined,

    #[error("session task has shut down")]
    Closed,
}
