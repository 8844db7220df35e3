/// Externally observable session conditions. Each is reported exactly once
/// per occurrence; consumers treat them as state notifications, not as a
/// request/response protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Joined {
        room_id: String,
        client_id: String,
        is_initiator: bool,
    },

    /// The room already had both participants; pick another room.
    RoomFull,

    /// The session settled back into idle, whatever the trigger (explicit
    /// leave, peer bye, transport failure).
    Left,

    /// One human-readable line per failure. Never fatal to the session.
    Error(String),
}
