/// Events a signaling transport delivers to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The connection is open and writable.
    Connected,

    /// The connection is gone. Terminal for this connection instance; a
    /// fresh `connect` is required to get a new one.
    Disconnected,

    /// One raw text frame from the wire.
    Message(String),
}
