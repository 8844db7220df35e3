use async_trait::async_trait;
use bytes::Bytes;

use beacon_core::{RoomError, RoomInfo};

/// The room coordination service as the session sees it: three independent
/// request/response calls, none of which retry on their own.
#[async_trait]
pub trait RoomApi: Send + Sync {
    /// Join a room, returning the validated room parameters.
    async fn join(&self, room_id: &str) -> Result<RoomInfo, RoomError>;

    /// Announce departure. Best-effort; teardown never waits on it.
    async fn leave(&self, room_id: &str, client_id: &str) -> Result<(), RoomError>;

    /// Relay an encoded signal message to the other participant.
    async fn send_message(
        &self,
        payload: Bytes,
        room_id: &str,
        client_id: &str,
    ) -> Result<(), RoomError>;
}
