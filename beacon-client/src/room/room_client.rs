use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use beacon_core::{JoinResponse, JoinResult, RoomError, RoomInfo};

use crate::room::RoomApi;

/// HTTP implementation of [`RoomApi`] against a room server exposing
/// `POST /join/{room}`, `POST /leave/{room}/{client}` and
/// `POST /message/{room}/{client}`.
pub struct RoomClient {
    http: reqwest::Client,
    base_url: String,
}

impl RoomClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RoomApi for RoomClient {
    async fn join(&self, room_id: &str) -> Result<RoomInfo, RoomError> {
        let url = format!("{}/join/{}", self.base_url, room_id);
        debug!(%url, "join request");

        let response = self
            .http
            .post(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| RoomError::Transport(e.to_string()))?;

        let join: JoinResponse = response
            .json()
            .await
            .map_err(|e| RoomError::Decode(e.to_string()))?;

        match join.result {
            JoinResult::Full => Err(RoomError::Full),
            JoinResult::Success => join.params.unwrap_or_default().into_room_info(),
        }
    }

    async fn leave(&self, room_id: &str, client_id: &str) -> Result<(), RoomError> {
        let url = format!("{}/leave/{}/{}", self.base_url, room_id, client_id);
        debug!(%url, "leave request");

        self.http
            .post(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| RoomError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn send_message(
        &self,
        payload: Bytes,
        room_id: &str,
        client_id: &str,
    ) -> Result<(), RoomError> {
        let url = format!("{}/message/{}/{}", self.base_url, room_id, client_id);
        debug!(%url, len = payload.len(), "message request");

        self.http
            .post(&url)
            .body(payload)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| RoomError::Transport(e.to_string()))?;
        Ok(())
    }
}
