use serde::Deserialize;

use crate::error::RoomError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum JoinResult {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FULL")]
    Full,
}

/// The raw join response as the room server sends it. Every param is
/// optional on the wire; validation happens in [`JoinParams::into_room_info`].
#[derive(Debug, Deserialize)]
pub struct JoinResponse {
    pub result: JoinResult,
    #[serde(default)]
    pub params: Option<JoinParams>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JoinParams {
    pub room_id: Option<String>,
    pub wss_url: Option<String>,
    pub wss_post_url: Option<String>,
    pub client_id: Option<String>,
    pub is_initiator: Option<String>,
    pub messages: Option<Vec<String>>,
}

/// A validated, joined room: the fields a session needs to run signaling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    pub room_id: String,
    pub client_id: String,
    pub wss_url: String,
    pub is_initiator: bool,
    /// Signaling traffic that happened before we connected, oldest first.
    pub messages: Vec<String>,
}

impl JoinParams {
    pub fn into_room_info(self) -> Result<RoomInfo, RoomError> {
        let room_id = require(self.room_id, "room_id")?;
        let client_id = require(self.client_id, "client_id")?;
        let wss_url = require(self.wss_url, "wss_url")?;

        Ok(RoomInfo {
            room_id,
            client_id,
            wss_url,
            // the server sends the flag as the string "true"/"false"
            is_initiator: self.is_initiator.as_deref() == Some("true"),
            messages: self.messages.unwrap_or_default(),
        })
    }
}

fn require(field: Option<String>, name: &str) -> Result<String, RoomError> {
    field.ok_or_else(|| RoomError::Decode(format!("join response missing {name}")))
}
