use bytes::Bytes;
use serde_json::{Map, Value, json};

use crate::model::signal::{IceCandidate, SignalMessage};

/// Parses and serializes signaling wire messages.
///
/// Some room servers wrap every payload one level deeper, as a JSON object
/// whose `"msg"` field holds the real message as a JSON-encoded *string*.
/// `unwrap_envelope` controls whether that envelope is peeled off; servers
/// that send bare objects decode the same either way.
#[derive(Debug, Clone)]
pub struct MessageCodec {
    unwrap_envelope: bool,
}

impl Default for MessageCodec {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MessageCodec {
    pub fn new(unwrap_envelope: bool) -> Self {
        Self { unwrap_envelope }
    }

    /// Decode one raw wire frame. Never fails: anything malformed or of an
    /// unknown type comes back as `SignalMessage::Unrecognized`.
    pub fn decode(&self, raw: &str) -> SignalMessage {
        let Ok(Value::Object(outer)) = serde_json::from_str::<Value>(raw) else {
            return SignalMessage::Unrecognized;
        };

        let effective = if self.unwrap_envelope && outer.contains_key("msg") {
            let Some(inner) = outer.get("msg").and_then(Value::as_str) else {
                return SignalMessage::Unrecognized;
            };
            match serde_json::from_str::<Value>(inner) {
                Ok(Value::Object(obj)) => obj,
                _ => return SignalMessage::Unrecognized,
            }
        } else {
            outer
        };

        match effective.get("type").and_then(Value::as_str) {
            Some("candidate") => SignalMessage::Candidate(decode_candidate(&effective)),
            Some("offer") => match effective.get("sdp").and_then(Value::as_str) {
                Some(sdp) => SignalMessage::Offer {
                    sdp: sdp.to_string(),
                },
                None => SignalMessage::Unrecognized,
            },
            Some("answer") => match effective.get("sdp").and_then(Value::as_str) {
                Some(sdp) => SignalMessage::Answer {
                    sdp: sdp.to_string(),
                },
                None => SignalMessage::Unrecognized,
            },
            Some("bye") => SignalMessage::Bye,
            _ => SignalMessage::Unrecognized,
        }
    }

    /// Encode an outbound message. `Bye` has a fixed literal form (see
    /// [`bye_payload`]); `Unrecognized` has no wire form and yields `None`.
    pub fn encode(&self, msg: &SignalMessage) -> Option<Bytes> {
        let value = match msg {
            SignalMessage::Offer { sdp } => json!({"type": "offer", "sdp": sdp}),
            SignalMessage::Answer { sdp } => json!({"type": "answer", "sdp": sdp}),
            SignalMessage::Candidate(c) => json!({
                // label travels as text for consumers that parse it that way
                "type": "candidate",
                "label": c.sdp_mline_index.to_string(),
                "id": c.sdp_mid,
                "candidate": c.sdp,
            }),
            SignalMessage::Bye => json!({"type": "bye"}),
            SignalMessage::Unrecognized => return None,
        };
        Some(Bytes::from(value.to_string()))
    }
}

/// `label` arrives either as a number or as a numeric string depending on
/// the server; either way an unparsable or absent value falls back to 0.
fn decode_candidate(obj: &Map<String, Value>) -> IceCandidate {
    let label = match obj.get("label") {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0) as i32,
        Some(Value::String(s)) => s.parse::<i32>().unwrap_or(0),
        _ => 0,
    };

    IceCandidate {
        sdp_mline_index: label,
        sdp_mid: obj.get("id").and_then(Value::as_str).map(str::to_string),
        sdp: obj
            .get("candidate")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}

/// The `register` control frame sent on the signaling socket right after it
/// opens, binding the connection to a room and client.
pub fn register_payload(room_id: &str, client_id: &str) -> Bytes {
    Bytes::from(
        json!({
            "cmd": "register",
            "roomid": room_id,
            "clientid": client_id,
        })
        .to_string(),
    )
}

/// The literal goodbye frame sent on the signaling socket during teardown.
pub fn bye_payload() -> Bytes {
    Bytes::from_static(br#"{"type":"bye"}"#)
}
