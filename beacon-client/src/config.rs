/// Client-wide configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the room coordination service.
    pub server_url: String,
    /// Peel the double-JSON `"msg"` envelope off inbound signal frames.
    /// The reference room server wraps every relayed payload this way.
    pub unwrap_envelope: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "https://appr.tc".to_string(),
            unwrap_envelope: true,
        }
    }
}
