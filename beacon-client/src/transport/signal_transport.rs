use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::transport::TransportEvent;

#[derive(Debug, Clone, Error)]
#[error("signaling socket: {0}")]
pub struct TransportError(pub String);

/// One bidirectional message connection for signaling traffic.
#[async_trait]
pub trait SignalTransport: Send + Sync {
    /// Open the connection against `url` and deliver [`TransportEvent`]s on
    /// `events`, starting with `Connected`.
    async fn connect(
        &self,
        url: &str,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<(), TransportError>;

    /// Write one frame. A logged no-op when not connected.
    async fn send(&self, payload: Bytes);

    /// Close the connection. Idempotent; no auto-reconnect.
    async fn disconnect(&self);
}
