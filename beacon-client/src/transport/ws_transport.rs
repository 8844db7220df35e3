use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

use crate::transport::{SignalTransport, TransportError, TransportEvent};

/// WebSocket implementation of [`SignalTransport`]. The socket is split
/// into a writer task fed by an mpsc handle and a reader task that forwards
/// text frames into the owner's event channel. Either side going away ends
/// the connection and emits `Disconnected` once.
pub struct WsTransport {
    writer: Arc<Mutex<Option<mpsc::UnboundedSender<Message>>>>,
}

impl WsTransport {
    pub fn new() -> Self {
        Self {
            writer: Arc::new(Mutex::new(None)),
        }
    }
}

impl Default for WsTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalTransport for WsTransport {
    async fn connect(
        &self,
        url: &str,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<(), TransportError> {
        let (stream, _) = connect_async(url)
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        info!(%url, "signaling socket open");

        let (mut sink, mut source) = stream.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
        *self.writer.lock().await = Some(tx);

        let _ = events.send(TransportEvent::Connected).await;

        tokio::spawn(async move {
            while let Some(frame) = rx.recv().await {
                if sink.send(frame).await.is_err() {
                    break;
                }
            }
            let _ = sink.close().await;
        });

        let writer = Arc::clone(&self.writer);
        tokio::spawn(async move {
            while let Some(frame) = source.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        if events.send(TransportEvent::Message(text)).await.is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(_)) | Err(_) => break,
                    Ok(_) => {}
                }
            }
            writer.lock().await.take();
            let _ = events.send(TransportEvent::Disconnected).await;
        });

        Ok(())
    }

    async fn send(&self, payload: Bytes) {
        let guard = self.writer.lock().await;
        let Some(tx) = guard.as_ref() else {
            warn!("signaling socket not connected, dropping outbound frame");
            return;
        };
        let text = String::from_utf8_lossy(&payload).into_owned();
        if tx.send(Message::Text(text)).is_err() {
            warn!("signaling socket writer gone, dropping outbound frame");
        }
    }

    async fn disconnect(&self) {
        if self.writer.lock().await.take().is_none() {
            debug!("signaling socket already disconnected");
        }
    }
}
