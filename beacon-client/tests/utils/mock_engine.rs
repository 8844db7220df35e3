use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use beacon_client::engine::{EngineError, EngineEvent, PeerEngine};
use beacon_core::{IceCandidate, SdpKind};

/// Everything the session asked the engine to do, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    ApplyRemote(SdpKind, String),
    CreateOffer,
    CreateAnswer,
    AddCandidate(IceCandidate),
    Close,
}

/// Mock `PeerEngine` that records every call and lets tests hand-feed
/// engine events into the session.
#[derive(Clone)]
pub struct MockEngine {
    calls: Arc<Mutex<Vec<EngineCall>>>,
    events: mpsc::UnboundedSender<EngineEvent>,
}

impl MockEngine {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<EngineEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                events,
            },
            rx,
        )
    }

    /// Pretend the engine gathered a local candidate.
    pub fn emit_local_candidate(&self, candidate: IceCandidate) {
        let _ = self.events.send(EngineEvent::LocalCandidate(candidate));
    }

    pub async fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().await.clone()
    }

    pub async fn close_count(&self) -> usize {
        self.calls()
            .await
            .iter()
            .filter(|c| matches!(c, EngineCall::Close))
            .count()
    }

    pub async fn added_candidate_sdps(&self) -> Vec<String> {
        self.calls()
            .await
            .iter()
            .filter_map(|c| match c {
                EngineCall::AddCandidate(candidate) => Some(candidate.sdp.clone()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl PeerEngine for MockEngine {
    async fn apply_remote_description(&self, kind: SdpKind, sdp: &str) -> Result<(), EngineError> {
        self.calls
            .lock()
            .await
            .push(EngineCall::ApplyRemote(kind, sdp.to_string()));
        Ok(())
    }

    async fn create_offer(&self) -> Result<String, EngineError> {
        self.calls.lock().await.push(EngineCall::CreateOffer);
        Ok("v=0 mock-offer".to_string())
    }

    async fn create_answer(&self) -> Result<String, EngineError> {
        self.calls.lock().await.push(EngineCall::CreateAnswer);
        Ok("v=0 mock-answer".to_string())
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), EngineError> {
        self.calls
            .lock()
            .await
            .push(EngineCall::AddCandidate(candidate));
        Ok(())
    }

    async fn close(&self) -> Result<(), EngineError> {
        self.calls.lock().await.push(EngineCall::Close);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_engine_records_calls_in_order() {
        let (engine, _rx) = MockEngine::new();
        engine
            .apply_remote_description(SdpKind::Answer, "sdp")
            .await
            .unwrap();
        engine.close().await.unwrap();

        let calls = engine.calls().await;
        assert_eq!(
            calls,
            vec![
                EngineCall::ApplyRemote(SdpKind::Answer, "sdp".to_string()),
                EngineCall::Close,
            ]
        );
    }
}
