use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use beacon_core::{
    MessageCodec, RoomError, RoomInfo, SdpKind, SessionError, SignalMessage, bye_payload,
    register_payload,
};

use crate::buffer::CandidateBuffer;
use crate::engine::{EngineEvent, PeerEngine};
use crate::room::RoomApi;
use crate::session::{SessionCommand, SessionEvent};
use crate::transport::{SignalTransport, TransportEvent};

const COMMAND_BUFFER: usize = 64;
const TRANSPORT_BUFFER: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Idle,
    Joining,
    Joined,
    Leaving,
}

/// The room this session is currently a member of.
#[derive(Debug, Clone)]
struct ActiveRoom {
    room_id: String,
    client_id: String,
    is_initiator: bool,
}

/// Cloneable handle to a running [`SignalingSession`] actor.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// Join a room. Fails with `AlreadyJoined` unless the session is idle;
    /// the join outcome itself arrives as a [`SessionEvent`].
    pub async fn join(&self, room_id: impl Into<String>) -> Result<(), SessionError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(SessionCommand::Join {
                room_id: room_id.into(),
                reply,
            })
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)?
    }

    /// Relay an application-built signal through the room gateway. Fails
    /// with `NotJoined` when no room is active.
    pub async fn send_signal(&self, message: SignalMessage) -> Result<(), SessionError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(SessionCommand::Send { message, reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)?
    }

    /// Leave the current room. Silently a no-op when not joined.
    pub async fn leave(&self) {
        let _ = self.commands.send(SessionCommand::Leave).await;
    }
}

/// The signaling orchestrator. Owns room membership state, drives the room
/// gateway and the signaling transport, reorders remote candidates against
/// SDP application through the [`CandidateBuffer`], and relays everything
/// the peer engine produces back out through the gateway.
///
/// All of it runs on one task: commands from handles, transport events and
/// engine events funnel through the same `select!` loop, so no two
/// operations ever touch session state concurrently.
pub struct SignalingSession {
    commands: mpsc::Receiver<SessionCommand>,
    commands_tx: mpsc::Sender<SessionCommand>,
    transport_events: mpsc::Receiver<TransportEvent>,
    transport_events_tx: mpsc::Sender<TransportEvent>,
    engine_events: mpsc::UnboundedReceiver<EngineEvent>,
    events: mpsc::UnboundedSender<SessionEvent>,

    engine: Arc<dyn PeerEngine>,
    room: Arc<dyn RoomApi>,
    transport: Arc<dyn SignalTransport>,
    codec: MessageCodec,

    status: RoomStatus,
    active: Option<ActiveRoom>,
    buffer: CandidateBuffer,
    remote_description_applied: bool,
    has_local_description: bool,
}

impl SignalingSession {
    pub fn new(
        codec: MessageCodec,
        room: Arc<dyn RoomApi>,
        transport: Arc<dyn SignalTransport>,
        engine: Arc<dyn PeerEngine>,
        engine_events: mpsc::UnboundedReceiver<EngineEvent>,
    ) -> (
        SessionHandle,
        mpsc::UnboundedReceiver<SessionEvent>,
        Self,
    ) {
        let (commands_tx, commands) = mpsc::channel(COMMAND_BUFFER);
        let (transport_events_tx, transport_events) = mpsc::channel(TRANSPORT_BUFFER);
        let (events, events_rx) = mpsc::unbounded_channel();

        let handle = SessionHandle {
            commands: commands_tx.clone(),
        };
        let session = Self {
            commands,
            commands_tx,
            transport_events,
            transport_events_tx,
            engine_events,
            events,
            engine,
            room,
            transport,
            codec,
            status: RoomStatus::Idle,
            active: None,
            buffer: CandidateBuffer::new(),
            remote_description_applied: false,
            has_local_description: false,
        };
        (handle, events_rx, session)
    }

    pub async fn run(mut self) {
        info!("signaling session started");

        loop {
            tokio::select! {
                cmd = self.commands.recv() => {
                    match cmd {
                        Some(c) => self.handle_command(c).await,
                        None => {
                            info!("command channel closed, shutting down session");
                            break;
                        }
                    }
                }

                evt = self.transport_events.recv() => {
                    match evt {
                        Some(e) => self.handle_transport_event(e).await,
                        None => break,
                    }
                }

                evt = self.engine_events.recv() => {
                    match evt {
                        Some(e) => self.handle_engine_event(e).await,
                        None => {
                            warn!("engine event channel closed, shutting down session");
                            break;
                        }
                    }
                }
            }
        }

        info!("signaling session finished");
    }

    async fn handle_command(&mut self, cmd: SessionCommand) {
        match cmd {
            SessionCommand::Join { room_id, reply } => {
                if self.status != RoomStatus::Idle {
                    let _ = reply.send(Err(SessionError::AlreadyJoined));
                    return;
                }
                self.status = RoomStatus::Joining;
                let _ = reply.send(Ok(()));

                info!(room_id = %room_id, "joining room");
                let room = Arc::clone(&self.room);
                let commands = self.commands_tx.clone();
                tokio::spawn(async move {
                    let result = room.join(&room_id).await;
                    let _ = commands.send(SessionCommand::JoinResolved(result)).await;
                });
            }

            SessionCommand::JoinResolved(result) => self.handle_join_resolved(result).await,

            SessionCommand::Send { message, reply } => {
                if self.active.is_none() {
                    let _ = reply.send(Err(SessionError::NotJoined));
                    return;
                }
                let _ = reply.send(Ok(()));
                self.send_signal(&message);
            }

            SessionCommand::Leave => self.teardown(true).await,
        }
    }

    async fn handle_join_resolved(&mut self, result: Result<RoomInfo, RoomError>) {
        if self.status != RoomStatus::Joining {
            // leave() won the race; the join result is stale
            debug!("discarding join result, session no longer joining");
            return;
        }

        let info = match result {
            Ok(info) => info,
            Err(RoomError::Full) => {
                info!("room is full");
                self.status = RoomStatus::Idle;
                self.emit(SessionEvent::RoomFull);
                return;
            }
            Err(e) => {
                warn!("join failed: {e}");
                self.status = RoomStatus::Idle;
                self.emit(SessionEvent::Error(e.to_string()));
                return;
            }
        };

        info!(
            room_id = %info.room_id,
            client_id = %info.client_id,
            initiator = info.is_initiator,
            "joined room"
        );
        self.status = RoomStatus::Joined;
        self.active = Some(ActiveRoom {
            room_id: info.room_id.clone(),
            client_id: info.client_id.clone(),
            is_initiator: info.is_initiator,
        });
        self.emit(SessionEvent::Joined {
            room_id: info.room_id.clone(),
            client_id: info.client_id.clone(),
            is_initiator: info.is_initiator,
        });

        // Backlog first: everything the room relayed before we arrived is
        // applied, in order, before the live socket can deliver anything.
        for raw in &info.messages {
            self.handle_incoming(raw).await;
            if self.status != RoomStatus::Joined {
                // a buffered bye already ended the session
                return;
            }
        }

        self.connect_transport(&info.wss_url).await;
    }

    async fn connect_transport(&mut self, wss_url: &str) {
        if let Err(e) = self
            .transport
            .connect(wss_url, self.transport_events_tx.clone())
            .await
        {
            warn!("failed to open signaling socket: {e}");
            self.emit(SessionEvent::Error(e.to_string()));
            self.teardown(false).await;
        }
    }

    async fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Connected => self.handle_transport_connected().await,

            TransportEvent::Message(raw) => self.handle_incoming(&raw).await,

            TransportEvent::Disconnected => {
                if self.status == RoomStatus::Idle {
                    debug!("signaling socket closed after teardown");
                    return;
                }
                warn!("signaling socket disconnected");
                self.emit(SessionEvent::Error(
                    "signaling transport disconnected".to_string(),
                ));
                self.teardown(false).await;
            }
        }
    }

    async fn handle_transport_connected(&mut self) {
        let Some(active) = self.active.clone() else {
            return;
        };

        info!("signaling socket connected, registering");
        self.transport
            .send(register_payload(&active.room_id, &active.client_id))
            .await;

        if active.is_initiator {
            match self.engine.create_offer().await {
                Ok(sdp) => {
                    self.has_local_description = true;
                    self.send_signal(&SignalMessage::Offer { sdp });
                }
                Err(e) => {
                    error!("failed to create offer: {e}");
                    self.emit(SessionEvent::Error(e.to_string()));
                }
            }
        }
    }

    /// One decoded message, whether it came from the join backlog or the
    /// live socket.
    async fn handle_incoming(&mut self, raw: &str) {
        match self.codec.decode(raw) {
            SignalMessage::Candidate(candidate) => {
                debug!("received remote candidate");
                self.buffer.enqueue(candidate);
                self.drain_candidates().await;
            }

            SignalMessage::Offer { sdp } => {
                self.apply_remote_description(SdpKind::Offer, sdp).await;
            }

            SignalMessage::Answer { sdp } => {
                self.apply_remote_description(SdpKind::Answer, sdp).await;
            }

            SignalMessage::Bye => {
                info!("peer left the room");
                self.teardown(true).await;
            }

            SignalMessage::Unrecognized => {
                debug!("dropping unrecognized signal frame");
            }
        }
    }

    async fn apply_remote_description(&mut self, kind: SdpKind, sdp: String) {
        debug!(kind = kind.as_str(), "applying remote description");
        if let Err(e) = self.engine.apply_remote_description(kind, &sdp).await {
            warn!("failed to apply remote description: {e}");
            self.emit(SessionEvent::Error(e.to_string()));
            return;
        }
        self.remote_description_applied = true;
        self.drain_candidates().await;

        if kind == SdpKind::Offer && !self.has_local_description {
            match self.engine.create_answer().await {
                Ok(sdp) => {
                    self.has_local_description = true;
                    self.send_signal(&SignalMessage::Answer { sdp });
                }
                Err(e) => {
                    error!("failed to create answer: {e}");
                    self.emit(SessionEvent::Error(e.to_string()));
                }
            }
        }
    }

    async fn drain_candidates(&mut self) {
        for candidate in self.buffer.drain_if_ready(self.remote_description_applied) {
            if let Err(e) = self.engine.add_ice_candidate(candidate).await {
                warn!("failed to add remote candidate: {e}");
            }
        }
    }

    async fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::LocalCandidate(candidate) => {
                debug!("local candidate gathered");
                self.send_signal(&SignalMessage::Candidate(candidate));
            }
        }
    }

    /// Encode and relay one outbound signal. Fire-and-forget: a failed
    /// relay is logged and changes no session state.
    fn send_signal(&self, message: &SignalMessage) {
        let Some(active) = &self.active else {
            warn!("no active room, dropping outbound signal");
            return;
        };
        let Some(payload) = self.codec.encode(message) else {
            return;
        };
        self.post_payload(payload, &active.room_id, &active.client_id);
    }

    fn post_payload(&self, payload: Bytes, room_id: &str, client_id: &str) {
        let room = Arc::clone(&self.room);
        let room_id = room_id.to_string();
        let client_id = client_id.to_string();
        tokio::spawn(async move {
            if let Err(e) = room.send_message(payload, &room_id, &client_id).await {
                warn!("failed to relay signal message: {e}");
            }
        });
    }

    /// Best-effort goodbye, then unconditional local reset. The bye frame
    /// goes out before the socket closes, but nothing here waits for an
    /// acknowledgment: local teardown must never hinge on the peer or the
    /// relay answering. Already-idle calls are no-ops, so a repeated leave
    /// cannot double-close the engine.
    async fn teardown(&mut self, send_bye: bool) {
        if self.status == RoomStatus::Idle {
            debug!("leave requested while idle, ignoring");
            return;
        }
        self.status = RoomStatus::Leaving;

        if let Some(active) = self.active.take() {
            let room = Arc::clone(&self.room);
            tokio::spawn(async move {
                if let Err(e) = room.leave(&active.room_id, &active.client_id).await {
                    warn!("room leave request failed: {e}");
                }
            });

            if send_bye {
                self.transport.send(bye_payload()).await;
            }
        }

        self.transport.disconnect().await;
        if let Err(e) = self.engine.close().await {
            warn!("engine close failed: {e}");
        }

        self.buffer.clear();
        self.remote_description_applied = false;
        self.has_local_description = false;
        self.status = RoomStatus::Idle;
        info!("session reset to idle");
        self.emit(SessionEvent::Left);
    }

    fn emit(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            debug!("no session event listener");
        }
    }
}
