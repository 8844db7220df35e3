use crate::integration::{create_test_session, init_tracing};
use crate::utils::{EngineCall, MockRoomServer, next_event, wait_until};

use beacon_client::SessionEvent;

#[tokio::test]
async fn initiator_join_registers_then_offers() {
    init_tracing();

    let mut ts = create_test_session(MockRoomServer::success(true, vec![]));

    ts.handle.join("42").await.expect("join accepted");
    assert_eq!(
        next_event(&mut ts.events).await,
        SessionEvent::Joined {
            room_id: "42".to_string(),
            client_id: "client-1".to_string(),
            is_initiator: true,
        }
    );

    // once the socket reports connected the session registers, then offers
    let engine = ts.engine.clone();
    assert!(
        wait_until(|| {
            let engine = engine.clone();
            async move { engine.calls().await.contains(&EngineCall::CreateOffer) }
        })
        .await,
        "create_offer was never triggered"
    );

    assert_eq!(ts.transport.connect_count(), 1);
    let frames = ts.transport.sent_frames().await;
    let registers: Vec<_> = frames
        .iter()
        .filter(|f| f.contains(r#""cmd":"register""#))
        .collect();
    assert_eq!(registers.len(), 1, "exactly one register frame: {frames:?}");
    assert!(registers[0].contains(r#""roomid":"42""#));
    assert!(registers[0].contains(r#""clientid":"client-1""#));

    // the local offer is relayed through the room gateway
    let room = ts.room.clone();
    assert!(
        wait_until(|| {
            let room = room.clone();
            async move {
                room.sent_payloads()
                    .await
                    .iter()
                    .any(|p| p.contains(r#""type":"offer""#) && p.contains("mock-offer"))
            }
        })
        .await,
        "offer was never relayed"
    );
}
