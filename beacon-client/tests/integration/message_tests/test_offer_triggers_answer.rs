use crate::integration::{create_test_session, init_tracing};
use crate::utils::{EngineCall, MockRoomServer, next_event, settle, wait_until};

use beacon_client::SessionEvent;
use beacon_core::SdpKind;

#[tokio::test]
async fn remote_offer_makes_the_callee_answer() {
    init_tracing();

    let mut ts = create_test_session(MockRoomServer::success(false, vec![]));
    ts.handle.join("42").await.expect("join accepted");
    assert!(matches!(
        next_event(&mut ts.events).await,
        SessionEvent::Joined { .. }
    ));

    ts.transport
        .deliver(r#"{"type":"offer","sdp":"remote-offer"}"#)
        .await;

    let engine = ts.engine.clone();
    assert!(
        wait_until(|| {
            let engine = engine.clone();
            async move { engine.calls().await.contains(&EngineCall::CreateAnswer) }
        })
        .await,
        "no answer was created for the remote offer"
    );

    let calls = ts.engine.calls().await;
    assert!(
        calls.contains(&EngineCall::ApplyRemote(
            SdpKind::Offer,
            "remote-offer".to_string()
        )),
        "{calls:?}"
    );
    // the callee never initiates
    assert!(!calls.contains(&EngineCall::CreateOffer));

    // the answer is relayed through the gateway
    let room = ts.room.clone();
    assert!(
        wait_until(|| {
            let room = room.clone();
            async move {
                room.sent_payloads()
                    .await
                    .iter()
                    .any(|p| p.contains(r#""type":"answer""#) && p.contains("mock-answer"))
            }
        })
        .await
    );

    // a second offer (renegotiation) does not create a second answer: the
    // local description already exists
    ts.transport
        .deliver(r#"{"type":"offer","sdp":"remote-offer-2"}"#)
        .await;
    settle().await;
    let answers = ts
        .engine
        .calls()
        .await
        .iter()
        .filter(|c| matches!(c, EngineCall::CreateAnswer))
        .count();
    assert_eq!(answers, 1);
}
