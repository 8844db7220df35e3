use crate::integration::{create_test_session, init_tracing};
use crate::utils::{MockRoomServer, next_event, settle, wait_until};

use beacon_client::SessionEvent;
use beacon_core::IceCandidate;

#[tokio::test]
async fn local_candidates_are_relayed_once_a_room_is_active() {
    init_tracing();

    let mut ts = create_test_session(MockRoomServer::success(false, vec![]));

    // gathered before any room exists: dropped, not queued
    ts.engine.emit_local_candidate(IceCandidate {
        sdp_mline_index: 0,
        sdp_mid: None,
        sdp: "too-early".to_string(),
    });
    settle().await;
    assert!(ts.room.sent_payloads().await.is_empty());

    ts.handle.join("42").await.expect("join accepted");
    assert!(matches!(
        next_event(&mut ts.events).await,
        SessionEvent::Joined { .. }
    ));

    ts.engine.emit_local_candidate(IceCandidate {
        sdp_mline_index: 1,
        sdp_mid: Some("audio".to_string()),
        sdp: "cand-local".to_string(),
    });

    let room = ts.room.clone();
    assert!(
        wait_until(|| {
            let room = room.clone();
            async move {
                room.sent_payloads().await.iter().any(|p| {
                    p.contains(r#""type":"candidate""#)
                        && p.contains("cand-local")
                        && p.contains(r#""label":"1""#)
                        && p.contains(r#""id":"audio""#)
                })
            }
        })
        .await,
        "local candidate never reached the gateway"
    );
}
