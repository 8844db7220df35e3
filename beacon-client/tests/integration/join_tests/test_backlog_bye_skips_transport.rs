use crate::integration::{create_test_session, init_tracing};
use crate::utils::{MockRoomServer, next_event, settle, wait_until};

use beacon_client::SessionEvent;

#[tokio::test]
async fn bye_in_backlog_ends_session_before_transport_opens() {
    init_tracing();

    // the reference server envelopes every relayed payload
    let backlog = vec![r#"{"msg":"{\"type\":\"bye\"}"}"#.to_string()];
    let mut ts = create_test_session(MockRoomServer::success(false, backlog));

    ts.handle.join("42").await.expect("join accepted");
    assert!(matches!(
        next_event(&mut ts.events).await,
        SessionEvent::Joined { .. }
    ));
    assert_eq!(next_event(&mut ts.events).await, SessionEvent::Left);

    settle().await;
    assert_eq!(
        ts.transport.connect_count(),
        0,
        "backlog bye must stop the transport from ever opening"
    );
    assert_eq!(ts.engine.close_count().await, 1);

    let room = ts.room.clone();
    assert!(
        wait_until(|| {
            let room = room.clone();
            async move { room.leave_count().await == 1 }
        })
        .await,
        "leave request never reached the room server"
    );
}
