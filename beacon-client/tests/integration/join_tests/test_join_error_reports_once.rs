use crate::integration::{create_test_session, init_tracing};
use crate::utils::{MockRoomServer, next_event, settle};

use beacon_client::SessionEvent;

#[tokio::test]
async fn join_failure_surfaces_one_error_and_resets() {
    init_tracing();

    let mut ts = create_test_session(MockRoomServer::failing());

    ts.handle.join("42").await.expect("join accepted");
    match next_event(&mut ts.events).await {
        SessionEvent::Error(msg) => assert!(msg.contains("connection refused"), "{msg}"),
        other => panic!("expected error event, got {other:?}"),
    }

    settle().await;
    assert_eq!(ts.transport.connect_count(), 0);
    assert!(ts.events.try_recv().is_err(), "failure reported exactly once");

    ts.handle.join("42").await.expect("session settled into idle");
}
