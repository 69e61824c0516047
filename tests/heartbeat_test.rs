//! Keep-alive timing, with tokio's paused clock.

mod common;

use std::time::Duration;

use common::TestHarness;
use parley::session::HEARTBEAT_PERIOD;
use parley::traits::SessionSignal;

const PING: &str = r#"{"action":"ping"}"#;

#[tokio::test(start_paused = true)]
async fn test_ping_sent_every_five_minutes_while_open() {
    let mut h = TestHarness::new();
    h.connect("ws://localhost:9999");
    h.open();

    tokio::time::advance(HEARTBEAT_PERIOD - Duration::from_secs(1)).await;
    tokio::task::yield_now().await;
    h.pump();
    assert!(h.connection().sent_frames().is_empty());

    tokio::time::advance(Duration::from_secs(1)).await;
    let signal = h.signal_rx.recv().await.unwrap();
    assert!(matches!(signal, SessionSignal::HeartbeatTick { .. }));
    h.app.handle_signal(signal);
    assert_eq!(h.connection().sent_frames(), vec![PING.to_string()]);

    tokio::time::advance(HEARTBEAT_PERIOD).await;
    let signal = h.signal_rx.recv().await.unwrap();
    h.app.handle_signal(signal);
    assert_eq!(h.connection().sent_frames().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_no_ping_after_close() {
    let mut h = TestHarness::new();
    h.connect("ws://localhost:9999");
    h.open();
    let conn = h.connection();
    h.server_closes(1001, "going away");
    assert!(!h.app.session.heartbeat_running());

    tokio::time::advance(HEARTBEAT_PERIOD * 3).await;
    tokio::task::yield_now().await;
    h.pump();
    assert!(conn.sent_frames().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_ping_failure_does_not_change_state() {
    let mut h = TestHarness::new();
    h.connect("ws://localhost:9999");
    h.open();
    h.connection().set_send_should_fail(true);
    let notices_before = h.notices().len();

    tokio::time::advance(HEARTBEAT_PERIOD).await;
    let signal = h.signal_rx.recv().await.unwrap();
    h.app.handle_signal(signal);

    assert!(h.app.session.lifecycle().is_open());
    assert_eq!(h.notices().len(), notices_before);
}
