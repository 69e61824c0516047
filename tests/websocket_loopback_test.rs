//! The tungstenite transport against a local server.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;

use parley::adapters::TungsteniteConnector;
use parley::traits::{Connector, EventSink, SessionSignal, TransportEvent};
use parley::websocket::WsClientConfig;

const TIMEOUT: Duration = Duration::from_secs(5);

async fn next_event(rx: &mut mpsc::UnboundedReceiver<SessionSignal>) -> TransportEvent {
    match tokio::time::timeout(TIMEOUT, rx.recv()).await {
        Ok(Some(SessionSignal::Transport { event, .. })) => event,
        other => panic!("Expected transport event, got {:?}", other),
    }
}

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    (listener, url)
}

#[tokio::test]
async fn test_roundtrip_and_user_close() {
    let (listener, url) = bind().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

        let first = ws.next().await.unwrap().unwrap();
        ws.send(Message::Text(
            r#"{"message":"echo","connectionId":"srv"}"#.to_string(),
        ))
        .await
        .unwrap();

        // Drain until the client's close completes
        while let Some(Ok(_)) = ws.next().await {}
        first
    });

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = TungsteniteConnector::new(WsClientConfig::default())
        .open(&url, EventSink::new(1, tx));

    assert_eq!(next_event(&mut rx).await, TransportEvent::Opened);

    handle
        .send_text(r#"{"action":"sendmessage","message":"hello"}"#.to_string())
        .unwrap();
    assert_eq!(
        next_event(&mut rx).await,
        TransportEvent::Message(r#"{"message":"echo","connectionId":"srv"}"#.to_string())
    );

    handle.close(1000, "User initiated disconnect");
    assert_eq!(
        next_event(&mut rx).await,
        TransportEvent::Closed {
            code: 1000,
            reason: "User initiated disconnect".to_string()
        }
    );

    let first = server.await.unwrap();
    assert_eq!(
        first,
        Message::Text(r#"{"action":"sendmessage","message":"hello"}"#.to_string())
    );
}

#[tokio::test]
async fn test_server_close_reports_code_and_reason() {
    let (listener, url) = bind().await;

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        ws.close(Some(CloseFrame {
            code: CloseCode::Away,
            reason: "idle timeout".into(),
        }))
        .await
        .unwrap();
        while let Some(Ok(_)) = ws.next().await {}
    });

    let (tx, mut rx) = mpsc::unbounded_channel();
    let _handle = TungsteniteConnector::new(WsClientConfig::default())
        .open(&url, EventSink::new(2, tx));

    assert_eq!(next_event(&mut rx).await, TransportEvent::Opened);
    assert_eq!(
        next_event(&mut rx).await,
        TransportEvent::Closed {
            code: 1001,
            reason: "idle timeout".to_string()
        }
    );
}

#[tokio::test]
async fn test_close_while_connecting_reports_abnormal_closure() {
    // Accepts TCP but never completes the WebSocket handshake
    let (listener, url) = bind().await;
    let _server = tokio::spawn(async move {
        let (_stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = TungsteniteConnector::new(WsClientConfig::default())
        .open(&url, EventSink::new(3, tx));
    handle.close(1000, "User initiated disconnect");

    assert_eq!(
        next_event(&mut rx).await,
        TransportEvent::Closed {
            code: 1006,
            reason: String::new()
        }
    );
}

#[tokio::test]
async fn test_close_completes_when_server_never_answers() {
    let (listener, url) = bind().await;
    let _server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let _ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        // Hold the socket open without ever reading from it
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = TungsteniteConnector::new(
        WsClientConfig::default().with_close_timeout(Duration::from_millis(300)),
    )
    .open(&url, EventSink::new(4, tx));

    assert_eq!(next_event(&mut rx).await, TransportEvent::Opened);
    handle.close(1000, "User initiated disconnect");

    assert_eq!(
        next_event(&mut rx).await,
        TransportEvent::Closed {
            code: 1000,
            reason: "User initiated disconnect".to_string()
        }
    );
    assert!(handle.send_text("late".to_string()).is_err());
}
