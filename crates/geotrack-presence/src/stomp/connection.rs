//! Background WebSocket connection task.

use futures_util::{Sink, SinkExt, StreamExt};
use geotrack_common::{Result, TrackerError};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use super::frame::{commands, StompFrame};
use super::handler::{command_frame, connect_frame, frame_to_event, WS_SUBPROTOCOLS};
use super::types::{StompCommand, StompConfig, StompEvent};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ---------------------------------------------------------------------------
// Connection Task
// ---------------------------------------------------------------------------

/// Owns the socket for the lifetime of one connection.
///
/// Commands and inbound frames are handled one at a time. The task ends
/// after DISCONNECT, when the broker closes the socket, or when every
/// client handle is dropped.
pub(crate) async fn connection_task(
    config: StompConfig,
    event_tx: mpsc::Sender<StompEvent>,
    mut command_rx: mpsc::Receiver<StompCommand>,
) {
    info!(url = %config.url, "Connecting to STOMP broker");

    let socket = match open_socket(&config).await {
        Ok(socket) => socket,
        Err(e) => {
            error!(error = %e, "Failed to connect to STOMP broker");
            let _ = event_tx.send(StompEvent::from_error(&e)).await;
            let _ = event_tx.send(StompEvent::Disconnected).await;
            return;
        }
    };

    let (mut ws_write, mut ws_read) = socket.split();

    if let Err(e) = write_frame(&mut ws_write, &connect_frame(&config)).await {
        error!(error = %e, "Failed to send CONNECT");
        let _ = event_tx.send(StompEvent::from_error(&e)).await;
        let _ = event_tx.send(StompEvent::Disconnected).await;
        return;
    }

    loop {
        tokio::select! {
            cmd = command_rx.recv() => {
                let Some(cmd) = cmd else {
                    debug!("All STOMP client handles dropped");
                    let _ = ws_write.send(WsMessage::Close(None)).await;
                    break;
                };
                if let Err(e) = write_frame(&mut ws_write, &command_frame(&cmd)).await {
                    warn!(error = %e, "Failed to write STOMP frame");
                    let _ = event_tx.send(StompEvent::from_error(&e)).await;
                    break;
                }
                if matches!(cmd, StompCommand::Disconnect { .. }) {
                    let _ = ws_write.send(WsMessage::Close(None)).await;
                    info!("Disconnected from STOMP broker");
                    break;
                }
            }
            msg = ws_read.next() => match msg {
                Some(Ok(WsMessage::Text(text))) => {
                    handle_text(text.as_str(), &event_tx).await;
                }
                Some(Ok(WsMessage::Binary(data))) => match std::str::from_utf8(&data) {
                    Ok(text) => handle_text(text, &event_tx).await,
                    Err(_) => warn!(len = data.len(), "Dropping non-UTF-8 STOMP frame"),
                },
                Some(Ok(WsMessage::Close(_))) | None => {
                    info!("STOMP broker closed connection");
                    break;
                }
                Some(Err(e)) => {
                    warn!(error = %e, "WebSocket error");
                    let _ = event_tx
                        .send(StompEvent::from_error(&TrackerError::Transport(e.to_string())))
                        .await;
                    break;
                }
                Some(Ok(_)) => {}
            }
        }
    }

    let _ = event_tx.send(StompEvent::Disconnected).await;
}

async fn open_socket(config: &StompConfig) -> Result<Socket> {
    let mut request = config
        .url
        .as_str()
        .into_client_request()
        .map_err(|e| TrackerError::Transport(format!("invalid broker url: {e}")))?;
    request.headers_mut().insert(
        "Sec-WebSocket-Protocol",
        HeaderValue::from_static(WS_SUBPROTOCOLS),
    );

    let (socket, response) = tokio_tungstenite::connect_async(request)
        .await
        .map_err(|e| TrackerError::Transport(format!("connection failed: {e}")))?;

    debug!(
        subprotocol = ?response.headers().get("Sec-WebSocket-Protocol"),
        "WebSocket handshake complete"
    );
    Ok(socket)
}

async fn write_frame<S>(sink: &mut S, frame: &StompFrame) -> Result<()>
where
    S: Sink<WsMessage> + Unpin,
    S::Error: std::fmt::Display,
{
    sink.send(WsMessage::Text(frame.encode().into()))
        .await
        .map_err(|e| TrackerError::Transport(e.to_string()))
}

async fn handle_text(text: &str, event_tx: &mpsc::Sender<StompEvent>) {
    let frame = match StompFrame::decode(text) {
        Ok(Some(frame)) => frame,
        Ok(None) => return,
        Err(e) => {
            warn!(error = %e, "Unparseable STOMP frame");
            return;
        }
    };

    if frame.command == commands::CONNECTED {
        info!(version = ?frame.get("version"), "STOMP session established");
    }

    if let Some(event) = frame_to_event(&frame) {
        let _ = event_tx.send(event).await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::super::testing::{TestBroker, ALICE_AT_10_20};
    use super::super::StompClient;
    use super::*;

    async fn next_event(events: &mut mpsc::Receiver<StompEvent>) -> Option<StompEvent> {
        tokio::time::timeout(Duration::from_secs(5), events.recv())
            .await
            .expect("no STOMP event within 5s")
    }

    #[tokio::test]
    async fn full_session_against_local_broker() {
        let broker = TestBroker::start().await;
        let (client, mut events) = StompClient::connect(StompConfig {
            url: broker.url.clone(),
            ..StompConfig::default()
        });

        assert_eq!(
            next_event(&mut events).await,
            Some(StompEvent::Connected {
                version: Some("1.2".into()),
                server: Some("test-broker".into()),
            })
        );

        let id = client.subscribe("jms.topic.trackers").await.unwrap();
        match next_event(&mut events).await {
            Some(StompEvent::Message {
                subscription,
                destination,
                body,
                ..
            }) => {
                assert_eq!(subscription, id);
                assert_eq!(destination.as_deref(), Some("jms.topic.trackers"));
                assert_eq!(body, ALICE_AT_10_20);
            }
            other => panic!("expected MESSAGE, got {other:?}"),
        }

        let departure = r#"{"alias":"alice","position":null}"#;
        client
            .send("jms.topic.trackers", departure.into(), "application/json")
            .await
            .unwrap();
        client.disconnect().await.unwrap();
        assert_eq!(next_event(&mut events).await, Some(StompEvent::Disconnected));
        assert_eq!(next_event(&mut events).await, None);

        let frames = broker.frames.await.unwrap();
        let names: Vec<&str> = frames.iter().map(|f| f.command.as_str()).collect();
        assert_eq!(names, ["CONNECT", "SUBSCRIBE", "SEND", "DISCONNECT"]);

        assert_eq!(frames[0].get("login"), Some("guest"));
        assert_eq!(frames[0].get("host"), Some("127.0.0.1"));
        assert_eq!(frames[1].get("id"), Some(id.as_str()));
        assert_eq!(frames[2].get("content-type"), Some("application/json"));
        assert_eq!(frames[2].body, departure);
        assert!(frames[3].get("receipt").is_some());

        assert!(client.send("jms.topic.trackers", "{}".into(), "application/json").await.is_err());
    }

    #[tokio::test]
    async fn unreachable_broker_reports_error_then_disconnected() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let (_client, mut events) = StompClient::connect(StompConfig {
            url: format!("ws://{addr}/stomp"),
            ..StompConfig::default()
        });

        assert!(matches!(
            next_event(&mut events).await,
            Some(StompEvent::Error { .. })
        ));
        assert_eq!(next_event(&mut events).await, Some(StompEvent::Disconnected));
    }
}
