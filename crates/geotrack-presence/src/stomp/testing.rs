//! In-process STOMP broker for client tests.

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::{HeaderValue, StatusCode};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::WebSocketStream;

use super::frame::{commands, StompFrame};

pub(crate) const ALICE_AT_10_20: &str =
    r#"{"alias":"alice","position":{"coords":{"latitude":10.0,"longitude":20.0}}}"#;

/// Accepts a single WebSocket client. Answers CONNECT with CONNECTED and
/// every SUBSCRIBE with one MESSAGE carrying [`ALICE_AT_10_20`].
/// `frames` resolves to everything the client sent once it goes away.
pub(crate) struct TestBroker {
    pub(crate) url: String,
    pub(crate) frames: JoinHandle<Vec<StompFrame>>,
}

impl TestBroker {
    pub(crate) async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let frames = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let ws = tokio_tungstenite::accept_hdr_async(stream, select_subprotocol)
                .await
                .unwrap();
            serve(ws).await
        });
        Self {
            url: format!("ws://{addr}/stomp"),
            frames,
        }
    }
}

fn select_subprotocol(req: &Request, mut resp: Response) -> Result<Response, ErrorResponse> {
    let offered = req
        .headers()
        .get("Sec-WebSocket-Protocol")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !offered.split(',').any(|p| p.trim() == "v12.stomp") {
        let mut err = ErrorResponse::new(Some("v12.stomp not offered".into()));
        *err.status_mut() = StatusCode::BAD_REQUEST;
        return Err(err);
    }
    resp.headers_mut()
        .insert("Sec-WebSocket-Protocol", HeaderValue::from_static("v12.stomp"));
    Ok(resp)
}

async fn serve(mut ws: WebSocketStream<TcpStream>) -> Vec<StompFrame> {
    let mut received = Vec::new();
    while let Some(Ok(msg)) = ws.next().await {
        let text = match msg {
            WsMessage::Text(text) => text,
            WsMessage::Close(_) => break,
            _ => continue,
        };
        let Ok(Some(frame)) = StompFrame::decode(text.as_str()) else {
            continue;
        };

        let reply = match frame.command.as_str() {
            commands::CONNECT => Some(
                StompFrame::new(commands::CONNECTED)
                    .header("version", "1.2")
                    .header("server", "test-broker"),
            ),
            commands::SUBSCRIBE => Some(
                StompFrame::new(commands::MESSAGE)
                    .header("subscription", frame.get("id").unwrap_or_default())
                    .header("destination", frame.get("destination").unwrap_or_default())
                    .header("message-id", "m-1")
                    .with_body(ALICE_AT_10_20),
            ),
            _ => None,
        };
        received.push(frame);

        if let Some(reply) = reply {
            if ws.send(WsMessage::Text(reply.encode().into())).await.is_err() {
                break;
            }
        }
    }
    received
}
