//! Outgoing frame construction and incoming frame classification.

use tracing::{debug, warn};

use super::frame::{commands, StompFrame};
use super::types::{StompCommand, StompConfig, StompEvent};

/// Versions offered in CONNECT and on the WebSocket handshake.
pub(crate) const ACCEPT_VERSION: &str = "1.0,1.1,1.2";
pub(crate) const WS_SUBPROTOCOLS: &str = "v12.stomp, v11.stomp, v10.stomp";

pub(crate) fn connect_frame(config: &StompConfig) -> StompFrame {
    StompFrame::new(commands::CONNECT)
        .header("accept-version", ACCEPT_VERSION)
        .header("host", config.virtual_host())
        .header("login", config.login.as_str())
        .header("passcode", config.passcode.as_str())
        .header("heart-beat", "0,0")
}

pub(crate) fn command_frame(cmd: &StompCommand) -> StompFrame {
    match cmd {
        StompCommand::Subscribe { id, destination } => StompFrame::new(commands::SUBSCRIBE)
            .header("id", id.as_str())
            .header("destination", destination.as_str())
            .header("ack", "auto"),
        StompCommand::Unsubscribe { id } => {
            StompFrame::new(commands::UNSUBSCRIBE).header("id", id.as_str())
        }
        StompCommand::Send {
            destination,
            body,
            content_type,
        } => StompFrame::new(commands::SEND)
            .header("destination", destination.as_str())
            .header("content-type", content_type.as_str())
            .with_body(body.as_str()),
        StompCommand::Disconnect { receipt } => {
            StompFrame::new(commands::DISCONNECT).header("receipt", receipt.as_str())
        }
    }
}

/// Map an incoming frame to the event the application sees.
pub(crate) fn frame_to_event(frame: &StompFrame) -> Option<StompEvent> {
    match frame.command.as_str() {
        commands::CONNECTED => Some(StompEvent::Connected {
            version: frame.get("version").map(str::to_string),
            server: frame.get("server").map(str::to_string),
        }),
        commands::MESSAGE => {
            let Some(subscription) = frame.get("subscription") else {
                warn!("MESSAGE frame without subscription header");
                return None;
            };
            Some(StompEvent::Message {
                subscription: subscription.to_string(),
                destination: frame.get("destination").map(str::to_string),
                message_id: frame.get("message-id").map(str::to_string),
                body: frame.body.clone(),
            })
        }
        commands::RECEIPT => frame.get("receipt-id").map(|id| StompEvent::Receipt {
            id: id.to_string(),
        }),
        commands::ERROR => Some(StompEvent::Error {
            message: frame.get("message").unwrap_or("broker error").to_string(),
            details: frame.body.clone(),
        }),
        other => {
            debug!(command = %other, "Unhandled STOMP frame");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_frame_carries_credentials() {
        let frame = connect_frame(&StompConfig::default());
        assert_eq!(frame.command, "CONNECT");
        assert_eq!(frame.get("accept-version"), Some("1.0,1.1,1.2"));
        assert_eq!(frame.get("host"), Some("localhost"));
        assert_eq!(frame.get("login"), Some("guest"));
        assert_eq!(frame.get("passcode"), Some("guest"));
        assert_eq!(frame.get("heart-beat"), Some("0,0"));
    }

    #[test]
    fn send_command_builds_send_frame() {
        let frame = command_frame(&StompCommand::Send {
            destination: "jms.topic.trackers".into(),
            body: "{}".into(),
            content_type: "application/json".into(),
        });
        assert_eq!(frame.command, "SEND");
        assert_eq!(frame.get("destination"), Some("jms.topic.trackers"));
        assert_eq!(frame.get("content-type"), Some("application/json"));
        assert_eq!(frame.body, "{}");
    }

    #[test]
    fn disconnect_requests_receipt() {
        let frame = command_frame(&StompCommand::Disconnect {
            receipt: "bye".into(),
        });
        assert_eq!(frame.encode(), "DISCONNECT\nreceipt:bye\n\n\0");
    }

    #[test]
    fn message_frame_becomes_message_event() {
        let frame = StompFrame::new("MESSAGE")
            .header("subscription", "sub-1")
            .header("destination", "jms.topic.trackers")
            .header("message-id", "m-9")
            .with_body("{\"alias\":\"a\"}");
        assert_eq!(
            frame_to_event(&frame),
            Some(StompEvent::Message {
                subscription: "sub-1".into(),
                destination: Some("jms.topic.trackers".into()),
                message_id: Some("m-9".into()),
                body: "{\"alias\":\"a\"}".into(),
            })
        );
    }

    #[test]
    fn message_without_subscription_is_dropped() {
        let frame = StompFrame::new("MESSAGE").with_body("x");
        assert_eq!(frame_to_event(&frame), None);
    }

    #[test]
    fn error_frame_becomes_error_event() {
        let frame = StompFrame::new("ERROR")
            .header("message", "bad credentials")
            .with_body("login failed");
        assert_eq!(
            frame_to_event(&frame),
            Some(StompEvent::Error {
                message: "bad credentials".into(),
                details: "login failed".into(),
            })
        );
    }

    #[test]
    fn connected_frame_reports_version() {
        let frame = StompFrame::new("CONNECTED").header("version", "1.2");
        assert_eq!(
            frame_to_event(&frame),
            Some(StompEvent::Connected {
                version: Some("1.2".into()),
                server: None,
            })
        );
    }
}
