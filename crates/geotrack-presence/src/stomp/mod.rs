//! STOMP 1.2 client over WebSocket.
//!
//! A background task owns the socket. Callers talk to it through
//! [`StompClient`] commands and receive [`StompEvent`]s on a channel.
//! There is no reconnect: when the socket closes the task reports
//! `Disconnected` and exits.

mod client;
mod connection;
mod frame;
mod handler;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::StompClient;
#[cfg(test)]
pub(crate) use client::StompCommandRecorder;
pub use frame::{commands, StompFrame};
pub use types::{StompConfig, StompEvent};
