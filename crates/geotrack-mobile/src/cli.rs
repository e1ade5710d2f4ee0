//! Command-line arguments and how they override the loaded config.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use geotrack_config::{GeotrackConfig, TransportKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportArg {
    /// POST to the topic's REST resource.
    Rest,
    /// SEND over a STOMP WebSocket session.
    Stomp,
}

impl From<TransportArg> for TransportKind {
    fn from(arg: TransportArg) -> Self {
        match arg {
            TransportArg::Rest => TransportKind::Rest,
            TransportArg::Stomp => TransportKind::Stomp,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "geotrack-mobile", about = "Share your position on the trackers topic")]
pub struct Args {
    /// Config file. Defaults to the platform config directory.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Alias shown to monitors. Prompted for when not set anywhere.
    #[arg(short, long)]
    pub alias: Option<String>,

    #[arg(long, value_enum)]
    pub transport: Option<TransportArg>,

    /// REST topic resource, used by the rest transport.
    #[arg(long)]
    pub topic_url: Option<String>,

    /// STOMP WebSocket URL, used by the stomp transport.
    #[arg(long)]
    pub url: Option<String>,

    #[arg(long)]
    pub login: Option<String>,

    #[arg(long)]
    pub passcode: Option<String>,

    #[arg(long)]
    pub destination: Option<String>,

    /// Read fixes from a file instead of stdin.
    #[arg(long)]
    pub replay: Option<PathBuf>,

    /// Delay between consecutive fixes, in milliseconds.
    #[arg(long)]
    pub interval_ms: Option<u64>,
}

impl Args {
    /// Copy every flag that was given into `config`.
    pub fn apply(&self, config: &mut GeotrackConfig) {
        if let Some(alias) = &self.alias {
            config.publisher.alias = Some(alias.clone());
        }
        if let Some(transport) = self.transport {
            config.publisher.transport = transport.into();
        }
        if let Some(interval_ms) = self.interval_ms {
            config.publisher.interval_ms = interval_ms;
        }
        if let Some(topic_url) = &self.topic_url {
            config.rest.topic_url = topic_url.clone();
        }
        if let Some(url) = &self.url {
            config.broker.url = url.clone();
        }
        if let Some(login) = &self.login {
            config.broker.login = login.clone();
        }
        if let Some(passcode) = &self.passcode {
            config.broker.passcode = passcode.clone();
        }
        if let Some(destination) = &self.destination {
            config.broker.destination = destination.clone();
        }
    }
}
