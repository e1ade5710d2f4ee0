//! geotrack-monitor: subscribe to the trackers topic and show where every
//! participant is.
//!
//! Connects to a STOMP broker over WebSocket, subscribes once, and keeps
//! one marker per alias on a terminal map until Ctrl-C.

mod terminal;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use geotrack_config::{load_config, validation, GeotrackConfig, LogLevel};
use geotrack_presence::{MonitorOptions, MonitorSession, StompClient, StompConfig};
use tracing::{error, info};

use crate::terminal::TerminalMapFactory;

#[derive(Parser)]
#[command(name = "geotrack-monitor", about = "Watch participant positions on the trackers topic")]
struct Args {
    /// Config file. Defaults to the platform config directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// STOMP WebSocket URL.
    #[arg(long)]
    url: Option<String>,

    #[arg(long)]
    login: Option<String>,

    #[arg(long)]
    passcode: Option<String>,

    /// Topic destination to subscribe to.
    #[arg(long)]
    destination: Option<String>,

    /// Map zoom level (0-21).
    #[arg(long)]
    zoom: Option<u32>,
}

impl Args {
    fn apply(self, config: &mut GeotrackConfig) {
        if let Some(url) = self.url {
            config.broker.url = url;
        }
        if let Some(login) = self.login {
            config.broker.login = login;
        }
        if let Some(passcode) = self.passcode {
            config.broker.passcode = passcode;
        }
        if let Some(destination) = self.destination {
            config.broker.destination = destination;
        }
        if let Some(zoom) = self.zoom {
            config.map.zoom = zoom;
        }
    }
}

fn init_tracing(level: LogLevel) {
    let directive = level.as_directive();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("geotrack_monitor={directive},geotrack_presence={directive}").into()
            }),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("geotrack-monitor: {e}");
            return ExitCode::FAILURE;
        }
    };
    args.apply(&mut config);
    init_tracing(config.logging.level);

    if let Err(e) = validation::validate(&config) {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    info!(broker = ?config.broker, "Start geolocation monitoring");

    let (client, mut events) = StompClient::connect(StompConfig {
        url: config.broker.url.clone(),
        login: config.broker.login.clone(),
        passcode: config.broker.passcode.clone(),
        host: None,
    });
    let mut session = MonitorSession::new(
        TerminalMapFactory::stdout(),
        MonitorOptions {
            destination: config.broker.destination.clone(),
            zoom: config.map.zoom,
        },
    );

    let mut closing = false;
    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                if session.handle_event(event, &client).await.is_break() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c(), if !closing => {
                closing = true;
                session.disconnect(&client).await;
            }
        }
    }

    if !session.has_connected() {
        error!(url = %config.broker.url, "Could not establish a STOMP session");
        return ExitCode::FAILURE;
    }

    info!(skipped = session.skipped(), "Goodbye!");
    ExitCode::SUCCESS
}
