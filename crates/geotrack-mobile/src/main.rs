//! geotrack-mobile: publish this device's position under an alias.
//!
//! Location fixes are read line by line from stdin (or a replay file) and
//! published to the trackers topic through the REST topic resource or a
//! STOMP session. End of input or Ctrl-C announces departure and exits.

mod cli;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use geotrack_common::TrackerError;
use geotrack_config::{load_config, validation, GeotrackConfig, LogLevel, TransportKind};
use geotrack_presence::{
    LocationWatch, PresenceTransport, PublishOutcome, PublisherSession, ReqwestTopicHttp,
    RestTopicPublisher, StompConfig, StompPublisher,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

use crate::cli::Args;

fn init_tracing(level: LogLevel) {
    let directive = level.as_directive();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("geotrack_mobile={directive},geotrack_presence={directive}").into()
            }),
        )
        .init();
}

/// Ask for an alias on stdout and read one line from `input`.
async fn prompt_alias<R>(input: &mut R) -> Result<String, TrackerError>
where
    R: AsyncBufRead + Unpin,
{
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Enter your unique alias: ").await?;
    stdout.flush().await?;

    let mut line = String::new();
    input.read_line(&mut line).await?;
    let alias = line.trim();
    if alias.is_empty() {
        return Err(TrackerError::Other("an alias is required".into()));
    }
    Ok(alias.to_string())
}

fn build_transport(config: &GeotrackConfig) -> Box<dyn PresenceTransport> {
    match config.publisher.transport {
        TransportKind::Rest => Box::new(RestTopicPublisher::new(
            ReqwestTopicHttp::new(),
            config.rest.topic_url.clone(),
        )),
        TransportKind::Stomp => Box::new(StompPublisher::new(
            StompConfig {
                url: config.broker.url.clone(),
                login: config.broker.login.clone(),
                passcode: config.broker.passcode.clone(),
                host: None,
            },
            config.broker.destination.clone(),
        )),
    }
}

async fn run(args: Args, config: GeotrackConfig) -> Result<(), TrackerError> {
    let mut stdin = BufReader::new(tokio::io::stdin());
    let alias = match config.publisher.alias.clone() {
        Some(alias) => alias,
        None => prompt_alias(&mut stdin).await?,
    };

    let interval = match config.publisher.interval_ms {
        0 => None,
        ms => Some(Duration::from_millis(ms)),
    };
    let (watch, mut fixes) = match &args.replay {
        Some(path) => {
            let file = tokio::fs::File::open(path).await?;
            info!(path = %path.display(), "Replaying location fixes");
            LocationWatch::watch(BufReader::new(file), interval)
        }
        None => LocationWatch::watch(stdin, interval),
    };

    let mut session = PublisherSession::new(alias);
    session.set_watch(watch);
    info!(alias = %session.alias(), transport = ?config.publisher.transport, "Start publishing");

    let transport = build_transport(&config);
    let mut pending = Some(tokio::spawn(async move {
        let mut transport = transport;
        transport.prepare().await.map(|()| transport)
    }));

    loop {
        tokio::select! {
            prepared = async {
                match pending.as_mut() {
                    Some(handle) => handle.await,
                    None => std::future::pending().await,
                }
            } => {
                pending = None;
                match prepared {
                    Ok(Ok(transport)) => {
                        session.attach(transport).await;
                    }
                    Ok(Err(e)) => warn!(error = %e, "Topic unavailable, positions will not be published"),
                    Err(e) => error!(error = %e, "Transport setup task failed"),
                }
            }
            event = fixes.recv() => {
                let Some(event) = event else { break };
                if let PublishOutcome::LocationUnavailable(message) = session.handle_location(event).await {
                    println!("{message}");
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    if let Some(handle) = pending.take() {
        handle.abort();
    }
    session.finish().await;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("geotrack-mobile: {e}");
            return ExitCode::FAILURE;
        }
    };
    args.apply(&mut config);
    init_tracing(config.logging.level);

    if let Err(e) = validation::validate(&config) {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
