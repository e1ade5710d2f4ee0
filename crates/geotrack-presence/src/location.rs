//! Line-oriented location feed standing in for a device geolocation watch.
//!
//! Each non-blank line is one fix: `lat,lon`, `lat lon`, or a JSON
//! [`Position`]. Lines starting with `#` are ignored. Lines that cannot be
//! turned into a valid position are reported as `Unavailable`.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::protocol::Position;

/// Status shown when no position can be determined.
pub const UNAVAILABLE_MESSAGE: &str = "Unable to determine your location.";

/// One notification from the location source.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    Fix(Position),
    Unavailable(String),
}

/// Handle to a running location watch. Dropping it does not stop the
/// watch; call [`clear`](Self::clear).
pub struct LocationWatch {
    handle: JoinHandle<()>,
}

impl LocationWatch {
    /// Start reading fixes from `reader`, waiting `interval` between
    /// consecutive fixes when given.
    pub fn watch<R>(reader: R, interval: Option<Duration>) -> (Self, mpsc::Receiver<LocationEvent>)
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (event_tx, event_rx) = mpsc::channel(64);
        let handle = tokio::spawn(read_fixes(reader, interval, event_tx));
        (Self { handle }, event_rx)
    }

    /// Stop listening for location changes.
    pub fn clear(self) {
        self.handle.abort();
        debug!("Location watch cleared");
    }
}

async fn read_fixes<R>(reader: R, interval: Option<Duration>, event_tx: mpsc::Sender<LocationEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut first = true;

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Location source failed");
                let _ = event_tx
                    .send(LocationEvent::Unavailable(e.to_string()))
                    .await;
                break;
            }
        };

        let event = match parse_fix(&line) {
            None => continue,
            Some(Ok(mut position)) => {
                if let Some(interval) = interval.filter(|_| !first) {
                    tokio::time::sleep(interval).await;
                }
                first = false;
                position.timestamp.get_or_insert_with(now_millis);
                LocationEvent::Fix(position)
            }
            Some(Err(reason)) => {
                debug!(line = %line, reason = %reason, "Unusable location line");
                LocationEvent::Unavailable(reason)
            }
        };

        if event_tx.send(event).await.is_err() {
            break;
        }
    }
}

/// Parse one feed line. `None` for blank and comment lines.
pub fn parse_fix(line: &str) -> Option<Result<Position, String>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let position = if line.starts_with('{') {
        serde_json::from_str::<Position>(line).map_err(|e| format!("invalid position JSON: {e}"))
    } else {
        parse_pair(line)
    };

    Some(position.and_then(|p| {
        if p.is_valid() {
            Ok(p)
        } else {
            Err(format!(
                "coordinates out of range: {}, {}",
                p.coords.latitude, p.coords.longitude
            ))
        }
    }))
}

fn parse_pair(line: &str) -> Result<Position, String> {
    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty());
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected \"lat,lon\", got {line:?}"));
    };
    let latitude: f64 = lat.parse().map_err(|_| format!("bad latitude {lat:?}"))?;
    let longitude: f64 = lon.parse().map_err(|_| format!("bad longitude {lon:?}"))?;
    Ok(Position::new(latitude, longitude))
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
