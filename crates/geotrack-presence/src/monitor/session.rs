//! Monitor session: one subscription, one lazily created map surface.

use std::ops::ControlFlow;

use geotrack_common::Result;
use tracing::{debug, error, info, warn};

use crate::map::{MapFactory, MapOptions, MapSurface};
use crate::protocol::PresenceMessage;
use crate::registry::{Applied, MarkerRegistry};
use crate::stomp::{StompClient, StompEvent};

/// Settings for a monitor session.
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    /// Topic to subscribe to.
    pub destination: String,
    /// Zoom applied when the map is created.
    pub zoom: u32,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            destination: "jms.topic.trackers".into(),
            zoom: 14,
        }
    }
}

type MarkerOf<F> = <<F as MapFactory>::Surface as MapSurface>::Marker;

/// Session state for the monitoring role.
///
/// Owns the registry and the map surface. All updates go through
/// [`handle_event`](Self::handle_event) from a single task.
pub struct MonitorSession<F: MapFactory> {
    factory: F,
    options: MonitorOptions,
    surface: Option<F::Surface>,
    registry: MarkerRegistry<MarkerOf<F>>,
    subscription: Option<String>,
    connected: bool,
    skipped: u64,
}

impl<F: MapFactory> MonitorSession<F> {
    pub fn new(factory: F, options: MonitorOptions) -> Self {
        Self {
            factory,
            options,
            surface: None,
            registry: MarkerRegistry::new(),
            subscription: None,
            connected: false,
            skipped: 0,
        }
    }

    pub fn registry(&self) -> &MarkerRegistry<MarkerOf<F>> {
        &self.registry
    }

    /// The map surface, once the first position has arrived.
    pub fn surface(&self) -> Option<&F::Surface> {
        self.surface.as_ref()
    }

    pub fn subscription(&self) -> Option<&str> {
        self.subscription.as_deref()
    }

    /// Whether the broker ever accepted our CONNECT.
    pub fn has_connected(&self) -> bool {
        self.connected
    }

    /// Number of inbound messages dropped as malformed.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Handle one transport event. Returns `Break` once the connection is gone.
    pub async fn handle_event(&mut self, event: StompEvent, client: &StompClient) -> ControlFlow<()> {
        match event {
            StompEvent::Connected { version, server } => {
                info!(version = ?version, server = ?server, "Connected to STOMP broker");
                self.connected = true;
                if self.subscription.is_none() {
                    match client.subscribe(&self.options.destination).await {
                        Ok(id) => {
                            info!(destination = %self.options.destination, id = %id, "Subscribed");
                            self.subscription = Some(id);
                        }
                        Err(e) => error!(error = %e, "Subscribe failed"),
                    }
                }
            }
            StompEvent::Message {
                subscription, body, ..
            } => {
                if self.subscription.as_deref() != Some(subscription.as_str()) {
                    debug!(subscription = %subscription, "Message for another subscription");
                    return ControlFlow::Continue(());
                }
                if let Err(e) = self.handle_payload(&body) {
                    self.skipped += 1;
                    warn!(error = %e, "Skipping malformed presence message");
                }
            }
            StompEvent::Receipt { id } => {
                debug!(id = %id, "Receipt");
            }
            StompEvent::Error { message, details } => {
                error!(message = %message, details = %details, "Broker error");
            }
            StompEvent::Disconnected => {
                self.subscription = None;
                info!(active = self.registry.len(), "Disconnected");
                if let Some(surface) = self.surface.as_mut() {
                    self.registry.clear(surface);
                }
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Decode a message body and apply it.
    pub fn handle_payload(&mut self, body: &str) -> Result<Applied> {
        let message = PresenceMessage::from_json(body)?;
        Ok(self.apply(message))
    }

    /// Apply one presence message to the registry and the map.
    pub fn apply(&mut self, message: PresenceMessage) -> Applied {
        let PresenceMessage { alias, position } = message;

        let applied = match position {
            None => match self.surface.as_mut() {
                Some(surface) => self.registry.remove(surface, &alias),
                None => Applied::UnknownDeparture,
            },
            Some(position) => {
                let at = position.lat_lng();
                let factory = &mut self.factory;
                let zoom = self.options.zoom;
                let surface = self.surface.get_or_insert_with(|| {
                    info!(center = %at, zoom, "Creating map");
                    factory.create(MapOptions { center: at, zoom })
                });
                self.registry.upsert(surface, &alias, at)
            }
        };

        match applied {
            Applied::Created | Applied::Moved => info!(alias = %alias, "{alias} has moved!"),
            Applied::Removed => info!(alias = %alias, "{alias} has left"),
            Applied::UnknownDeparture => {}
        }
        applied
    }

    /// Unsubscribe and close the connection. The `Disconnected` event follows.
    pub async fn disconnect(&mut self, client: &StompClient) {
        if let Some(id) = self.subscription.take() {
            if let Err(e) = client.unsubscribe(&id).await {
                debug!(error = %e, "Unsubscribe not sent");
            }
        }
        if let Err(e) = client.disconnect().await {
            debug!(error = %e, "Disconnect not sent");
        }
    }
}
