//! Marker registry: one marker per participant alias.

use std::collections::HashMap;

use tracing::debug;

use crate::map::{LatLng, MapSurface};

/// Outcome of applying one presence update to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// First message for this alias; a marker was placed.
    Created,
    /// Existing marker repositioned.
    Moved,
    /// Departure; the marker was detached and the entry dropped.
    Removed,
    /// Departure for an alias with no marker. Nothing changed.
    UnknownDeparture,
}

struct Tracked<M> {
    marker: M,
    position: LatLng,
}

/// Maps each active alias to its marker handle and last known position.
///
/// Invariant: at most one marker per alias.
pub struct MarkerRegistry<M> {
    entries: HashMap<String, Tracked<M>>,
}

impl<M> MarkerRegistry<M> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Place a marker for a first-seen alias, or move the existing one.
    pub fn upsert<S>(&mut self, surface: &mut S, alias: &str, at: LatLng) -> Applied
    where
        S: MapSurface<Marker = M>,
    {
        if let Some(tracked) = self.entries.get_mut(alias) {
            surface.move_marker(&mut tracked.marker, at);
            tracked.position = at;
            return Applied::Moved;
        }

        let marker = surface.place_marker(at, &format!("{alias} is here"));
        self.entries.insert(
            alias.to_string(),
            Tracked {
                marker,
                position: at,
            },
        );
        Applied::Created
    }

    /// Drop the entry for `alias` and detach its marker.
    pub fn remove<S>(&mut self, surface: &mut S, alias: &str) -> Applied
    where
        S: MapSurface<Marker = M>,
    {
        match self.entries.remove(alias) {
            Some(tracked) => {
                surface.remove_marker(tracked.marker);
                Applied::Removed
            }
            None => {
                debug!(alias = %alias, "Departure for unknown alias");
                Applied::UnknownDeparture
            }
        }
    }

    /// Detach every marker.
    pub fn clear<S>(&mut self, surface: &mut S)
    where
        S: MapSurface<Marker = M>,
    {
        for (_, tracked) in self.entries.drain() {
            surface.remove_marker(tracked.marker);
        }
    }

    pub fn position(&self, alias: &str) -> Option<LatLng> {
        self.entries.get(alias).map(|t| t.position)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.entries.contains_key(alias)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M> Default for MarkerRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::testing::{MapOp, RecordedMarker, RecordingSurface};

    fn setup() -> (MarkerRegistry<RecordedMarker>, RecordingSurface) {
        (MarkerRegistry::new(), RecordingSurface::new(Default::default()))
    }

    #[test]
    fn first_message_places_marker_with_title() {
        let (mut registry, mut surface) = setup();
        let applied = registry.upsert(&mut surface, "alice", LatLng::new(10.0, 20.0));
        assert_eq!(applied, Applied::Created);
        assert_eq!(registry.len(), 1);
        assert_eq!(surface.live_markers(), 1);
    }

    #[test]
    fn later_messages_move_the_same_marker() {
        let (mut registry, mut surface) = setup();
        registry.upsert(&mut surface, "alice", LatLng::new(10.0, 20.0));
        let applied = registry.upsert(&mut surface, "alice", LatLng::new(11.0, 21.0));

        assert_eq!(applied, Applied::Moved);
        assert_eq!(registry.len(), 1);
        assert_eq!(surface.live_markers(), 1);
        assert_eq!(registry.position("alice"), Some(LatLng::new(11.0, 21.0)));
    }

    #[test]
    fn identical_coordinates_do_not_duplicate_markers() {
        let (mut registry, mut surface) = setup();
        for _ in 0..5 {
            registry.upsert(&mut surface, "alice", LatLng::new(1.0, 2.0));
        }
        assert_eq!(registry.len(), 1);
        assert_eq!(surface.live_markers(), 1);
        assert_eq!(registry.position("alice"), Some(LatLng::new(1.0, 2.0)));
    }

    #[test]
    fn remove_detaches_marker() {
        let (mut registry, mut surface) = setup();
        registry.upsert(&mut surface, "bob", LatLng::new(5.0, 5.0));
        assert_eq!(registry.remove(&mut surface, "bob"), Applied::Removed);
        assert!(!registry.contains("bob"));
        assert_eq!(surface.live_markers(), 0);
    }

    #[test]
    fn remove_unknown_alias_is_noop() {
        let (mut registry, mut surface) = setup();
        registry.upsert(&mut surface, "alice", LatLng::new(1.0, 1.0));
        assert_eq!(
            registry.remove(&mut surface, "nobody"),
            Applied::UnknownDeparture
        );
        assert!(registry.contains("alice"));
        assert_eq!(registry.len(), 1);
        assert_eq!(surface.live_markers(), 1);
    }

    #[test]
    fn removed_alias_can_come_back() {
        let (mut registry, mut surface) = setup();
        registry.upsert(&mut surface, "bob", LatLng::new(5.0, 5.0));
        registry.remove(&mut surface, "bob");
        let applied = registry.upsert(&mut surface, "bob", LatLng::new(6.0, 6.0));
        assert_eq!(applied, Applied::Created);
        assert_eq!(registry.position("bob"), Some(LatLng::new(6.0, 6.0)));
        assert_eq!(surface.live_markers(), 1);
    }

    #[test]
    fn clear_detaches_everything() {
        let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut surface = RecordingSurface::new(std::rc::Rc::clone(&log));
        let mut registry = MarkerRegistry::new();
        registry.upsert(&mut surface, "a", LatLng::new(0.0, 0.0));
        registry.upsert(&mut surface, "b", LatLng::new(1.0, 1.0));

        registry.clear(&mut surface);

        assert!(registry.is_empty());
        assert_eq!(surface.live_markers(), 0);
        let removals = log
            .borrow()
            .iter()
            .filter(|op| matches!(op, MapOp::Removed { .. }))
            .count();
        assert_eq!(removals, 2);
    }
}
