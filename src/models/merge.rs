use uuid::Uuid;
use super::{Route, Stop};

/// Working set for the "connect two routes" editing mode: an ordered list of
/// stops being assembled into a new driver route, plus the express stops not
/// yet connected, bucketed per source express route.
///
/// The source buckets are kept immutable; the connected/remaining views are
/// derived from them, so every transition trivially preserves the original
/// relative order within each bucket. All transitions produce a new value
/// instead of mutating in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeWorkingSet {
    source_buckets: Vec<Vec<Stop>>,
    connected: Vec<Uuid>,
}

impl MergeWorkingSet {
    /// Seed the working set from the express routes whose stops are up for
    /// assignment. One bucket per route, original stop order.
    #[must_use]
    pub fn from_express_routes(routes: &[Route]) -> Self {
        Self {
            source_buckets: routes.iter().map(|route| route.stops.clone()).collect(),
            connected: Vec::new(),
        }
    }

    /// Append a stop to the new driver route. Unknown or already-connected
    /// ids leave the working set unchanged.
    #[must_use]
    pub fn connect(&self, stop_id: Uuid) -> Self {
        if self.connected.contains(&stop_id) || self.find_stop(stop_id).is_none() {
            return self.clone();
        }
        let mut connected = self.connected.clone();
        connected.push(stop_id);
        Self {
            source_buckets: self.source_buckets.clone(),
            connected,
        }
    }

    /// Return a stop to its bucket. Later connected stops keep their
    /// relative order and are renumbered on the next read.
    #[must_use]
    pub fn disconnect(&self, stop_id: Uuid) -> Self {
        Self {
            source_buckets: self.source_buckets.clone(),
            connected: self
                .connected
                .iter()
                .copied()
                .filter(|id| *id != stop_id)
                .collect(),
        }
    }

    /// Abandon the assembled route, returning every stop to its bucket.
    #[must_use]
    pub fn clear_connections(&self) -> Self {
        Self {
            source_buckets: self.source_buckets.clone(),
            connected: Vec::new(),
        }
    }

    /// The assembled route so far, with preview ordinals assigned in
    /// connection order (1-based).
    #[must_use]
    pub fn new_driver_stops(&self) -> Vec<Stop> {
        self.connected
            .iter()
            .enumerate()
            .filter_map(|(index, id)| {
                self.find_stop(*id).map(|stop| {
                    let mut stop = stop.clone();
                    #[allow(clippy::cast_possible_truncation)]
                    let preview = (index + 1) as u32;
                    stop.new_stop_number = Some(preview);
                    stop
                })
            })
            .collect()
    }

    /// The not-yet-connected stops, one bucket per source express route,
    /// original order preserved.
    #[must_use]
    pub fn remaining_express_stops(&self) -> Vec<Vec<Stop>> {
        self.source_buckets
            .iter()
            .map(|bucket| {
                bucket
                    .iter()
                    .filter(|stop| !self.connected.contains(&stop.id))
                    .cloned()
                    .collect()
            })
            .collect()
    }

    #[must_use]
    pub fn has_connections(&self) -> bool {
        !self.connected.is_empty()
    }

    fn find_stop(&self, stop_id: Uuid) -> Option<&Stop> {
        self.source_buckets
            .iter()
            .flatten()
            .find(|stop| stop.id == stop_id)
    }
}
