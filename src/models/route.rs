use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::constants::{ACCENT_COLORS, UNTRAVELED_COLOR};
use super::{Position, Stop};

/// Route flavor. Driver routes are driven in stop order by one vehicle;
/// express routes are direct delivery legs awaiting assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Driver,
    Express,
}

/// Route-level status accent. Drives the badge on the driver marker, not on
/// individual stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteAccent {
    #[default]
    None,
    Warning,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub name: String,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub plate: Option<String>,
}

/// A transportation route as delivered by the domain layer.
///
/// Invariant: the order of `stops` defines the driven path; `stop_number` is
/// display-only and never consulted for segment adjacency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub kind: RouteKind,
    pub stops: Vec<Stop>,
    #[serde(default)]
    pub driver_position: Option<Position>,
    #[serde(default)]
    pub driver: Option<Driver>,
    #[serde(default)]
    pub vehicle: Option<Vehicle>,
    #[serde(default)]
    pub selected: bool,
    /// Index into the fixed accent palette; routes without one fall back to
    /// gray.
    #[serde(default)]
    pub color_index: Option<usize>,
    #[serde(default)]
    pub accent: RouteAccent,
    /// Historical driver positions, oldest first.
    #[serde(default)]
    pub driver_trail: Vec<Position>,
}

impl Route {
    /// Accent color for this route's delivery arrows. Faded routes and
    /// routes without a palette slot render gray.
    #[must_use]
    pub fn accent_color(&self, faded: bool) -> &'static str {
        if faded {
            return UNTRAVELED_COLOR;
        }
        self.color_index
            .map_or(UNTRAVELED_COLOR, |index| ACCENT_COLORS[index % ACCENT_COLORS.len()])
    }

    /// Stops that participate in the driven path: cancelled stops are
    /// excluded entirely (the next non-cancelled stop links directly to the
    /// previous one), as are stops without a resolved position.
    pub fn path_stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops
            .iter()
            .filter(|stop| !stop.is_cancelled() && stop.position.is_some())
    }

    /// Adjacent pairs of path stops, in driving order.
    #[must_use]
    pub fn segment_pairs(&self) -> Vec<(&Stop, &Stop)> {
        let path: Vec<&Stop> = self.path_stops().collect();
        path.windows(2).map(|pair| (pair[0], pair[1])).collect()
    }

    /// The live driver position and the first stop still on the path, for
    /// the driver→first-stop lead segment.
    #[must_use]
    pub fn lead_pair(&self) -> Option<(Position, &Stop)> {
        let driver_position = self.driver_position?;
        let first = self.path_stops().next()?;
        Some((driver_position, first))
    }

    #[must_use]
    pub fn driver_online(&self) -> bool {
        self.driver.as_ref().is_some_and(|driver| driver.online)
    }
}
