/// A coordinate in the map SDK's latitude/longitude space.
///
/// Domain `Position` values are converted to this type on demand; the
/// conversion is total and assumes finite coordinates validated upstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// An accumulating bounding box over map coordinates.
///
/// Mirrors the map SDK's bounds object: start empty, `extend` with every
/// point of interest, then hand the result to a fit-bounds request.
///
/// # Examples
/// ```
/// use dispatch_map::geometry::{LatLng, MapBounds};
///
/// let mut bounds = MapBounds::new();
/// assert!(bounds.is_empty());
/// bounds.extend(LatLng::new(52.37, 4.89));
/// bounds.extend(LatLng::new(52.09, 5.12));
/// assert!(!bounds.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MapBounds {
    extent: Option<(LatLng, LatLng)>,
}

impl MapBounds {
    #[must_use]
    pub const fn new() -> Self {
        Self { extent: None }
    }

    /// Grow the bounds to include `point`.
    pub fn extend(&mut self, point: LatLng) {
        self.extent = Some(match self.extent {
            None => (point, point),
            Some((sw, ne)) => (
                LatLng::new(sw.lat.min(point.lat), sw.lng.min(point.lng)),
                LatLng::new(ne.lat.max(point.lat), ne.lng.max(point.lng)),
            ),
        });
    }

    /// True if no point has been accumulated yet. Fitting an empty bounds is
    /// a no-op for every SDK we target, but callers should skip it anyway.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.extent.is_none()
    }

    /// South-west corner, if any point has been accumulated.
    #[must_use]
    pub fn south_west(&self) -> Option<LatLng> {
        self.extent.map(|(sw, _)| sw)
    }

    /// North-east corner, if any point has been accumulated.
    #[must_use]
    pub fn north_east(&self) -> Option<LatLng> {
        self.extent.map(|(_, ne)| ne)
    }

    /// Midpoint of the accumulated extent.
    #[must_use]
    pub fn center(&self) -> Option<LatLng> {
        self.extent.map(|(sw, ne)| {
            LatLng::new((sw.lat + ne.lat) / 2.0, (sw.lng + ne.lng) / 2.0)
        })
    }
}
