use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::geometry::LatLng;

/// A geographic position reported by the domain layer.
///
/// Immutable value; the optional timestamp is present on historical driver
/// trail points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl Position {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp: None,
        }
    }

    /// Convert to the map SDK coordinate type. Total: assumes finite
    /// coordinates validated upstream.
    #[must_use]
    pub const fn lat_lng(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_conversion() {
        let position = Position::new(52.3702, 4.8952);
        let coord = position.lat_lng();
        assert_eq!(coord.lat, 52.3702);
        assert_eq!(coord.lng, 4.8952);
    }

    #[test]
    fn test_deserialize_without_timestamp() {
        let position: Position =
            serde_json::from_str(r#"{"latitude": 52.0, "longitude": 4.5}"#)
                .expect("should deserialize");
        assert_eq!(position.timestamp, None);
        assert_eq!(position.latitude, 52.0);
    }
}
