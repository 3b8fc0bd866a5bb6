use serde::Deserialize;
use crate::models::Route;

/// Shape of the routes snapshot delivered by the domain layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutesPayload {
    #[serde(default)]
    pub driver_routes: Vec<Route>,
    #[serde(default)]
    pub express_routes: Vec<Route>,
}

/// Parse a routes payload snapshot.
///
/// # Errors
///
/// Returns an error when the snapshot does not match the payload shape.
pub fn parse_routes_payload(json: &str) -> serde_json::Result<RoutesPayload> {
    serde_json::from_str(json)
}

/// Embedded demo snapshot used by the demo shell until a live feed is
/// wired up. A malformed snapshot degrades to an empty payload with a
/// console warning rather than failing the app.
#[must_use]
pub fn demo_payload() -> RoutesPayload {
    let json = include_str!("../test-data/routes.json");
    match parse_routes_payload(json) {
        Ok(payload) => payload,
        Err(error) => {
            web_sys::console::warn_1(&format!("demo payload failed to parse: {error}").into());
            RoutesPayload::default()
        }
    }
}
