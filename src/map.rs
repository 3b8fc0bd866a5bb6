//! Seam to the external map SDK.
//!
//! The composition root exclusively owns the single surface; child
//! renderers register their own overlays against it and remove them on
//! cleanup, never touching overlays they did not create.

use std::rc::Rc;
use leptos::{Callback, ReadSignal};
use crate::geometry::{LatLng, MapBounds};
use crate::scene::{MarkerSpec, OverlayKey, PolylineSpec};

/// Event hooks attached to one overlay. All optional; the surface only
/// wires what is present.
#[derive(Clone, Default)]
pub struct OverlayEvents {
    pub on_click: Option<Callback<()>>,
    pub on_enter: Option<Callback<()>>,
    pub on_leave: Option<Callback<()>>,
}

/// The overlay primitives this slice consumes from the mapping SDK.
///
/// `set_*` upserts by overlay key: re-registering an existing key updates
/// the overlay in place instead of destroying and recreating it.
pub trait MapSurface {
    fn set_marker(&self, spec: &MarkerSpec, events: &OverlayEvents);
    fn set_polyline(&self, spec: &PolylineSpec, events: &OverlayEvents);
    fn remove(&self, key: OverlayKey);
    fn fit_bounds(&self, bounds: &MapBounds, padding_px: f64);
    fn set_background_click(&self, handler: Option<Callback<()>>);
    /// Project a map coordinate to container pixels, once the map is ready.
    fn project(&self, point: LatLng) -> Option<(f64, f64)>;
}

/// Shared access to the surface plus the SDK's one-shot readiness signal,
/// provided to child renderers through context.
#[derive(Clone)]
pub struct MapHandle {
    pub surface: Rc<dyn MapSurface>,
    pub ready: ReadSignal<bool>,
}

/// One-way `not-yet-fitted → fitted` latch for the initial bounds fit.
///
/// The automatic fit fires once, the first time the map is ready and any
/// data is present; replacing the route arrays with equivalent instances
/// afterwards must not re-fire it. An explicit "zoom to fit" request goes
/// straight to the surface and bypasses this latch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FitBoundsLatch {
    fitted: bool,
}

impl FitBoundsLatch {
    #[must_use]
    pub const fn new() -> Self {
        Self { fitted: false }
    }

    /// Returns true exactly once, when both preconditions first hold.
    pub fn try_auto_fit(&mut self, map_ready: bool, has_data: bool) -> bool {
        if self.fitted || !map_ready || !has_data {
            return false;
        }
        self.fitted = true;
        true
    }

    #[must_use]
    pub const fn fitted(&self) -> bool {
        self.fitted
    }
}

/// Stand-in surface that logs registrations to the console. Used by the
/// demo shell until a real SDK binding is attached.
#[derive(Default)]
pub struct ConsoleSurface;

impl MapSurface for ConsoleSurface {
    fn set_marker(&self, spec: &MarkerSpec, _events: &OverlayEvents) {
        crate::log!("map: set marker {:?}", spec.key);
    }

    fn set_polyline(&self, spec: &PolylineSpec, _events: &OverlayEvents) {
        crate::log!("map: set polyline {:?}", spec.key);
    }

    fn remove(&self, key: OverlayKey) {
        crate::log!("map: remove {:?}", key);
    }

    fn fit_bounds(&self, bounds: &MapBounds, padding_px: f64) {
        crate::log!("map: fit bounds {:?} padding {}", bounds, padding_px);
    }

    fn set_background_click(&self, _handler: Option<Callback<()>>) {}

    fn project(&self, _point: LatLng) -> Option<(f64, f64)> {
        None
    }
}
