//! Pure mapping from (entity, view state) to paint styles.
//!
//! Everything here is a function of its inputs; no signal reads, no SDK
//! calls. The scene composition layer decides *which* overlays exist, this
//! module decides how they are painted.

use crate::constants::{
    FADED_OPACITY, HIT_AREA_WEIGHT_FACTOR, SEGMENT_STROKE_WEIGHT, SOLID_OPACITY, TRAVELED_COLOR,
    UNTRAVELED_COLOR, Z_DRIVER_MARKER, Z_HIT_AREA, Z_HIT_AREA_FADED, Z_MARKER_FADED, Z_SEGMENT,
    Z_SEGMENT_FADED, Z_STOP_MARKER, Z_STOP_MARKER_SELECTED, Z_TRAIL,
};
use crate::models::{RouteKind, Stop, StopStatus};

/// Repeated or one-shot symbol drawn along a polyline instead of (or on top
/// of) its solid stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSymbol {
    Dash,
    OpenArrow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconSpec {
    pub symbol: IconSymbol,
    /// Position along the line as a percentage of its length.
    pub offset_percent: f64,
    /// Repeat interval in pixels; `None` renders the symbol once.
    pub repeat_px: Option<f64>,
}

/// Paint descriptor handed to the map SDK for one polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineStyle {
    pub stroke_color: &'static str,
    pub stroke_weight: f64,
    pub stroke_opacity: f64,
    pub z_index: i32,
    pub clickable: bool,
    /// When present, the icon sequence replaces the solid stroke pattern
    /// (dashed delivery arrows).
    pub icons: Option<Vec<IconSpec>>,
}

/// Whether the path between two adjacent stops has already been driven.
///
/// Driver routes count a stop as reached once it is past `not-visited`;
/// express routes only once the visit has concluded (past `arrived`).
#[must_use]
pub fn segment_traveled(from: &Stop, to: &Stop, kind: RouteKind) -> bool {
    let reached = |stop: &Stop| match kind {
        RouteKind::Driver => stop.status.is_past_not_visited(),
        RouteKind::Express => stop.status.is_past_arrived(),
    };
    reached(from) && reached(to)
}

/// Style for a same-route driving-path segment between two adjacent stops.
#[must_use]
pub fn travel_segment_style(from: &Stop, to: &Stop, kind: RouteKind, faded: bool) -> PolylineStyle {
    let color = if segment_traveled(from, to, kind) {
        TRAVELED_COLOR
    } else {
        UNTRAVELED_COLOR
    };
    PolylineStyle {
        stroke_color: color,
        stroke_weight: SEGMENT_STROKE_WEIGHT,
        stroke_opacity: if faded { FADED_OPACITY } else { SOLID_OPACITY },
        z_index: if faded { Z_SEGMENT_FADED } else { Z_SEGMENT },
        clickable: false,
        icons: None,
    }
}

/// Style for the driver→first-stop lead segment: a not-yet-traveled path.
#[must_use]
pub fn lead_segment_style(faded: bool) -> PolylineStyle {
    PolylineStyle {
        stroke_color: UNTRAVELED_COLOR,
        stroke_weight: SEGMENT_STROKE_WEIGHT,
        stroke_opacity: if faded { FADED_OPACITY } else { SOLID_OPACITY },
        z_index: if faded { Z_SEGMENT_FADED } else { Z_SEGMENT },
        clickable: false,
        icons: None,
    }
}

/// Style for a cross-route delivery leg: dashed accent-colored line with a
/// terminal open arrowhead, distinguishing "delivery leg" from "driving
/// path" semantics.
#[must_use]
pub fn delivery_arrow_style(accent_color: &'static str, faded: bool) -> PolylineStyle {
    PolylineStyle {
        stroke_color: accent_color,
        stroke_weight: SEGMENT_STROKE_WEIGHT,
        stroke_opacity: if faded { FADED_OPACITY } else { SOLID_OPACITY },
        z_index: if faded { Z_SEGMENT_FADED } else { Z_SEGMENT },
        clickable: false,
        icons: Some(vec![
            IconSpec {
                symbol: IconSymbol::Dash,
                offset_percent: 0.0,
                repeat_px: Some(12.0),
            },
            IconSpec {
                symbol: IconSymbol::OpenArrow,
                offset_percent: 100.0,
                repeat_px: None,
            },
        ]),
    }
}

/// Style for the connecting line of a historical driver trail.
#[must_use]
pub fn trail_style(faded: bool) -> PolylineStyle {
    PolylineStyle {
        stroke_color: TRAVELED_COLOR,
        stroke_weight: SEGMENT_STROKE_WEIGHT,
        stroke_opacity: if faded { FADED_OPACITY } else { SOLID_OPACITY },
        z_index: if faded { Z_SEGMENT_FADED } else { Z_TRAIL },
        clickable: false,
        icons: None,
    }
}

/// The invisible wide polyline drawn on top of a visible segment to enlarge
/// its click target. This line carries the click handler; the visible one
/// carries only paint.
#[must_use]
pub fn hit_area_style(visible: &PolylineStyle) -> PolylineStyle {
    PolylineStyle {
        stroke_color: visible.stroke_color,
        stroke_weight: visible.stroke_weight * HIT_AREA_WEIGHT_FACTOR,
        stroke_opacity: 0.0,
        z_index: if visible.z_index < Z_SEGMENT {
            Z_HIT_AREA_FADED
        } else {
            Z_HIT_AREA
        },
        clickable: true,
        icons: None,
    }
}

/// Marker fill/label modifier derived from the stop status slug.
///
/// `arrived` maps to `"arrived"`, never `"done"`: the original lookup listed
/// it in two places and the earlier entry won, so the completed-group here
/// deliberately omits it.
#[must_use]
pub const fn marker_modifier(status: StopStatus) -> &'static str {
    match status {
        StopStatus::NotVisited => "pending",
        StopStatus::Arrived => "arrived",
        StopStatus::Cancelled | StopStatus::CancelledByDriver | StopStatus::CancelledByCompany => {
            "cancelled"
        }
        StopStatus::Completed | StopStatus::DeliveryNotPossible | StopStatus::Failed => "done",
        StopStatus::NobodyAtLocation | StopStatus::Unknown => "",
    }
}

/// Z-index for a stop marker.
#[must_use]
pub const fn stop_marker_z(selected: bool, faded: bool) -> i32 {
    if faded {
        Z_MARKER_FADED
    } else if selected {
        Z_STOP_MARKER_SELECTED
    } else {
        Z_STOP_MARKER
    }
}

/// Z-index for a driver marker: always above the stop markers of its route.
#[must_use]
pub const fn driver_marker_z(faded: bool) -> i32 {
    if faded {
        Z_MARKER_FADED + 1
    } else {
        Z_DRIVER_MARKER
    }
}
