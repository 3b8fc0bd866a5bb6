//! Scene composition: from domain routes to overlay descriptors.
//!
//! `compose_route` and `compose_merge` are pure functions producing the
//! marker/polyline specs a map surface renders. Overlay keys derive
//! deterministically from entity ids so reconciliation keeps overlay
//! identity stable across re-renders (popover hover state must not flicker
//! when the domain layer replaces the route arrays).

use uuid::Uuid;
use crate::constants::Z_TRAIL;
use crate::geometry::{LatLng, MapBounds};
use crate::models::{MergeWorkingSet, Route, RouteKind, Stop};
use crate::popover::{
    driver_popover, stop_popover, trail_point_popover, AccentBadge, PopoverContent,
};
use crate::style::{
    delivery_arrow_style, driver_marker_z, hit_area_style, lead_segment_style, marker_modifier,
    segment_traveled, stop_marker_z, trail_style, travel_segment_style, PolylineStyle,
};

/// Deterministic identity of one overlay, derived from the entity id(s) it
/// represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKey {
    Segment { from: Uuid, to: Uuid },
    SegmentHit { from: Uuid, to: Uuid },
    DriverLead(Uuid),
    DriverLeadHit(Uuid),
    StopMarker(Uuid),
    DriverMarker(Uuid),
    Trail(Uuid),
    TrailPoint { route: Uuid, index: usize },
}

/// What a click on an overlay means to the caller. The composition layer
/// never mutates domain state; it only names the entity to forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Route(Uuid),
    Stop { route: Uuid, stop: Uuid },
    ConnectedStop(Uuid),
    UnconnectedStop(Uuid),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineSpec {
    pub key: OverlayKey,
    pub path: Vec<LatLng>,
    pub style: PolylineStyle,
    pub click: Option<ClickTarget>,
}

/// Icon flavor of a marker overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Stop {
        modifier: &'static str,
        /// Set for express stops not yet connected in merge mode; renders
        /// with the hollow "unassigned" treatment.
        unconnected: bool,
    },
    Driver {
        online: bool,
        /// Route-level alert/warning badge, drawn on the marker itself.
        badge: Option<AccentBadge>,
    },
    TrailPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub key: OverlayKey,
    pub position: LatLng,
    pub icon: MarkerIcon,
    pub label: Option<String>,
    pub faded: bool,
    pub z_index: i32,
    pub click: Option<ClickTarget>,
    /// Content shown on hover; `None` makes the marker non-interactive for
    /// popovers (faded markers, interior trail points).
    pub popover: Option<PopoverContent>,
}

/// All overlays for one route (or one merge working set).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteScene {
    pub polylines: Vec<PolylineSpec>,
    pub markers: Vec<MarkerSpec>,
}

/// Per-route view state, resolved by the composition root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteViewState {
    pub faded: bool,
    /// Historical trail shown: forward-looking segments are faded since the
    /// view is retrospective.
    pub show_trail: bool,
    /// Driver marker and lead segment suppressed ("show all drivers" off).
    pub hide_driver: bool,
}

/// Push the visible polyline plus its invisible 9×-wide click-target twin.
/// Only the twin carries the click target; the visible line is paint-only.
fn push_segment_pair(
    scene: &mut RouteScene,
    key: OverlayKey,
    hit_key: OverlayKey,
    path: Vec<LatLng>,
    style: PolylineStyle,
    click: ClickTarget,
) {
    let hit_style = hit_area_style(&style);
    scene.polylines.push(PolylineSpec {
        key,
        path: path.clone(),
        style,
        click: None,
    });
    scene.polylines.push(PolylineSpec {
        key: hit_key,
        path,
        style: hit_style,
        click: Some(click),
    });
}

/// Compose the full overlay scene for one route.
#[must_use]
pub fn compose_route(route: &Route, state: RouteViewState) -> RouteScene {
    let mut scene = RouteScene::default();
    let trail_shown = state.show_trail && !route.driver_trail.is_empty();

    // (a) driver → first path stop lead segment. Forward-looking, so it
    // fades along with the untraveled segments while the trail is shown.
    if let Some((driver_position, first)) = route.lead_pair().filter(|_| !state.hide_driver) {
        if let Some(stop_position) = first.position {
            push_segment_pair(
                &mut scene,
                OverlayKey::DriverLead(route.id),
                OverlayKey::DriverLeadHit(route.id),
                vec![driver_position.lat_lng(), stop_position.lat_lng()],
                lead_segment_style(state.faded || trail_shown),
                ClickTarget::Route(route.id),
            );
        }
    }

    // (b) pairwise adjacent segments; cancelled stops are linked across,
    // never into.
    for (from, to) in route.segment_pairs() {
        let (Some(from_position), Some(to_position)) = (from.position, to.position) else {
            continue;
        };
        let traveled = segment_traveled(from, to, route.kind);
        let faded = state.faded || (trail_shown && !traveled);
        let style = match route.kind {
            RouteKind::Driver => travel_segment_style(from, to, route.kind, faded),
            // Delivery legs render as dashed accent arrows until the visit
            // has concluded, then flip to the traveled path treatment.
            RouteKind::Express => {
                if traveled {
                    travel_segment_style(from, to, route.kind, faded)
                } else {
                    delivery_arrow_style(route.accent_color(faded), faded)
                }
            }
        };
        push_segment_pair(
            &mut scene,
            OverlayKey::Segment {
                from: from.id,
                to: to.id,
            },
            OverlayKey::SegmentHit {
                from: from.id,
                to: to.id,
            },
            vec![from_position.lat_lng(), to_position.lat_lng()],
            style,
            ClickTarget::Route(route.id),
        );
    }

    // (c) one marker per stop, cancelled included.
    for stop in &route.stops {
        let Some(position) = stop.position else { continue };
        scene
            .markers
            .push(stop_marker(route.id, stop, position.lat_lng(), state.faded, false));
    }

    // (d) driver marker when a live position is known.
    if let Some(driver_position) = route.driver_position.filter(|_| !state.hide_driver) {
        scene.markers.push(MarkerSpec {
            key: OverlayKey::DriverMarker(route.id),
            position: driver_position.lat_lng(),
            icon: MarkerIcon::Driver {
                online: route.driver_online(),
                badge: AccentBadge::from_accent(route.accent),
            },
            label: None,
            faded: state.faded,
            z_index: driver_marker_z(state.faded),
            click: Some(ClickTarget::Route(route.id)),
            popover: driver_popover(route, state.faded),
        });
    }

    // (e) historical trail: connecting polyline plus point markers; only the
    // first and last points carry a popover to avoid popover clutter.
    if trail_shown {
        let path: Vec<LatLng> = route
            .driver_trail
            .iter()
            .map(crate::models::Position::lat_lng)
            .collect();
        scene.polylines.push(PolylineSpec {
            key: OverlayKey::Trail(route.id),
            path,
            style: trail_style(state.faded),
            click: None,
        });
        let last_index = route.driver_trail.len() - 1;
        for (index, position) in route.driver_trail.iter().enumerate() {
            let endpoint = index == 0 || index == last_index;
            scene.markers.push(MarkerSpec {
                key: OverlayKey::TrailPoint {
                    route: route.id,
                    index,
                },
                position: position.lat_lng(),
                icon: MarkerIcon::TrailPoint,
                label: None,
                faded: state.faded,
                z_index: Z_TRAIL,
                click: None,
                popover: if endpoint {
                    let label = if index == 0 { "Trail start" } else { "Trail end" };
                    Some(trail_point_popover(position, label))
                } else {
                    None
                },
            });
        }
    }

    scene
}

fn stop_marker(
    route_id: Uuid,
    stop: &Stop,
    position: LatLng,
    faded: bool,
    merge_mode: bool,
) -> MarkerSpec {
    MarkerSpec {
        key: OverlayKey::StopMarker(stop.id),
        position,
        icon: MarkerIcon::Stop {
            modifier: marker_modifier(stop.status),
            unconnected: false,
        },
        label: Some(stop.effective_number().to_string()),
        faded,
        z_index: stop_marker_z(stop.selected, faded),
        click: Some(if merge_mode {
            ClickTarget::ConnectedStop(stop.id)
        } else {
            ClickTarget::Stop {
                route: route_id,
                stop: stop.id,
            }
        }),
        popover: stop_popover(stop, faded),
    }
}

/// Compose the single-route "connect stops" editing scene: the assembled
/// driver route with preview ordinals, plus every unconnected express stop.
#[must_use]
pub fn compose_merge(working_set: &MergeWorkingSet) -> RouteScene {
    let mut scene = RouteScene::default();
    let connected = working_set.new_driver_stops();

    // Connecting chain between the picked stops, in pick order.
    let placed: Vec<&Stop> = connected
        .iter()
        .filter(|stop| stop.position.is_some())
        .collect();
    for pair in placed.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let (Some(from_position), Some(to_position)) = (from.position, to.position) else {
            continue;
        };
        push_segment_pair(
            &mut scene,
            OverlayKey::Segment {
                from: from.id,
                to: to.id,
            },
            OverlayKey::SegmentHit {
                from: from.id,
                to: to.id,
            },
            vec![from_position.lat_lng(), to_position.lat_lng()],
            lead_segment_style(false),
            ClickTarget::ConnectedStop(to.id),
        );
    }

    for stop in &connected {
        let Some(position) = stop.position else { continue };
        scene
            .markers
            .push(stop_marker(Uuid::nil(), stop, position.lat_lng(), false, true));
    }

    for bucket in &working_set.remaining_express_stops() {
        for stop in bucket {
            let Some(position) = stop.position else { continue };
            scene.markers.push(MarkerSpec {
                key: OverlayKey::StopMarker(stop.id),
                position: position.lat_lng(),
                icon: MarkerIcon::Stop {
                    modifier: marker_modifier(stop.status),
                    unconnected: true,
                },
                label: Some(stop.stop_number.to_string()),
                faded: false,
                z_index: stop_marker_z(false, false),
                click: Some(ClickTarget::UnconnectedStop(stop.id)),
                popover: stop_popover(stop, false),
            });
        }
    }

    scene
}

/// Routes that should render given the "show all" toggle: all of them, or
/// only the selected ones.
#[must_use]
pub fn visible_routes(routes: &[Route], show_all: bool) -> Vec<&Route> {
    routes
        .iter()
        .filter(|route| show_all || route.selected)
        .collect()
}

/// A visible route is faded when some route is selected and it is not.
#[must_use]
pub fn is_route_faded(route: &Route, any_selected: bool) -> bool {
    any_selected && !route.selected
}

/// Accumulate one bounds over every stop position, every live driver
/// position and (in merge mode) every working-set position. Deliberately
/// ignores the visibility toggles so toggling never jiggles the viewport.
#[must_use]
pub fn collect_bounds(routes: &[Route], working_set: Option<&MergeWorkingSet>) -> MapBounds {
    let mut bounds = MapBounds::new();
    for route in routes {
        for stop in &route.stops {
            if let Some(position) = stop.position {
                bounds.extend(position.lat_lng());
            }
        }
        if let Some(position) = route.driver_position {
            bounds.extend(position.lat_lng());
        }
    }
    if let Some(working_set) = working_set {
        for stop in working_set.new_driver_stops() {
            if let Some(position) = stop.position {
                bounds.extend(position.lat_lng());
            }
        }
        for bucket in working_set.remaining_express_stops() {
            for stop in bucket {
                if let Some(position) = stop.position {
                    bounds.extend(position.lat_lng());
                }
            }
        }
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Driver, Position, RouteAccent, StopKind, StopStatus};
    use crate::style::IconSymbol;

    fn stop(number: u32, status: StopStatus) -> Stop {
        Stop {
            id: Uuid::new_v4(),
            kind: StopKind::Driver,
            stop_number: number,
            new_stop_number: None,
            address: format!("Stop {number}"),
            position: Some(Position::new(52.0 + f64::from(number) * 0.01, 4.9)),
            status,
            arrival_time: None,
            time_frame: None,
            delayed: false,
            delay: None,
            alert: false,
            warning: false,
            selected: false,
            loading_time: None,
            instructions: None,
        }
    }

    fn route(kind: RouteKind, stops: Vec<Stop>) -> Route {
        Route {
            id: Uuid::new_v4(),
            kind,
            stops,
            driver_position: None,
            driver: None,
            vehicle: None,
            selected: false,
            color_index: None,
            accent: RouteAccent::None,
            driver_trail: Vec::new(),
        }
    }

    #[test]
    fn test_cancelled_stop_skipped_in_segments_but_not_markers() {
        let a = stop(1, StopStatus::Completed);
        let b = stop(2, StopStatus::Cancelled);
        let c = stop(3, StopStatus::NotVisited);
        let r = route(RouteKind::Driver, vec![a.clone(), b.clone(), c.clone()]);

        let scene = compose_route(&r, RouteViewState::default());

        // Exactly one segment (visible + hit pair), linking A directly to C.
        assert_eq!(scene.polylines.len(), 2);
        assert_eq!(
            scene.polylines[0].key,
            OverlayKey::Segment { from: a.id, to: c.id }
        );
        assert_eq!(
            scene.polylines[1].key,
            OverlayKey::SegmentHit { from: a.id, to: c.id }
        );

        // The cancelled stop still gets its marker.
        let marker_keys: Vec<OverlayKey> = scene.markers.iter().map(|m| m.key).collect();
        assert!(marker_keys.contains(&OverlayKey::StopMarker(b.id)));
        assert_eq!(scene.markers.len(), 3);
    }

    #[test]
    fn test_click_isolation_between_visible_and_hit_line() {
        let a = stop(1, StopStatus::Completed);
        let b = stop(2, StopStatus::Completed);
        let r = route(RouteKind::Driver, vec![a, b]);

        let scene = compose_route(&r, RouteViewState::default());
        let visible = &scene.polylines[0];
        let hit = &scene.polylines[1];

        assert!(!visible.style.clickable);
        assert_eq!(visible.click, None);
        assert!(hit.style.clickable);
        assert_eq!(hit.click, Some(ClickTarget::Route(r.id)));
        assert_ne!(visible.key, hit.key);
    }

    #[test]
    fn test_driver_lead_segment_and_marker() {
        let mut r = route(RouteKind::Driver, vec![stop(1, StopStatus::NotVisited)]);
        r.driver_position = Some(Position::new(52.1, 4.8));
        r.driver = Some(Driver {
            name: "Jesse".to_string(),
            online: true,
            phone: None,
        });
        r.accent = RouteAccent::Warning;

        let scene = compose_route(&r, RouteViewState::default());

        assert!(scene
            .polylines
            .iter()
            .any(|line| line.key == OverlayKey::DriverLead(r.id)));
        let driver_marker = scene
            .markers
            .iter()
            .find(|m| m.key == OverlayKey::DriverMarker(r.id))
            .expect("driver marker");
        // Online state and the route-level accent badge both live on the
        // marker icon, so a surface can draw them without the popover.
        assert_eq!(
            driver_marker.icon,
            MarkerIcon::Driver {
                online: true,
                badge: Some(AccentBadge::Warning),
            }
        );
        assert!(driver_marker.popover.is_some());
        assert!(scene
            .markers
            .iter()
            .all(|m| m.key == driver_marker.key || m.z_index < driver_marker.z_index));
    }

    #[test]
    fn test_express_segments_render_as_arrows_until_delivered() {
        let mut r = route(
            RouteKind::Express,
            vec![stop(1, StopStatus::Arrived), stop(2, StopStatus::NotVisited)],
        );
        r.color_index = Some(0);

        let scene = compose_route(&r, RouteViewState::default());
        let icons = scene.polylines[0]
            .style
            .icons
            .as_ref()
            .expect("delivery arrow icons");
        assert!(icons.iter().any(|icon| icon.symbol == IconSymbol::OpenArrow));

        // Once both endpoints are past arrived, the leg flips to the
        // traveled path treatment.
        let mut delivered = r.clone();
        delivered.stops[0].status = StopStatus::Completed;
        delivered.stops[1].status = StopStatus::Completed;
        let scene = compose_route(&delivered, RouteViewState::default());
        assert_eq!(scene.polylines[0].style.icons, None);
        assert_eq!(scene.polylines[0].style.stroke_color, "#17C800");
    }

    #[test]
    fn test_hide_driver_suppresses_marker_and_lead() {
        let mut r = route(RouteKind::Driver, vec![stop(1, StopStatus::NotVisited)]);
        r.driver_position = Some(Position::new(52.1, 4.8));

        let scene = compose_route(
            &r,
            RouteViewState {
                hide_driver: true,
                ..RouteViewState::default()
            },
        );

        assert!(!scene
            .markers
            .iter()
            .any(|m| m.key == OverlayKey::DriverMarker(r.id)));
        assert!(!scene
            .polylines
            .iter()
            .any(|line| line.key == OverlayKey::DriverLead(r.id)));
        // The stop marker itself is unaffected.
        assert_eq!(scene.markers.len(), 1);
    }

    #[test]
    fn test_faded_route_has_no_popovers() {
        let r = route(RouteKind::Driver, vec![stop(1, StopStatus::Arrived)]);
        let scene = compose_route(
            &r,
            RouteViewState {
                faded: true,
                ..RouteViewState::default()
            },
        );
        assert!(scene.markers.iter().all(|m| m.popover.is_none()));
    }

    #[test]
    fn test_trail_fades_forward_segments_and_limits_popovers() {
        let mut r = route(
            RouteKind::Driver,
            vec![
                stop(1, StopStatus::Completed),
                stop(2, StopStatus::Completed),
                stop(3, StopStatus::NotVisited),
            ],
        );
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        r.driver_trail = (0..4)
            .map(|i| Position {
                latitude: 52.0 + f64::from(i) * 0.001,
                longitude: 4.9,
                timestamp: date.and_hms_opt(8, i, 0),
            })
            .collect();
        // Endpoints keep their popover even without a recorded time.
        r.driver_trail[3].timestamp = None;

        let scene = compose_route(
            &r,
            RouteViewState {
                show_trail: true,
                ..RouteViewState::default()
            },
        );

        // Traveled segment stays solid, forward segment is suppressed.
        let traveled = &scene.polylines[0];
        let forward = &scene.polylines[2];
        assert_eq!(traveled.style.stroke_opacity, 0.9);
        assert_eq!(forward.style.stroke_opacity, 0.1);

        // Trail polyline plus one marker per point; popovers only at the ends.
        assert!(scene
            .polylines
            .iter()
            .any(|line| line.key == OverlayKey::Trail(r.id)));
        let trail_markers: Vec<&MarkerSpec> = scene
            .markers
            .iter()
            .filter(|m| matches!(m.key, OverlayKey::TrailPoint { .. }))
            .collect();
        assert_eq!(trail_markers.len(), 4);
        let with_popover = trail_markers
            .iter()
            .filter(|m| m.popover.is_some())
            .count();
        assert_eq!(with_popover, 2);
        let last = trail_markers.last().expect("trail marker");
        assert_eq!(
            last.popover.as_ref().expect("endpoint popover").heading,
            "Trail end"
        );
    }

    #[test]
    fn test_scene_is_deterministic() {
        let r = route(
            RouteKind::Driver,
            vec![stop(1, StopStatus::Completed), stop(2, StopStatus::Arrived)],
        );
        let state = RouteViewState::default();
        assert_eq!(compose_route(&r, state), compose_route(&r, state));
    }

    #[test]
    fn test_visible_routes_toggle() {
        let mut selected = route(RouteKind::Driver, Vec::new());
        selected.selected = true;
        let unselected = route(RouteKind::Driver, Vec::new());
        let routes = vec![selected.clone(), unselected.clone()];

        assert_eq!(visible_routes(&routes, true).len(), 2);
        let only_selected = visible_routes(&routes, false);
        assert_eq!(only_selected.len(), 1);
        assert_eq!(only_selected[0].id, selected.id);

        assert!(is_route_faded(&unselected, true));
        assert!(!is_route_faded(&selected, true));
        assert!(!is_route_faded(&unselected, false));
    }

    #[test]
    fn test_collect_bounds_ignores_visibility() {
        let mut hidden = route(RouteKind::Driver, vec![stop(1, StopStatus::NotVisited)]);
        hidden.selected = false;
        hidden.driver_position = Some(Position::new(51.5, 4.0));
        let routes = vec![hidden];

        let bounds = collect_bounds(&routes, None);
        assert!(!bounds.is_empty());
        let sw = bounds.south_west().expect("bounds");
        assert_eq!(sw.lat, 51.5);
    }

    #[test]
    fn test_compose_merge_marks_unconnected() {
        let express = Route {
            stops: vec![stop(1, StopStatus::NotVisited), stop(2, StopStatus::NotVisited)],
            ..route(RouteKind::Express, Vec::new())
        };
        let first_id = express.stops[0].id;
        let working_set = crate::models::MergeWorkingSet::from_express_routes(&[express]);
        let working_set = working_set.connect(first_id);

        let scene = compose_merge(&working_set);
        let connected_marker = scene
            .markers
            .iter()
            .find(|m| m.key == OverlayKey::StopMarker(first_id))
            .expect("connected marker");
        assert_eq!(connected_marker.label.as_deref(), Some("1"));
        assert_eq!(
            connected_marker.click,
            Some(ClickTarget::ConnectedStop(first_id))
        );
        assert!(matches!(
            connected_marker.icon,
            MarkerIcon::Stop { unconnected: false, .. }
        ));

        let unconnected: Vec<&MarkerSpec> = scene
            .markers
            .iter()
            .filter(|m| matches!(m.icon, MarkerIcon::Stop { unconnected: true, .. }))
            .collect();
        assert_eq!(unconnected.len(), 1);
        assert!(matches!(
            unconnected[0].click,
            Some(ClickTarget::UnconnectedStop(_))
        ));
    }
}
