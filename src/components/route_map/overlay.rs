//! Registration of composed scenes against the map surface.
//!
//! Every renderer funnels through `sync_scene`: upsert what the scene
//! contains now, then remove exactly the overlays that were registered on
//! the previous pass and are gone from this one. Overlay keys are stable
//! across re-renders, so an unchanged overlay is updated in place and its
//! hover state survives.

use indexmap::IndexSet;
use leptos::{Callable, Callback};

use crate::map::{MapHandle, OverlayEvents};
use crate::scene::{ClickTarget, MarkerSpec, OverlayKey, PolylineSpec, RouteScene};

use super::popover_view::PopoverController;

fn click_events(click: Option<ClickTarget>, on_click: Callback<ClickTarget>) -> OverlayEvents {
    OverlayEvents {
        on_click: click.map(|target| Callback::new(move |()| on_click.call(target))),
        ..OverlayEvents::default()
    }
}

pub fn register_polyline(handle: &MapHandle, spec: &PolylineSpec, on_click: Callback<ClickTarget>) {
    handle
        .surface
        .set_polyline(spec, &click_events(spec.click, on_click));
}

/// Markers additionally wire hover events, but only when the composition
/// gave them popover content; faded markers stay inert.
pub fn register_marker(
    handle: &MapHandle,
    popovers: PopoverController,
    spec: &MarkerSpec,
    on_click: Callback<ClickTarget>,
) {
    let mut events = click_events(spec.click, on_click);
    if let Some(content) = spec.popover.clone() {
        let key = spec.key;
        let anchor = spec.position;
        events.on_enter = Some(Callback::new(move |()| {
            popovers.show(key, content.clone(), anchor);
        }));
        events.on_leave = Some(Callback::new(move |()| popovers.schedule_hide(key)));
    }
    handle.surface.set_marker(spec, &events);
}

/// Reconcile one renderer's overlays with its freshly composed scene.
/// `registered` is that renderer's private ledger; it never removes an
/// overlay another renderer owns.
pub fn sync_scene(
    handle: &MapHandle,
    popovers: PopoverController,
    scene: &RouteScene,
    registered: &mut IndexSet<OverlayKey>,
    on_click: Callback<ClickTarget>,
) {
    let mut next = IndexSet::with_capacity(scene.polylines.len() + scene.markers.len());
    for line in &scene.polylines {
        register_polyline(handle, line, on_click);
        next.insert(line.key);
    }
    for marker in &scene.markers {
        register_marker(handle, popovers, marker, on_click);
        next.insert(marker.key);
    }
    for stale in registered.difference(&next) {
        handle.surface.remove(*stale);
    }
    *registered = next;
}

pub fn clear_scene(handle: &MapHandle, registered: &IndexSet<OverlayKey>) {
    for key in registered {
        handle.surface.remove(*key);
    }
}
