use indexmap::IndexSet;
use leptos::*;

use crate::map::MapHandle;
use crate::models::Route;
use crate::scene::{compose_route, ClickTarget, OverlayKey, RouteViewState};

use super::overlay::{clear_scene, sync_scene};
use super::popover_view::PopoverController;

/// Renders one route's overlays onto the shared surface and keeps them in
/// sync with the route data and its resolved view state. Owns only the
/// overlays it registered and removes exactly those on cleanup.
#[component]
pub fn RouteLayer(
    handle: MapHandle,
    popovers: PopoverController,
    #[prop(into)] route: Signal<Route>,
    #[prop(into)] state: Signal<RouteViewState>,
    on_overlay_click: Callback<ClickTarget>,
) -> impl IntoView {
    let registered = store_value(IndexSet::<OverlayKey>::new());

    create_effect({
        let handle = handle.clone();
        move |_| {
            if !handle.ready.get() {
                return;
            }
            let scene = route.with(|route| compose_route(route, state.get()));
            registered.update_value(|keys| {
                sync_scene(&handle, popovers, &scene, keys, on_overlay_click);
            });
        }
    });

    on_cleanup(move || registered.with_value(|keys| clear_scene(&handle, keys)));
}
