use leptos::*;
use uuid::Uuid;

use crate::constants::FIT_BOUNDS_PADDING_PX;
use crate::map::{FitBoundsLatch, MapHandle};
use crate::models::{MergeWorkingSet, Route};
use crate::scene::{collect_bounds, is_route_faded, visible_routes, ClickTarget, RouteViewState};
use crate::theme::Theme;

use super::merge_view::MergeLayer;
use super::popover_view::{PopoverController, PopoverView};
use super::route_layer::RouteLayer;

/// Composition root for the map: owns the view toggles, resolves per-route
/// view state, switches between the normal multi-route view and the
/// "connect stops" editing view, and forwards every overlay click to the
/// domain layer without mutating anything itself.
#[component]
pub fn RouteMap(
    handle: MapHandle,
    #[prop(into)] driver_routes: Signal<Vec<Route>>,
    #[prop(into)] express_routes: Signal<Vec<Route>>,
    #[prop(into)] merging: Signal<bool>,
    #[prop(into)] working_set: Signal<MergeWorkingSet>,
    theme: ReadSignal<Theme>,
    on_route_click: Callback<Uuid>,
    on_stop_click: Callback<(Uuid, Uuid)>,
    on_map_click: Callback<()>,
    /// `Some(id)` when a connected stop is clicked, `None` for a background
    /// click while merging.
    on_connected_stop_click: Callback<Option<Uuid>>,
    on_unconnected_stop_click: Callback<Uuid>,
) -> impl IntoView {
    // Stored so the nested view closures can grab cheap copies.
    let handle = store_value(handle);
    let popovers = PopoverController::new();
    let (show_all_routes, set_show_all_routes) = create_signal(true);
    let (show_all_drivers, set_show_all_drivers) = create_signal(true);
    let (show_trail, set_show_trail) = create_signal(false);

    let all_routes = create_memo(move |_| {
        let mut routes = driver_routes.get();
        routes.extend(express_routes.get());
        routes
    });
    let any_selected =
        create_memo(move |_| all_routes.with(|routes| routes.iter().any(|route| route.selected)));
    let shown = create_memo(move |_| {
        all_routes.with(|routes| {
            visible_routes(routes, show_all_routes.get())
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    // Every overlay click funnels through here. The popover closes first so
    // it cannot outlive the overlay set the click is about to change.
    let dispatch = Callback::new(move |target: ClickTarget| {
        popovers.close();
        match target {
            ClickTarget::Route(route_id) => on_route_click.call(route_id),
            ClickTarget::Stop { route, stop } => on_stop_click.call((route, stop)),
            ClickTarget::ConnectedStop(stop_id) => on_connected_stop_click.call(Some(stop_id)),
            ClickTarget::UnconnectedStop(stop_id) => on_unconnected_stop_click.call(stop_id),
        }
    });

    create_effect(move |_| {
        let merging_now = merging.get();
        handle
            .get_value()
            .surface
            .set_background_click(Some(Callback::new(move |()| {
                popovers.close();
                if merging_now {
                    on_connected_stop_click.call(None);
                }
                on_map_click.call(());
            })));
    });
    on_cleanup(move || handle.get_value().surface.set_background_click(None));

    // Bounds cover everything regardless of the visibility toggles, so
    // toggling never moves the viewport.
    let fit_now = move || {
        let working = if merging.get_untracked() {
            Some(working_set.get_untracked())
        } else {
            None
        };
        let bounds = all_routes.with_untracked(|routes| collect_bounds(routes, working.as_ref()));
        if !bounds.is_empty() {
            handle
                .get_value()
                .surface
                .fit_bounds(&bounds, FIT_BOUNDS_PADDING_PX);
        }
    };

    // Automatic fit: once, the first time the map is ready with data. Later
    // data refreshes leave the operator's viewport alone.
    let latch = store_value(FitBoundsLatch::new());
    create_effect(move |_| {
        let ready = handle.get_value().ready.get();
        let has_data = all_routes.with(|routes| !routes.is_empty());
        let mut fire = false;
        latch.update_value(|latch| fire = latch.try_auto_fit(ready, has_data));
        if fire {
            fit_now();
        }
    });

    view! {
        <div class="route-map">
            <div class="map-controls">
                <button class="map-control" on:click=move |_| fit_now()>
                    "Zoom to fit"
                </button>
                <button
                    class=move || toggle_class(show_all_routes.get())
                    on:click=move |_| set_show_all_routes.update(|on| *on = !*on)
                >
                    "All routes"
                </button>
                <button
                    class=move || toggle_class(show_all_drivers.get())
                    on:click=move |_| set_show_all_drivers.update(|on| *on = !*on)
                >
                    "All drivers"
                </button>
                <Show when=move || !merging.get()>
                    <button
                        class=move || toggle_class(show_trail.get())
                        on:click=move |_| set_show_trail.update(|on| *on = !*on)
                    >
                        "Trail"
                    </button>
                </Show>
            </div>

            <Show when=move || !merging.get()>
                <For
                    each=move || shown.get()
                    key=|route| route.id
                    children=move |route: Route| {
                        let route_id = route.id;
                        let fallback = store_value(route);
                        let route_signal = Signal::derive(move || {
                            all_routes
                                .with(|routes| {
                                    routes.iter().find(|route| route.id == route_id).cloned()
                                })
                                .unwrap_or_else(|| fallback.get_value())
                        });
                        let state = Signal::derive(move || {
                            route_signal.with(|route| RouteViewState {
                                faded: is_route_faded(route, any_selected.get()),
                                show_trail: show_trail.get() && route.selected,
                                hide_driver: !show_all_drivers.get() && !route.selected,
                            })
                        });
                        view! {
                            <RouteLayer
                                handle=handle.get_value()
                                popovers=popovers
                                route=route_signal
                                state=state
                                on_overlay_click=dispatch
                            />
                        }
                    }
                />
            </Show>

            <Show when=move || merging.get()>
                <MergeLayer
                    handle=handle.get_value()
                    popovers=popovers
                    working_set=working_set
                    on_overlay_click=dispatch
                />
            </Show>

            <PopoverView handle=handle.get_value() popovers=popovers theme=theme/>
        </div>
    }
}

const fn toggle_class(on: bool) -> &'static str {
    if on {
        "map-control active"
    } else {
        "map-control"
    }
}
