use std::rc::Rc;

use leptos::*;
use leptos_meta::*;
use uuid::Uuid;

use crate::components::route_map::RouteMap;
use crate::data::demo_payload;
use crate::map::{ConsoleSurface, MapHandle};
use crate::models::{MergeWorkingSet, Route};
use crate::theme::use_theme;

/// Single-select: clicking a route selects it and deselects everything
/// else; clicking the selected route again deselects it.
fn toggle_route_selection(routes: &[Route], route_id: Uuid) -> Vec<Route> {
    routes
        .iter()
        .cloned()
        .map(|mut route| {
            route.selected = route.id == route_id && !route.selected;
            route
        })
        .collect()
}

fn toggle_stop_selection(routes: &[Route], route_id: Uuid, stop_id: Uuid) -> Vec<Route> {
    routes
        .iter()
        .cloned()
        .map(|mut route| {
            if route.id == route_id {
                for stop in &mut route.stops {
                    stop.selected = stop.id == stop_id && !stop.selected;
                }
            }
            route
        })
        .collect()
}

fn clear_selection(routes: &[Route]) -> Vec<Route> {
    routes
        .iter()
        .cloned()
        .map(|mut route| {
            route.selected = false;
            route
        })
        .collect()
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let theme = use_theme();

    let payload = demo_payload();
    let (driver_routes, set_driver_routes) = create_signal(payload.driver_routes);
    let (express_routes, set_express_routes) = create_signal(payload.express_routes);
    let (merging, set_merging) = create_signal(false);
    let (working_set, set_working_set) = create_signal(MergeWorkingSet::default());

    // The console surface has no asynchronous boot.
    let (ready, _set_ready) = create_signal(true);
    let handle = MapHandle {
        surface: Rc::new(ConsoleSurface),
        ready,
    };

    let on_route_click = Callback::new(move |route_id| {
        set_driver_routes.update(|routes| *routes = toggle_route_selection(routes, route_id));
        set_express_routes.update(|routes| *routes = toggle_route_selection(routes, route_id));
    });
    let on_stop_click = Callback::new(move |(route_id, stop_id)| {
        set_driver_routes
            .update(|routes| *routes = toggle_stop_selection(routes, route_id, stop_id));
        set_express_routes
            .update(|routes| *routes = toggle_stop_selection(routes, route_id, stop_id));
    });
    let on_map_click = Callback::new(move |()| {
        set_driver_routes.update(|routes| *routes = clear_selection(routes));
        set_express_routes.update(|routes| *routes = clear_selection(routes));
    });
    let on_connected_stop_click = Callback::new(move |stop_id: Option<Uuid>| {
        if let Some(stop_id) = stop_id {
            set_working_set.update(|working_set| *working_set = working_set.disconnect(stop_id));
        }
    });
    let on_unconnected_stop_click = Callback::new(move |stop_id: Uuid| {
        set_working_set.update(|working_set| *working_set = working_set.connect(stop_id));
    });

    let toggle_merging = move |_| {
        let entering = !merging.get_untracked();
        if entering {
            set_working_set.set(MergeWorkingSet::from_express_routes(
                &express_routes.get_untracked(),
            ));
        }
        set_merging.set(entering);
    };

    view! {
        <Stylesheet id="leptos" href="/pkg/dispatch_map.css"/>
        <Title text="Dispatch Map"/>

        <div class=move || format!("app {}", theme.get().class())>
            <div class="toolbar">
                <button class="toolbar-button" on:click=toggle_merging>
                    {move || if merging.get() { "Done connecting" } else { "Connect stops" }}
                </button>
            </div>
            <RouteMap
                handle=handle
                driver_routes=driver_routes
                express_routes=express_routes
                merging=merging
                working_set=working_set
                theme=theme
                on_route_click=on_route_click
                on_stop_click=on_stop_click
                on_map_click=on_map_click
                on_connected_stop_click=on_connected_stop_click
                on_unconnected_stop_click=on_unconnected_stop_click
            />
        </div>
    }
}
