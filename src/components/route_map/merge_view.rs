use indexmap::IndexSet;
use leptos::*;

use crate::map::MapHandle;
use crate::models::MergeWorkingSet;
use crate::scene::{compose_merge, ClickTarget, OverlayKey};

use super::overlay::{clear_scene, sync_scene};
use super::popover_view::PopoverController;

/// The "connect stops" editing scene: the driver route assembled so far,
/// plus every unconnected express stop. Mounted instead of the per-route
/// layers while merging is active.
#[component]
pub fn MergeLayer(
    handle: MapHandle,
    popovers: PopoverController,
    #[prop(into)] working_set: Signal<MergeWorkingSet>,
    on_overlay_click: Callback<ClickTarget>,
) -> impl IntoView {
    let registered = store_value(IndexSet::<OverlayKey>::new());

    create_effect({
        let handle = handle.clone();
        move |_| {
            if !handle.ready.get() {
                return;
            }
            let scene = working_set.with(|working_set| compose_merge(working_set));
            registered.update_value(|keys| {
                sync_scene(&handle, popovers, &scene, keys, on_overlay_click);
            });
        }
    });

    on_cleanup(move || registered.with_value(|keys| clear_scene(&handle, keys)));
}
