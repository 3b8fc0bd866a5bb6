//! The single marker popover, rendered as HTML above the map container.
//!
//! Content comes from the composition layer; this file only owns when it is
//! visible and where it sits. One popover at a time for the whole map, with
//! the debounced hide handled by `HoverGroup`.

use gloo_timers::callback::Timeout;
use leptos::*;

use crate::constants::POPOVER_HIDE_DELAY_MS;
use crate::geometry::LatLng;
use crate::map::MapHandle;
use crate::popover::{AccentBadge, HoverGroup, PopoverContent};
use crate::scene::OverlayKey;
use crate::theme::Theme;

#[derive(Clone, PartialEq)]
pub struct ActivePopover {
    pub key: OverlayKey,
    pub content: PopoverContent,
    pub anchor: LatLng,
}

/// Hover coordinator shared by every overlay renderer on the map.
#[derive(Clone, Copy)]
pub struct PopoverController {
    group: RwSignal<HoverGroup<OverlayKey>>,
    active: RwSignal<Option<ActivePopover>>,
}

impl PopoverController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            group: create_rw_signal(HoverGroup::new()),
            active: create_rw_signal(None),
        }
    }

    /// Pointer entered a marker: show its popover, replacing whatever was
    /// visible without an intermediate hidden frame.
    pub fn show(&self, key: OverlayKey, content: PopoverContent, anchor: LatLng) {
        self.group.update(|group| group.enter(key));
        self.active.set(Some(ActivePopover {
            key,
            content,
            anchor,
        }));
    }

    /// Pointer left a marker: hide after the debounce delay unless a
    /// sibling marker claims the popover first.
    pub fn schedule_hide(&self, key: OverlayKey) {
        self.group.update(|group| group.leave(key));
        let group = self.group;
        let active = self.active;
        Timeout::new(POPOVER_HIDE_DELAY_MS, move || {
            let mut hidden = false;
            group.update(|group| hidden = group.expire());
            if hidden {
                active.set(None);
            }
        })
        .forget();
    }

    /// Immediate close (overlay click, background click).
    pub fn close(&self) {
        self.group.update(HoverGroup::close);
        self.active.set(None);
    }

    pub fn active(&self) -> Option<ActivePopover> {
        self.active.get()
    }
}

impl Default for PopoverController {
    fn default() -> Self {
        Self::new()
    }
}

fn labelled_row(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="map-popover-row">
            <span class="map-popover-label">{label}</span>
            <span class="map-popover-value">{value}</span>
        </div>
    }
}

#[component]
pub fn PopoverView(
    handle: MapHandle,
    popovers: PopoverController,
    theme: ReadSignal<Theme>,
) -> impl IntoView {
    view! {
        {move || {
            let Some(popover) = popovers.active() else {
                return view! { <div class="map-popover-hidden"></div> }.into_view();
            };
            let Some((x, y)) = handle.surface.project(popover.anchor) else {
                return view! { <div class="map-popover-hidden"></div> }.into_view();
            };
            let content = popover.content;

            view! {
                <div
                    class=format!("map-popover {}", theme.get().class())
                    style=format!("left: {}px; top: {}px;", x + 12.0, y - 12.0)
                >
                    <div class="map-popover-heading">
                        <span>{content.heading.clone()}</span>
                        {content.online.map(|online| {
                            view! {
                                <span class=if online {
                                    "map-popover-presence online"
                                } else {
                                    "map-popover-presence offline"
                                }></span>
                            }
                        })}
                        {content.badge.map(|badge| {
                            let (class, text) = match badge {
                                AccentBadge::Warning => ("map-popover-badge warning", "warning"),
                                AccentBadge::Alert => ("map-popover-badge alert", "alert"),
                            };
                            view! { <span class=class>{text}</span> }
                        })}
                    </div>
                    {content.title.map(|title| view! { <div class="map-popover-title">{title}</div> })}
                    {content.subtitle.map(|subtitle| view! { <div class="map-popover-subtitle">{subtitle}</div> })}
                    {content.address.map(|address| view! { <div class="map-popover-address">{address}</div> })}
                    {content.status.map(|status| {
                        view! {
                            <div class=format!("map-popover-status {}", status.modifier)>
                                {status.label}
                            </div>
                        }
                    })}
                    {content.arrival.map(|arrival| labelled_row("Arrival", arrival))}
                    {content.time_frame.map(|frame| labelled_row("Time frame", frame))}
                    {content.loading_time.map(|loading| labelled_row("Loading", loading))}
                    {content.delay.map(|delay| view! { <div class="map-popover-delay">{delay}</div> })}
                    {content.instructions.map(|instructions| {
                        view! { <div class="map-popover-instructions">{instructions}</div> }
                    })}
                </div>
            }
            .into_view()
        }}
    }
}
