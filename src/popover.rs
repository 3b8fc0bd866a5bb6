//! Popover content and hover coordination.
//!
//! Content is decided by the pure composition layer (a faded marker simply
//! has no content); visibility is a small state machine shared by all
//! markers of a popup group, so moving the pointer from one marker to a
//! sibling replaces the popover instead of flashing it hidden.

use crate::models::{Position, Route, RouteAccent, Stop};
use crate::style::marker_modifier;
use crate::time::{format_delay, format_minutes, format_time, format_time_frame};

/// Status row of a popover: display slug plus the fill/label modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    pub label: &'static str,
    pub modifier: &'static str,
}

/// Alert/warning badge shown on the driver marker and its popover, derived
/// from the route's accent, not from any stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccentBadge {
    Warning,
    Alert,
}

impl AccentBadge {
    #[must_use]
    pub const fn from_accent(accent: RouteAccent) -> Option<Self> {
        match accent {
            RouteAccent::None => None,
            RouteAccent::Warning => Some(Self::Warning),
            RouteAccent::Alert => Some(Self::Alert),
        }
    }
}

/// Content blocks of a marker popover. Every row is optional; absent domain
/// fields are a valid "nothing to show" state, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopoverContent {
    pub heading: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub address: Option<String>,
    pub status: Option<StatusRow>,
    pub arrival: Option<String>,
    pub time_frame: Option<String>,
    pub loading_time: Option<String>,
    pub instructions: Option<String>,
    pub delay: Option<String>,
    pub online: Option<bool>,
    pub badge: Option<AccentBadge>,
}

/// Popover content for a stop marker. Faded stops are not interactive and
/// get no popover at all, regardless of hover events.
#[must_use]
pub fn stop_popover(stop: &Stop, faded: bool) -> Option<PopoverContent> {
    if faded {
        return None;
    }
    Some(PopoverContent {
        heading: format!("Stop {}", stop.effective_number()),
        address: Some(stop.address.clone()),
        status: Some(StatusRow {
            label: stop.status.slug(),
            modifier: marker_modifier(stop.status),
        }),
        arrival: stop.arrival_time.map(format_time),
        time_frame: stop.time_frame.as_ref().map(format_time_frame),
        loading_time: stop.loading_time.map(format_minutes),
        instructions: stop.instructions.clone(),
        delay: if stop.delayed {
            stop.delay.map(format_delay)
        } else {
            None
        },
        ..PopoverContent::default()
    })
}

/// Popover content for a driver marker: online/offline modifier plus the
/// route-level accent badge.
#[must_use]
pub fn driver_popover(route: &Route, faded: bool) -> Option<PopoverContent> {
    if faded {
        return None;
    }
    let driver = route.driver.as_ref()?;
    let vehicle = route.vehicle.as_ref().and_then(|vehicle| {
        vehicle
            .name
            .clone()
            .or_else(|| vehicle.plate.clone())
    });
    Some(PopoverContent {
        heading: driver.name.clone(),
        title: vehicle,
        subtitle: driver.phone.clone(),
        online: Some(driver.online),
        badge: AccentBadge::from_accent(route.accent),
        ..PopoverContent::default()
    })
}

/// Popover for the endpoints of a historical driver trail: the recorded
/// time when present, otherwise the endpoint label. Interior trail points
/// are visual-only.
#[must_use]
pub fn trail_point_popover(position: &Position, fallback: &'static str) -> PopoverContent {
    PopoverContent {
        heading: position
            .timestamp
            .map_or_else(|| fallback.to_string(), format_time),
        ..PopoverContent::default()
    }
}

/// Hover coordinator for one popup group: at most one popover visible at a
/// time, with a debounced hide so that leaving one marker for a sibling
/// does not flash the popover hidden in between.
///
/// The caller owns the debounce timer: on `leave`, schedule a call to
/// `expire` after the hide delay; `enter` cancels any pending hide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverGroup<K> {
    active: Option<K>,
    pending_hide: Option<K>,
}

impl<K: PartialEq + Copy> HoverGroup<K> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: None,
            pending_hide: None,
        }
    }

    /// Pointer entered the marker identified by `key`.
    pub fn enter(&mut self, key: K) {
        self.active = Some(key);
        self.pending_hide = None;
    }

    /// Pointer left the marker identified by `key`. Only marks the popover
    /// for hiding; nothing changes until `expire` runs.
    pub fn leave(&mut self, key: K) {
        if self.active == Some(key) {
            self.pending_hide = Some(key);
        }
    }

    /// Debounce timer fired. Hides the popover only if no sibling was
    /// entered in the meantime. Returns true if the popover was hidden.
    pub fn expire(&mut self) -> bool {
        match self.pending_hide.take() {
            Some(key) if self.active == Some(key) => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    /// Explicit close (popover close button, background click).
    pub fn close(&mut self) {
        self.active = None;
        self.pending_hide = None;
    }

    #[must_use]
    pub const fn active(&self) -> Option<K> {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StopKind, StopStatus, TimeFrame};
    use chrono::{Duration, NaiveDate};
    use uuid::Uuid;

    fn stop() -> Stop {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        Stop {
            id: Uuid::new_v4(),
            kind: StopKind::Driver,
            stop_number: 7,
            new_stop_number: None,
            address: "Prinsengracht 263".to_string(),
            position: Some(Position::new(52.375, 4.884)),
            status: StopStatus::Arrived,
            arrival_time: date.and_hms_opt(10, 32, 0),
            time_frame: Some(TimeFrame {
                from: date.and_hms_opt(9, 0, 0).expect("valid time"),
                to: date.and_hms_opt(11, 0, 0).expect("valid time"),
            }),
            delayed: true,
            delay: Some(Duration::minutes(25)),
            alert: false,
            warning: false,
            selected: false,
            loading_time: Some(Duration::minutes(10)),
            instructions: Some("Ring twice".to_string()),
        }
    }

    #[test]
    fn test_stop_popover_rows() {
        let content = stop_popover(&stop(), false).expect("popover content");
        assert_eq!(content.heading, "Stop 7");
        assert_eq!(content.address.as_deref(), Some("Prinsengracht 263"));
        let status = content.status.expect("status row");
        assert_eq!(status.label, "arrived");
        assert_eq!(status.modifier, "arrived");
        assert_eq!(content.time_frame.as_deref(), Some("09:00 – 11:00"));
        assert_eq!(content.loading_time.as_deref(), Some("10 min"));
        assert_eq!(content.delay.as_deref(), Some("+25 min"));
    }

    #[test]
    fn test_faded_stop_has_no_popover() {
        assert_eq!(stop_popover(&stop(), true), None);
    }

    #[test]
    fn test_delay_row_requires_delayed_flag() {
        let mut s = stop();
        s.delayed = false;
        let content = stop_popover(&s, false).expect("popover content");
        assert_eq!(content.delay, None);
    }

    #[test]
    fn test_trail_point_popover_prefers_timestamp() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        let mut position = Position::new(52.37, 4.89);
        position.timestamp = date.and_hms_opt(8, 17, 0);
        assert_eq!(trail_point_popover(&position, "Trail start").heading, "08:17");
    }

    #[test]
    fn test_trail_point_popover_without_timestamp() {
        let position = Position::new(52.37, 4.89);
        assert_eq!(
            trail_point_popover(&position, "Trail end").heading,
            "Trail end"
        );
    }

    #[test]
    fn test_accent_badge_from_accent() {
        assert_eq!(AccentBadge::from_accent(RouteAccent::None), None);
        assert_eq!(
            AccentBadge::from_accent(RouteAccent::Warning),
            Some(AccentBadge::Warning)
        );
        assert_eq!(
            AccentBadge::from_accent(RouteAccent::Alert),
            Some(AccentBadge::Alert)
        );
    }

    #[test]
    fn test_hover_group_enter_leave_expire() {
        let mut group: HoverGroup<u32> = HoverGroup::new();
        group.enter(1);
        assert_eq!(group.active(), Some(1));

        group.leave(1);
        assert_eq!(group.active(), Some(1), "hide is debounced, not immediate");

        assert!(group.expire());
        assert_eq!(group.active(), None);
    }

    #[test]
    fn test_hover_group_sibling_replaces_without_gap() {
        let mut group: HoverGroup<u32> = HoverGroup::new();
        group.enter(1);
        group.leave(1);
        group.enter(2); // sibling entered before the debounce fired

        assert!(!group.expire(), "stale hide must not fire");
        assert_eq!(group.active(), Some(2));
    }

    #[test]
    fn test_hover_group_leave_of_inactive_is_noop() {
        let mut group: HoverGroup<u32> = HoverGroup::new();
        group.enter(1);
        group.leave(2);
        assert!(!group.expire());
        assert_eq!(group.active(), Some(1));
    }

    #[test]
    fn test_hover_group_close() {
        let mut group: HoverGroup<u32> = HoverGroup::new();
        group.enter(1);
        group.close();
        assert_eq!(group.active(), None);
        assert!(!group.expire());
    }
}
