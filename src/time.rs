use chrono::{Duration, NaiveDateTime};
use crate::models::TimeFrame;

/// Format a timestamp for display in popovers (HH:MM).
#[must_use]
pub fn format_time(time: NaiveDateTime) -> String {
    time.format("%H:%M").to_string()
}

/// Format a delivery time-frame window as "HH:MM – HH:MM".
#[must_use]
pub fn format_time_frame(frame: &TimeFrame) -> String {
    format!("{} – {}", format_time(frame.from), format_time(frame.to))
}

/// Format a duration as whole minutes, e.g. "15 min". Sub-minute durations
/// round down to "0 min".
#[must_use]
pub fn format_minutes(duration: Duration) -> String {
    format!("{} min", duration.num_minutes())
}

/// Format a delay for the popover delay row, e.g. "+25 min".
#[must_use]
pub fn format_delay(delay: Duration) -> String {
    format!("+{} min", delay.num_minutes())
}
