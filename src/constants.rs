/// Stroke color for path segments whose endpoints have both been reached
pub const TRAVELED_COLOR: &str = "#17C800";

/// Stroke color for path segments not yet traveled, and the fallback accent
pub const UNTRAVELED_COLOR: &str = "gray";

/// Fixed palette used to give concurrently displayed routes distinct accents,
/// looked up by the route's `color_index`
pub const ACCENT_COLORS: [&str; 8] = [
    "#E4573D", "#3D7BE4", "#2BA84A", "#9B59B6", "#E49A3D", "#16A5A5", "#D44FA3", "#6E7B8B",
];

/// Base stroke weight for visible path segments, in pixels
pub const SEGMENT_STROKE_WEIGHT: f64 = 2.0;

/// The invisible click-target polyline is this many times wider than the
/// visible one it shadows
pub const HIT_AREA_WEIGHT_FACTOR: f64 = 9.0;

/// Stroke/fill opacity for de-emphasized (faded) overlays
pub const FADED_OPACITY: f64 = 0.1;

/// Stroke/fill opacity for normal overlays
pub const SOLID_OPACITY: f64 = 0.9;

/// Pixel padding passed to the map SDK when fitting bounds
pub const FIT_BOUNDS_PADDING_PX: f64 = 50.0;

/// Delay before a popover hides after the pointer leaves its marker. Moving
/// onto a sibling marker of the same group within this window replaces the
/// popover instead of flashing it hidden.
pub const POPOVER_HIDE_DELAY_MS: u32 = 150;

// Z-index bands. Faded segments sit at the bottom, normal segments in a mid
// band, markers above those, and the driver marker above every stop marker
// of its route.
pub const Z_SEGMENT_FADED: i32 = 1;
pub const Z_HIT_AREA_FADED: i32 = 2;
pub const Z_MARKER_FADED: i32 = 3;
pub const Z_SEGMENT: i32 = 100;
pub const Z_TRAIL: i32 = 101;
pub const Z_HIT_AREA: i32 = 102;
pub const Z_STOP_MARKER: i32 = 103;
pub const Z_STOP_MARKER_SELECTED: i32 = 104;
pub const Z_DRIVER_MARKER: i32 = 105;
