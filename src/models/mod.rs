mod merge;
mod position;
mod route;
mod stop;

pub use merge::MergeWorkingSet;
pub use position::Position;
pub use route::{Driver, Route, RouteAccent, RouteKind, Vehicle};
pub use stop::{Stop, StopKind, StopStatus, TimeFrame, option_duration_serde};
