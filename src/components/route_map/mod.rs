pub mod map_view;
pub mod merge_view;
pub mod overlay;
pub mod popover_view;
pub mod route_layer;

pub use map_view::RouteMap;
