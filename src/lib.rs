#![allow(unknown_lints)]

pub mod models;
pub mod components;
pub mod constants;
pub mod time;
pub mod geometry;
pub mod style;
pub mod scene;
pub mod popover;
pub mod map;
pub mod data;
pub mod theme;
pub mod logging;

pub use components::app::App;
