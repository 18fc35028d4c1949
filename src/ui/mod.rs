// UI module
// Contains the sidebar menu model and the single-page shell served at "/"

pub mod menu;

pub use menu::{Menu, MenuItem, Mode};

/// The single-page UI (sidebar + one view per mode)
pub const INDEX_HTML: &str = include_str!("index.html");
