pub mod header;
pub mod map_panel;
pub mod timeline;
