pub mod api;
pub mod catalog;
pub mod content;
pub mod slider;
