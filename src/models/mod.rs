#[cfg(feature = "server")]
pub mod auth;
pub mod brand;
pub mod category;
#[cfg(feature = "server")]
pub mod config;
pub mod content;
pub mod lead;
pub mod motorcycle;
pub mod motorcycle_image;
pub mod slider;
pub mod spec_item;
