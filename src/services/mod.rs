pub use errors::{ServiceError, ServiceResult};

pub mod auth;
pub mod brands;
pub mod catalog;
pub mod content;
pub mod errors;
pub mod leads;
pub mod motorcycles;
pub mod slider;
