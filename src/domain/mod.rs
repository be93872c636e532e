pub mod brand;
pub mod category;
pub mod content;
pub mod lead;
pub mod motorcycle;
pub mod slider;
pub mod types;
