//! Core library exports for the Trend Motor storefront.
//!
//! The crate exposes the persistence layer (`domain`, `models`, `schema`,
//! `repository`) behind the `data` feature and the Actix-web application
//! (forms, services, routes, storage, caching) behind the default `server`
//! feature.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod cache;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod rate_limit;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod storage;

/// Slug of the slider rendered as the home page hero carousel.
pub const HOME_HERO_SLIDER: &str = "home-hero";

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "Trend Motor API";
