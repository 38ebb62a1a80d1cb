//! HTTP API handlers

pub mod classify;
pub mod health;
pub mod licenses;

pub use classify::classify_all;
pub use health::health_routes;
pub use licenses::{list_licenses, update_license};
