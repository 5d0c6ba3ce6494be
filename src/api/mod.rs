//! HTTP API layer.
//!
//! The single-page UI talks to the service over this local axum router.
//! Handlers validate input, drive the record store and the notification
//! scheduler, and map failures to structured JSON errors.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;
