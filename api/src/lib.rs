//! # Kobo API
//!
//! HTTP layer for the Kobo accounts backend. Routes delegate to the
//! core workflow services and normalize every outcome into the shared
//! response envelope.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
