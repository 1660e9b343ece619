//! Shared utilities and common types for the Kobo accounts server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response envelope and pagination types
//! - Utility functions (phone normalization, masking, text transforms)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, AssetConfig, AuthConfig, DatabaseConfig, ServerConfig};
pub use types::{Envelope, PageMeta, PageQuery};
pub use utils::{mask, phone, text};
