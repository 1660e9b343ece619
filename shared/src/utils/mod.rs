//! Utility functions shared across the server

pub mod mask;
pub mod phone;
pub mod text;

pub use mask::mask;
