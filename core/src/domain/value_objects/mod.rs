//! Read-boundary value objects

pub mod user_view;

pub use user_view::{acquire_hash, UserView};
