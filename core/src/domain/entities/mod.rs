//! Domain entities

pub mod user;

pub use user::{NewUser, ProfileUpdate, User, UserUpdate};
