//! Self-service account routes

pub mod login;
pub mod profile;
pub mod refresh;
pub mod register;
