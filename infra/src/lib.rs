//! # Kobo Infra
//!
//! Infrastructure layer for the Kobo accounts backend: MySQL-backed
//! persistence behind the core repository traits, plus outbound
//! notification adapters.

pub mod database;
pub mod error;
pub mod notify;

pub use database::connection::DatabasePool;
pub use database::mysql::MySqlUserRepository;
pub use error::InfraError;
pub use notify::LogNotifier;
