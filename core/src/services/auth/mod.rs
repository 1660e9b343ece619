//! Self-service authentication workflow

mod service;

pub use service::{AuthOutcome, AuthService, AuthServiceConfig, DeviceMeta, RegisterData};
