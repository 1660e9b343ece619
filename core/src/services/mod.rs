//! Business services containing domain logic and use cases.

pub mod admin;
pub mod auth;
pub mod codegen;
pub mod notifier;
pub mod token;

// Re-export commonly used types
pub use admin::{AdminCreateData, AdminService};
pub use auth::{AuthOutcome, AuthService, AuthServiceConfig, DeviceMeta, RegisterData};
pub use codegen::{generate_unique, random_code, random_digits, CodeCharset};
pub use notifier::{MockNotifier, NoopNotifier, Notification, Notifier};
pub use token::{Claims, TokenService};
