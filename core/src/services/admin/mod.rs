//! Back-office account administration workflow

mod service;

pub use service::{AdminCreateData, AdminService};
