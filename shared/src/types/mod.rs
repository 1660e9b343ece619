//! Common response types shared across the API surface

pub mod envelope;
pub mod pagination;

pub use envelope::Envelope;
pub use pagination::{PageMeta, PageQuery};
