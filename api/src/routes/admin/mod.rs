//! Back-office account administration routes

pub mod contact;
pub mod listing;
pub mod manage;
pub mod status;
