//! Request/response DTOs with validation and normalization

pub mod admin_dto;
pub mod user_dto;
