//! Translation of domain errors into envelope responses.

use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use validator::ValidationErrors;

use kb_core::errors::DomainError;
use kb_shared::types::Envelope;

/// Convert a domain error into its HTTP envelope response
///
/// Infrastructure failures are logged and collapsed into a generic
/// message so driver details never reach a client.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let (status, title) = match &error {
        DomainError::Conflict { .. } => (StatusCode::CONFLICT, "Conflict"),
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, "Not Found"),
        DomainError::InvalidSession => (StatusCode::UNAUTHORIZED, "Authorization"),
        DomainError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Authorization"),
        DomainError::Precondition { .. } => (StatusCode::BAD_REQUEST, "Account Status"),
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, "Validation Error"),
        DomainError::Database(_) | DomainError::Internal { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
        }
    };

    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(code = error.code(), error = %error, "request failed");
        "Something went wrong. Please try again.".to_string()
    } else {
        error.to_string()
    };

    HttpResponse::build(status).json(Envelope::<()>::error(title, message))
}

/// Build the 400 envelope for request validation failures
///
/// The payload is a field-to-messages map so clients can attach each
/// violation to its input.
pub fn validation_failure(errors: &ValidationErrors) -> HttpResponse {
    let violations: HashMap<String, Vec<String>> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();

    HttpResponse::BadRequest().json(Envelope {
        status: false,
        title: "Validation Error".to_string(),
        message: "One or more fields failed validation".to_string(),
        data: Some(violations),
        pagination: None,
    })
}
