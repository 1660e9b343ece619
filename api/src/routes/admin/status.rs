//! Account lifecycle state transitions.
//!
//! Each transition is precondition-guarded in the admin service and
//! recorded in the activity trail with the acting administrator.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use kb_core::repositories::UserRepository;
use kb_core::services::notifier::Notifier;
use kb_shared::types::Envelope;

use crate::app::AppState;
use crate::dto::admin_dto::StatusActionRequest;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

fn transition_response(
    result: Result<kb_core::domain::value_objects::UserView, kb_core::errors::DomainError>,
    message: &str,
) -> HttpResponse {
    match result {
        Ok(view) => {
            HttpResponse::Ok().json(Envelope::success(view, "Account Status", message))
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PATCH /admin/user/{id}/suspend
pub async fn suspend_user<R, N>(
    state: web::Data<AppState<R, N>>,
    id: web::Path<Uuid>,
    auth: AuthContext,
    request: web::Json<StatusActionRequest>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    N: Notifier + 'static,
{
    let result = state
        .admin_service
        .suspend(id.into_inner(), auth.user_id, request.message.clone())
        .await;
    transition_response(result, "Account suspended successfully")
}

/// Handler for PATCH /admin/user/{id}/unsuspend
pub async fn unsuspend_user<R, N>(
    state: web::Data<AppState<R, N>>,
    id: web::Path<Uuid>,
    auth: AuthContext,
    request: web::Json<StatusActionRequest>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    N: Notifier + 'static,
{
    let result = state
        .admin_service
        .unsuspend(id.into_inner(), auth.user_id, request.message.clone())
        .await;
    transition_response(result, "Account unsuspended successfully")
}

/// Handler for PATCH /admin/user/{id}/close-account
pub async fn close_account<R, N>(
    state: web::Data<AppState<R, N>>,
    id: web::Path<Uuid>,
    auth: AuthContext,
    request: web::Json<StatusActionRequest>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    N: Notifier + 'static,
{
    let result = state
        .admin_service
        .close(id.into_inner(), auth.user_id, request.message.clone())
        .await;
    transition_response(result, "Account closed successfully")
}

/// Handler for PATCH /admin/user/{id}/open-account
pub async fn open_account<R, N>(
    state: web::Data<AppState<R, N>>,
    id: web::Path<Uuid>,
    auth: AuthContext,
    request: web::Json<StatusActionRequest>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    N: Notifier + 'static,
{
    let result = state
        .admin_service
        .open(id.into_inner(), auth.user_id, request.message.clone())
        .await;
    transition_response(result, "Account reopened successfully")
}
