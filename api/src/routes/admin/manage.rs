use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use kb_core::repositories::UserRepository;
use kb_core::services::notifier::Notifier;
use kb_shared::types::Envelope;

use crate::app::AppState;
use crate::dto::admin_dto::{AdminCreateRequest, AdminUpdateRequest};
use crate::handlers::{handle_domain_error, validation_failure};

/// Handler for POST /admin/user
pub async fn create_user<R, N>(
    state: web::Data<AppState<R, N>>,
    request: web::Json<AdminCreateRequest>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    N: Notifier + 'static,
{
    let mut request = request.into_inner();
    request.normalize();
    if let Err(errors) = request.validate() {
        return validation_failure(&errors);
    }

    match state
        .admin_service
        .create(request.into_create_data())
        .await
    {
        Ok(view) => HttpResponse::Created().json(Envelope::success(
            view,
            "Users",
            "User created successfully",
        )),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /admin/user/{id}
pub async fn find_user<R, N>(
    state: web::Data<AppState<R, N>>,
    id: web::Path<Uuid>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    N: Notifier + 'static,
{
    match state.admin_service.find(id.into_inner()).await {
        Ok(view) => HttpResponse::Ok().json(Envelope::success(
            view,
            "Users",
            "User retrieved successfully",
        )),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PATCH /admin/user/{id}
pub async fn update_user<R, N>(
    state: web::Data<AppState<R, N>>,
    id: web::Path<Uuid>,
    request: web::Json<AdminUpdateRequest>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    N: Notifier + 'static,
{
    let mut request = request.into_inner();
    request.normalize();
    if let Err(errors) = request.validate() {
        return validation_failure(&errors);
    }

    match state
        .admin_service
        .update(id.into_inner(), request.into_user_update())
        .await
    {
        Ok(id) => HttpResponse::Ok().json(Envelope::success(
            serde_json::json!({ "id": id }),
            "Users",
            "User updated successfully",
        )),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /admin/user/{id}
///
/// Soft-deletes the account; its row survives for code uniqueness.
pub async fn remove_user<R, N>(
    state: web::Data<AppState<R, N>>,
    id: web::Path<Uuid>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    N: Notifier + 'static,
{
    let id = id.into_inner();
    match state.admin_service.remove(id).await {
        Ok(()) => HttpResponse::Ok().json(Envelope::success(
            serde_json::json!({ "id": id }),
            "Users",
            "User removed successfully",
        )),
        Err(error) => handle_domain_error(error),
    }
}
