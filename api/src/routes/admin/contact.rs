use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use kb_core::repositories::UserRepository;
use kb_core::services::notifier::Notifier;
use kb_shared::types::Envelope;

use crate::app::AppState;
use crate::dto::admin_dto::{UpdateEmailRequest, UpdatePhoneRequest};
use crate::handlers::{handle_domain_error, validation_failure};

/// Handler for PATCH /admin/user/{id}/update-email
///
/// Refused once the account's email is OTP-verified.
pub async fn update_email<R, N>(
    state: web::Data<AppState<R, N>>,
    id: web::Path<Uuid>,
    request: web::Json<UpdateEmailRequest>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    N: Notifier + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_failure(&errors);
    }
    let email = request.email.trim().to_lowercase();

    match state.admin_service.update_email(id.into_inner(), email).await {
        Ok(view) => HttpResponse::Ok().json(Envelope::success(
            view,
            "Users",
            "Email updated successfully",
        )),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PATCH /admin/user/{id}/update-phone-number
///
/// Refused once the account's phone is OTP-verified.
pub async fn update_phone<R, N>(
    state: web::Data<AppState<R, N>>,
    id: web::Path<Uuid>,
    request: web::Json<UpdatePhoneRequest>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    N: Notifier + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_failure(&errors);
    }

    match state
        .admin_service
        .update_phone(id.into_inner(), request.phone_number.trim().to_string())
        .await
    {
        Ok(view) => HttpResponse::Ok().json(Envelope::success(
            view,
            "Users",
            "Phone number updated successfully",
        )),
        Err(error) => handle_domain_error(error),
    }
}
