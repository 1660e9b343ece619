use actix_web::{web, HttpResponse};
use validator::Validate;

use kb_core::repositories::UserRepository;
use kb_core::services::notifier::Notifier;
use kb_shared::types::Envelope;

use crate::app::AppState;
use crate::dto::user_dto::UpdateProfileRequest;
use crate::handlers::{handle_domain_error, validation_failure};
use crate::middleware::AuthContext;

/// Handler for GET /user/profile
///
/// Returns the caller's own account view, including the acquire
/// identity hash.
pub async fn get_profile<R, N>(
    state: web::Data<AppState<R, N>>,
    auth: AuthContext,
) -> HttpResponse
where
    R: UserRepository + 'static,
    N: Notifier + 'static,
{
    match state.auth_service.profile(auth.user_id).await {
        Ok(view) => HttpResponse::Ok().json(Envelope::success(
            view,
            "Profile",
            "Profile retrieved successfully",
        )),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PATCH /user/profile
///
/// Merges the submitted fields into the caller's account; absent
/// fields stay untouched.
pub async fn update_profile<R, N>(
    state: web::Data<AppState<R, N>>,
    auth: AuthContext,
    request: web::Json<UpdateProfileRequest>,
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
        .auth_service
        .update_profile(auth.user_id, request.into_profile_update())
        .await
    {
        Ok(view) => HttpResponse::Ok().json(Envelope::success(
            view,
            "Profile",
            "Profile updated successfully",
        )),
        Err(error) => handle_domain_error(error),
    }
}
