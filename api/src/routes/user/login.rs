use actix_web::{web, HttpResponse};
use validator::Validate;

use kb_core::repositories::UserRepository;
use kb_core::services::notifier::Notifier;
use kb_shared::types::Envelope;

use crate::app::AppState;
use crate::dto::user_dto::LoginRequest;
use crate::handlers::{handle_domain_error, validation_failure};

/// Handler for POST /user/login
///
/// Verifies the email/password pair, merges the submitted device
/// metadata and returns a fresh token with the account view.
pub async fn login<R, N>(
    state: web::Data<AppState<R, N>>,
    request: web::Json<LoginRequest>,
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

    let user = match state
        .auth_service
        .verify_credentials(&request.email, &request.password)
        .await
    {
        Ok(user) => user,
        Err(error) => return handle_domain_error(error),
    };

    match state.auth_service.login(user, request.device_meta()).await {
        Ok(outcome) => {
            HttpResponse::Ok().json(Envelope::success(outcome, "Login", "Login was successful"))
        }
        Err(error) => handle_domain_error(error),
    }
}
