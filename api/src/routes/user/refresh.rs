use actix_web::{web, HttpResponse};
use validator::Validate;

use kb_core::repositories::UserRepository;
use kb_core::services::notifier::Notifier;
use kb_shared::types::Envelope;

use crate::app::AppState;
use crate::dto::user_dto::RefreshTokenRequest;
use crate::handlers::{handle_domain_error, validation_failure};

/// Handler for POST /user/refresh-token
///
/// Accepts a possibly-expired token, re-verifies its signature and
/// subject, and issues a fresh one.
pub async fn refresh_token<R, N>(
    state: web::Data<AppState<R, N>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    N: Notifier + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_failure(&errors);
    }

    match state.auth_service.refresh(&request.token).await {
        Ok(token) => HttpResponse::Ok().json(Envelope::success(
            serde_json::json!({ "token": token }),
            "Token Refresh",
            "Token refresh was successful",
        )),
        Err(error) => handle_domain_error(error),
    }
}
