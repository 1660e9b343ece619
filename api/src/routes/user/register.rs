use actix_web::{web, HttpResponse};
use validator::Validate;

use kb_core::repositories::UserRepository;
use kb_core::services::notifier::Notifier;
use kb_shared::types::Envelope;

use crate::app::AppState;
use crate::dto::user_dto::RegisterRequest;
use crate::handlers::{handle_domain_error, validation_failure};

/// Handler for POST /user/register
///
/// Creates an account and signs the caller in. The response envelope
/// carries the issued token and the masked account view.
pub async fn register<R, N>(
    state: web::Data<AppState<R, N>>,
    request: web::Json<RegisterRequest>,
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
        .register(request.into_register_data())
        .await
    {
        Ok(outcome) => HttpResponse::Created().json(Envelope::success(
            outcome,
            "Registration",
            "Registration was successful",
        )),
        Err(error) => handle_domain_error(error),
    }
}
