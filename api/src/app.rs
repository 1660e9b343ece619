//! Application state and factory
//!
//! Holds the wired workflow services and builds the Actix application
//! with its full route table.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use kb_core::repositories::UserRepository;
use kb_core::services::admin::AdminService;
use kb_core::services::auth::AuthService;
use kb_core::services::notifier::Notifier;
use kb_core::services::token::TokenService;
use kb_shared::types::Envelope;

use crate::middleware::JwtAuth;
use crate::routes::admin::{
    contact::{update_email, update_phone},
    listing::{list_users, search_users, user_metrics},
    manage::{create_user, find_user, remove_user, update_user},
    status::{close_account, open_account, suspend_user, unsuspend_user},
};
use crate::routes::user::{
    login::login,
    profile::{get_profile, update_profile},
    refresh::refresh_token,
    register::register,
};

/// Shared application state injected into every handler
pub struct AppState<R: UserRepository, N: Notifier> {
    pub auth_service: Arc<AuthService<R, N>>,
    pub admin_service: Arc<AdminService<R, N>>,
    pub token_service: Arc<TokenService>,
}

/// Create and configure the application with all routes
pub fn create_app<R, N>(
    app_state: web::Data<AppState<R, N>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: UserRepository + 'static,
    N: Notifier + 'static,
{
    let tokens = Arc::clone(&app_state.token_service);

    App::new()
        .app_data(app_state)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/user")
                .route("/register", web::post().to(register::<R, N>))
                .route("/login", web::post().to(login::<R, N>))
                .route("/refresh-token", web::post().to(refresh_token::<R, N>))
                .service(
                    web::resource("/profile")
                        .wrap(JwtAuth::new(Arc::clone(&tokens)))
                        .route(web::get().to(get_profile::<R, N>))
                        .route(web::patch().to(update_profile::<R, N>)),
                ),
        )
        .service(
            web::scope("/admin/user")
                .wrap(JwtAuth::new(tokens))
                .route("", web::get().to(list_users::<R, N>))
                .route("", web::post().to(create_user::<R, N>))
                .route("/search", web::get().to(search_users::<R, N>))
                .route("/metrics", web::get().to(user_metrics::<R, N>))
                .route("/{id}", web::get().to(find_user::<R, N>))
                .route("/{id}", web::patch().to(update_user::<R, N>))
                .route("/{id}", web::delete().to(remove_user::<R, N>))
                .route("/{id}/update-email", web::patch().to(update_email::<R, N>))
                .route(
                    "/{id}/update-phone-number",
                    web::patch().to(update_phone::<R, N>),
                )
                .route("/{id}/suspend", web::patch().to(suspend_user::<R, N>))
                .route("/{id}/unsuspend", web::patch().to(unsuspend_user::<R, N>))
                .route("/{id}/close-account", web::patch().to(close_account::<R, N>))
                .route("/{id}/open-account", web::patch().to(open_account::<R, N>)),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "kobo-accounts-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(Envelope::<()>::error(
        "Not Found",
        "The requested resource was not found",
    ))
}
