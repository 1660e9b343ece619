use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use kb_api::app::{create_app, AppState};
use kb_core::services::admin::AdminService;
use kb_core::services::auth::{AuthService, AuthServiceConfig};
use kb_core::services::token::TokenService;
use kb_infra::database::connection::DatabasePool;
use kb_infra::database::mysql::MySqlUserRepository;
use kb_infra::notify::LogNotifier;
use kb_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(anyhow::Error::msg)?;

    let pool = DatabasePool::new(&config.database)
        .await
        .context("failed to create database pool")?;
    pool.health_check()
        .await
        .context("database health check failed")?;

    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let notifier = Arc::new(LogNotifier);
    let token_service = Arc::new(TokenService::new(
        &config.auth.jwt_secret,
        config.auth.token_ttl_secs,
    ));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        Arc::clone(&notifier),
        Arc::clone(&token_service),
        AuthServiceConfig {
            assets: config.assets.clone(),
            acquire_secret: config.auth.acquire_secret.clone(),
        },
    ));
    let admin_service = Arc::new(AdminService::new(
        user_repository,
        notifier,
        config.assets.clone(),
    ));

    let app_state = web::Data::new(AppState {
        auth_service,
        admin_service,
        token_service,
    });

    let bind_address = config.server.bind_address();
    tracing::info!(%bind_address, "starting kobo accounts api");

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {bind_address}"))?
        .run()
        .await?;

    Ok(())
}
