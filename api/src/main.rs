use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use re_api::{app::create_app, routes::auth::AppState, telemetry};
use re_core::services::{AuthService, AuthServiceConfig, TokenService, TokenServiceConfig};
use re_infra::CredentialStore;
use re_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is not an error
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;
    telemetry::init_tracing(&config.logging)?;
    config.validate().context("invalid configuration")?;

    tracing::info!(
        environment = %config.environment,
        "Starting RealEstate API server"
    );
    if config.auth.jwt.is_using_default_secret() {
        tracing::warn!("JWT_SECRET not set, using the development secret");
    }

    let (store, pool) = CredentialStore::connect(&config.database)
        .await
        .context("failed to initialise credential store")?;
    tracing::info!(store = store.kind(), "Credential store ready");

    let token_service = Arc::new(
        TokenService::new(TokenServiceConfig::from(&config.auth.jwt))
            .context("failed to initialise token service")?,
    );
    let auth_service = Arc::new(AuthService::new(
        Arc::new(store),
        token_service,
        AuthServiceConfig::from(&config.auth),
    ));
    let app_state = web::Data::new(AppState::new(auth_service));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let cors_config = config.cors.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &cors_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    if let Some(pool) = pool {
        pool.close().await;
    }
    tracing::info!("Server stopped");

    Ok(())
}
