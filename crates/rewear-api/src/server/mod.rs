//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use rewear_common::{AppConfig, AppError, JwtService};
use rewear_db::{
    create_pool, default_migrations_dir, run_migrations, PgAdminLogRepository, PgItemRepository,
    PgLedgerRepository, PgSessionRepository, PgSwapRequestRepository, PgUserRepository,
    PoolConfig,
};
use rewear_service::{AuthService, ServiceContextBuilder, SwapPolicy};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health probes get the request-id and trace layers but skip rate limiting.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = apply_middleware(health_routes());

    Ok(api.merge(health).with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        let dir = config
            .database
            .migrations_dir
            .clone()
            .unwrap_or_else(default_migrations_dir);
        run_migrations(&pool, &dir)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .item_repo(Arc::new(PgItemRepository::new(pool.clone())))
        .swap_repo(Arc::new(PgSwapRequestRepository::new(pool.clone())))
        .ledger_repo(Arc::new(PgLedgerRepository::new(pool.clone())))
        .admin_log_repo(Arc::new(PgAdminLogRepository::new(pool.clone())))
        .session_repo(Arc::new(PgSessionRepository::new(pool.clone())))
        .jwt_service(jwt_service)
        .swap_policy(SwapPolicy {
            completion_parties_only: config.swap.completion_parties_only,
        })
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    if let Some(admin) = &config.admin {
        let user = AuthService::new(&service_context)
            .ensure_admin(&admin.email, &admin.password, &admin.name)
            .await?;
        info!(user_id = %user.id, email = %user.email, "Admin account ready");
    }

    Ok(AppState::new(service_context, pool, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
