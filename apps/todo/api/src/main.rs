use axum_helpers::{TokenService, create_router, health_router, serve};
use core_config::tracing::{init_tracing, install_color_eyre};
use eyre::WrapErr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod auth;
mod client;
mod config;
mod error;
mod state;

use client::GrpcTodoClient;
use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        addr = %config.todo_service_addr,
        timeout_ms = config.rpc_timeout.as_millis() as u64,
        "Using TodoService"
    );
    let client = GrpcTodoClient::connect_lazy(&config.todo_service_addr, config.rpc_timeout)
        .wrap_err("Invalid TODO_SERVICE_ADDR")?;

    let state = AppState {
        client: Arc::new(client),
        tokens: TokenService::new(&config.jwt),
        secure_cookies: config.environment.use_secure_cookies(),
    };

    let app = create_router(api::routes(state), health_router(config.app));

    info!("Starting todo gateway (30s shutdown timeout)");
    serve(app, &config.server, Duration::from_secs(30), async {})
        .await
        .wrap_err("Server error")?;

    info!("Todo gateway shutdown complete");
    Ok(())
}
