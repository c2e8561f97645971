//! gRPC server initialization and lifecycle

use core_config::{Environment, FromEnv, env_parse, shutdown_signal};
use database::postgres::PostgresConfig;
use domain_tasks::{PgTaskRepository, TaskService};
use domain_users::{PgUserRepository, UserService};
use eyre::{Result, WrapErr};
use grpc_client::server::{GrpcServer, ServerConfig};
use migration::Migrator;
use rpc::todo::todo_service_server::{SERVICE_NAME, TodoServiceServer};
use tonic::codec::CompressionEncoding;
use tonic::transport::Server;
use tonic_health::server::health_reporter;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

use crate::service::TodoServiceImpl;

/// Run the storage service until SIGINT/SIGTERM.
///
/// On a signal the health status flips to not-serving, new connections are
/// refused and in-flight RPCs get `GRPC_SHUTDOWN_GRACE_SECS` to finish.
pub async fn run() -> Result<()> {
    let environment = Environment::from_env();
    core_config::tracing::init_tracing(&environment);

    let db_config = PostgresConfig::from_env().wrap_err("Failed to load database configuration")?;
    let server_config = ServerConfig::from_env().wrap_err("Failed to load gRPC configuration")?;
    let run_migrations: bool =
        env_parse("RUN_MIGRATIONS", "true").wrap_err("Failed to read RUN_MIGRATIONS")?;

    info!("Connecting to database...");
    let db = database::postgres::connect_from_config_with_retry(db_config, None)
        .await
        .wrap_err("Failed to connect to database")?;

    if run_migrations {
        database::postgres::run_migrations::<Migrator>(&db, env!("CARGO_PKG_NAME"))
            .await
            .wrap_err("Failed to run migrations")?;
    }

    database::postgres::check_health(&db)
        .await
        .wrap_err("Database health check failed")?;

    let tasks = TaskService::new(PgTaskRepository::new(db.clone()));
    let users = UserService::new(PgUserRepository::new(db.clone()));
    let todo_service = TodoServiceImpl::new(tasks, users);

    let mut todo_server = TodoServiceServer::new(todo_service)
        .max_decoding_message_size(server_config.max_decoding_message_size)
        .max_encoding_message_size(server_config.max_encoding_message_size);
    if server_config.enable_compression {
        todo_server = todo_server
            .accept_compressed(CompressionEncoding::Zstd)
            .send_compressed(CompressionEncoding::Zstd);
    }

    let (health_reporter, health_service) = health_reporter();
    GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;

    let addr = server_config
        .socket_addr()
        .wrap_err("Invalid gRPC listen address")?;
    GrpcServer::log_startup(&server_config, SERVICE_NAME);

    let (drain_tx, drain_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(
        Server::builder()
            .add_service(health_service)
            .add_service(todo_server)
            .serve_with_shutdown(addr, async move {
                let _ = drain_rx.await;
            }),
    );

    shutdown_signal().await;
    GrpcServer::mark_not_serving(&health_reporter, SERVICE_NAME).await;
    let _ = drain_tx.send(());

    match tokio::time::timeout(server_config.shutdown_grace, server).await {
        Ok(joined) => joined
            .wrap_err("gRPC server task panicked")?
            .wrap_err("gRPC server failed")?,
        Err(_) => warn!(
            grace_secs = server_config.shutdown_grace.as_secs(),
            "In-flight RPCs did not finish within the grace period, forcing exit"
        ),
    }

    if let Err(e) = db.close().await {
        error!(error = %e, "Failed to close database pool");
    }
    info!("Shutdown complete");
    Ok(())
}
