//! Router assembly, liveness endpoint and graceful serving.
//!
//! ```ignore
//! use axum_helpers::server::{create_router, health_router, serve};
//!
//! let app = create_router(api_routes, health_router(core_config::app_info!()));
//! serve(app, &config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod app;
pub mod health;

pub use app::{create_router, serve};
pub use health::{HealthResponse, health_router};
