//! # Axum Helpers
//!
//! Shared HTTP plumbing for the todo gateway.
//!
//! - **[`auth`]**: signed identity tokens, session cookie, auth middleware
//! - **[`errors`]**: structured JSON error responses with error codes
//! - **[`extractors`]**: validated form bodies
//! - **[`server`]**: router layers, health endpoint, graceful shutdown

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod server;

pub use auth::{
    AUTH_COOKIE, Claims, CurrentUser, JwtConfig, TOKEN_TTL, TokenError, TokenService,
    auth_middleware, clear_session_cookie, find_session_token, session_cookie,
};

pub use server::{HealthResponse, create_router, health_router, serve};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::ValidatedForm;
