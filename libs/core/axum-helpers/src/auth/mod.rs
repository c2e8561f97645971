//! Stateless session authentication.
//!
//! A signed token carrying the user id travels in the `Authorization` cookie
//! or as a bearer token. [`auth_middleware`] verifies it and exposes the
//! caller as [`CurrentUser`].

pub mod config;
pub mod cookie;
pub mod middleware;
pub mod token;

pub use config::JwtConfig;
pub use cookie::{AUTH_COOKIE, clear_session_cookie, find_session_token, session_cookie};
pub use middleware::{CurrentUser, auth_middleware};
pub use token::{Claims, TOKEN_TTL, TokenError, TokenService};
