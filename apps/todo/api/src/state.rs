use axum_helpers::TokenService;
use std::sync::Arc;

use crate::client::TodoClient;

/// Shared handler state; clones are cheap.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn TodoClient>,
    pub tokens: TokenService,
    /// Add `Secure` to the session cookie
    pub secure_cookies: bool,
}
