use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use super::cookie::find_session_token;
use super::token::TokenService;
use crate::errors::AppError;

/// Authenticated caller, inserted by [`auth_middleware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

/// Session cookie first, then `Authorization: Bearer <token>`.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(find_session_token)
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .filter(|token| !token.is_empty())
        })
}

/// Rejects unauthenticated requests with 401 and exposes [`CurrentUser`] to handlers.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/api/v1/task/", post(create_task))
///     .layer(axum::middleware::from_fn_with_state(tokens, auth_middleware));
/// ```
pub async fn auth_middleware(
    State(tokens): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = extract_token(request.headers()) else {
        tracing::debug!("No token in cookie or Authorization header");
        return Err(AppError::Unauthorized("Authentication required".to_string()));
    };

    let claims = tokens
        .verify(token)
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

    request.extensions_mut().insert(CurrentUser(claims.sub));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn tokens() -> TokenService {
        TokenService::new(&JwtConfig::new("0123456789abcdef0123456789abcdef").unwrap())
    }

    async fn whoami(CurrentUser(id): CurrentUser) -> String {
        id.to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/me", get(whoami))
            .layer(middleware::from_fn_with_state(tokens(), auth_middleware))
    }

    async fn call(request: Request<Body>) -> (StatusCode, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_cookie_token_accepted() {
        let user = Uuid::now_v7();
        let token = tokens().issue(user).unwrap();

        let request = axum::http::Request::builder()
            .uri("/me")
            .header(header::COOKIE, format!("Authorization={token}"))
            .body(Body::empty())
            .unwrap();

        assert_eq!(call(request).await, (StatusCode::OK, user.to_string()));
    }

    #[tokio::test]
    async fn test_bearer_token_accepted() {
        let user = Uuid::now_v7();
        let token = tokens().issue(user).unwrap();

        let request = axum::http::Request::builder()
            .uri("/me")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();

        assert_eq!(call(request).await, (StatusCode::OK, user.to_string()));
    }

    #[tokio::test]
    async fn test_cookie_preferred_over_bearer() {
        let cookie_user = Uuid::now_v7();
        let bearer_user = Uuid::now_v7();

        let request = axum::http::Request::builder()
            .uri("/me")
            .header(
                header::COOKIE,
                format!("Authorization={}", tokens().issue(cookie_user).unwrap()),
            )
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", tokens().issue(bearer_user).unwrap()),
            )
            .body(Body::empty())
            .unwrap();

        assert_eq!(call(request).await.1, cookie_user.to_string());
    }

    #[tokio::test]
    async fn test_missing_token_unauthorized() {
        let request = axum::http::Request::builder().uri("/me").body(Body::empty()).unwrap();
        assert_eq!(call(request).await.0, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_header_unauthorized() {
        let request = axum::http::Request::builder()
            .uri("/me")
            .header(header::AUTHORIZATION, "Token abc")
            .body(Body::empty())
            .unwrap();
        assert_eq!(call(request).await.0, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_unauthorized() {
        let request = axum::http::Request::builder()
            .uri("/me")
            .header(header::COOKIE, "Authorization=forged")
            .body(Body::empty())
            .unwrap();
        assert_eq!(call(request).await.0, StatusCode::UNAUTHORIZED);
    }
}
