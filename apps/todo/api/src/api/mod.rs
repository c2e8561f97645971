use axum::{
    Router, middleware,
    routing::{delete, post},
};
use axum_helpers::auth_middleware;

use crate::state::AppState;

pub mod tasks;
pub mod users;

/// Gateway routes without the `/api` prefix (added by `create_router`).
pub fn routes(state: AppState) -> Router {
    let public = Router::new()
        .route("/v1/register", post(users::register))
        .route("/v1/login", post(users::login))
        .route("/v1/logout", post(users::logout));

    let protected = Router::new()
        .route("/v1/user/", delete(users::delete_user))
        .route(
            "/v1/task/",
            post(tasks::create_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_tasks),
        )
        .route("/v1/tasks", post(tasks::list_tasks))
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            auth_middleware,
        ));

    public.merge(protected).with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::client::MockTodoClient;
    use axum::body::Body;
    use axum::http::{Request, header};
    use axum_helpers::{JwtConfig, TokenService};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use uuid::Uuid;

    pub const SECRET: &str = "gateway-test-secret-of-sufficient-length";

    pub fn tokens() -> TokenService {
        TokenService::new(&JwtConfig::new(SECRET).unwrap())
    }

    pub fn app(client: MockTodoClient) -> Router {
        routes(AppState {
            client: Arc::new(client),
            tokens: tokens(),
            secure_cookies: false,
        })
    }

    pub fn bearer(user: Uuid) -> String {
        format!("Bearer {}", tokens().issue(user).unwrap())
    }

    pub fn json_request(method: &str, uri: &str, user: Uuid, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, bearer(user))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }
}
