use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::comments;
use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .route(
            "/repositories/{repository_id}/comments",
            post(comments::create_comment),
        )
        .route(
            "/repositories/{repository_id}/comments/{comment_id}",
            delete(comments::delete_comment),
        )
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::comments::{CommentResponse, DeleteCommentResponse};
    use crate::api::types::{ApiErrorResponse, ApiErrorType};
    use crate::domain::user::{User, UserId};
    use crate::infrastructure::auth::{JwtConfig, JwtGenerator, JwtService};
    use crate::infrastructure::seed::SeedFile;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde::de::DeserializeOwned;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const SECRET: &str = "router-test-secret";

    const SEED: &str = r#"
        [[users]]
        id = "owner"
        username = "owner"

        [[users]]
        id = "user"
        username = "user"

        [[users]]
        id = "admin"
        username = "admin"
        admin = true

        [[teams]]
        id = "core"
        name = "Core"
        owners = ["owner"]

        [[namespaces]]
        id = "public-ns"
        team = "core"
        visibility = "public"

        [[namespaces]]
        id = "protected-ns"
        team = "core"
        visibility = "protected"

        [[namespaces]]
        id = "private-ns"
        team = "core"
        visibility = "private"

        [[repositories]]
        id = "visible"
        namespace = "public-ns"

        [[repositories]]
        id = "protected"
        namespace = "protected-ns"

        [[repositories]]
        id = "invisible"
        namespace = "private-ns"
    "#;

    struct TestApp {
        state: AppState,
        router: Router,
    }

    impl TestApp {
        async fn new() -> Self {
            let seed = SeedFile::from_toml(SEED).unwrap();
            let state = crate::create_app_state_from_seed(seed, JwtConfig::new(SECRET, 1))
                .await
                .unwrap();
            let router = create_router_with_state(state.clone());

            Self { state, router }
        }

        fn token(&self, user: &str) -> String {
            let user = User::new(UserId::new(user).unwrap(), user);
            self.state.jwt_service.generate(&user).unwrap()
        }

        async fn count(&self) -> usize {
            self.state.comment_service.count().await.unwrap()
        }

        async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };

            (status, body)
        }

        async fn create(&self, user: Option<&str>, repository: &str, body: Value) -> (StatusCode, Value) {
            self.create_raw(user, repository, Some("application/json"), Body::from(body.to_string()))
                .await
        }

        async fn create_raw(
            &self,
            user: Option<&str>,
            repository: &str,
            content_type: Option<&str>,
            body: Body,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder()
                .method("POST")
                .uri(format!("/repositories/{}/comments", repository));

            if let Some(content_type) = content_type {
                builder = builder.header(header::CONTENT_TYPE, content_type);
            }
            if let Some(user) = user {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)));
            }

            self.send(builder.body(body).unwrap()).await
        }

        async fn delete(&self, user: Option<&str>, repository: &str, comment_id: &str) -> (StatusCode, Value) {
            let mut builder = Request::builder()
                .method("DELETE")
                .uri(format!("/repositories/{}/comments/{}", repository, comment_id));

            if let Some(user) = user {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)));
            }

            self.send(builder.body(Body::empty()).unwrap()).await
        }

        async fn seed_comment(&self) -> CommentResponse {
            let (status, body) = self
                .create(Some("owner"), "invisible", valid_comment())
                .await;
            assert_eq!(status, StatusCode::OK);
            parse(body)
        }
    }

    fn valid_comment() -> Value {
        json!({"comment": {"body": "short test comment"}})
    }

    fn parse<T: DeserializeOwned>(body: Value) -> T {
        serde_json::from_value(body).unwrap()
    }

    #[tokio::test]
    async fn test_owner_creates_comment_on_private_repository() {
        let app = TestApp::new().await;

        let (status, body) = app.create(Some("owner"), "invisible", valid_comment()).await;

        assert_eq!(status, StatusCode::OK);
        let comment: CommentResponse = parse(body);
        assert_eq!(comment.author.as_deref(), Some("owner"));
        assert_eq!(comment.repository_id, "invisible");
        assert_eq!(app.count().await, 1);
    }

    #[tokio::test]
    async fn test_user_creates_comment_on_public_repository() {
        let app = TestApp::new().await;

        let (status, _) = app.create(Some("user"), "visible", valid_comment()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(app.count().await, 1);
    }

    #[tokio::test]
    async fn test_anonymous_creates_comment_on_public_repository() {
        let app = TestApp::new().await;

        let (status, body) = app.create(None, "visible", valid_comment()).await;

        assert_eq!(status, StatusCode::OK);
        let comment: CommentResponse = parse(body);
        assert!(comment.author.is_none());
        assert_eq!(app.count().await, 1);
    }

    #[tokio::test]
    async fn test_user_creates_comment_on_protected_repository() {
        let app = TestApp::new().await;

        let (status, _) = app.create(Some("user"), "protected", valid_comment()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(app.count().await, 1);
    }

    #[tokio::test]
    async fn test_anonymous_cannot_comment_on_protected_repository() {
        let app = TestApp::new().await;

        let (status, body) = app.create(None, "protected", valid_comment()).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let error: ApiErrorResponse = parse(body);
        assert_eq!(error.error.code.as_deref(), Some("not_logged_in"));
        assert_eq!(app.count().await, 0);
    }

    #[tokio::test]
    async fn test_admin_creates_comment_on_private_repository() {
        let app = TestApp::new().await;

        let (status, _) = app.create(Some("admin"), "invisible", valid_comment()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(app.count().await, 1);
    }

    #[tokio::test]
    async fn test_user_cannot_comment_on_private_repository() {
        let app = TestApp::new().await;

        let (status, body) = app.create(Some("user"), "invisible", valid_comment()).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let error: ApiErrorResponse = parse(body);
        assert_eq!(error.error.code.as_deref(), Some("not_team_owner"));
        assert_eq!(app.count().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_comment_is_unprocessable() {
        let app = TestApp::new().await;

        let (status, body) = app
            .create(Some("owner"), "invisible", json!({"comment": {"foo": "not valid"}}))
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let error: ApiErrorResponse = parse(body);
        assert_eq!(error.error.param.as_deref(), Some("body"));
        assert_eq!(error.error.errors[0].code, "required");
        assert_eq!(app.count().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_comment_from_unauthorized_user_is_unauthorized() {
        let app = TestApp::new().await;

        let (status, _) = app
            .create(Some("user"), "invisible", json!({"foo": "not valid"}))
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_empty_body_from_non_owner_is_unauthorized() {
        let app = TestApp::new().await;

        let (status, body) = app
            .create_raw(Some("user"), "invisible", None, Body::empty())
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let error: ApiErrorResponse = parse(body);
        assert_eq!(error.error.code.as_deref(), Some("not_team_owner"));
        assert_eq!(app.count().await, 0);
    }

    #[tokio::test]
    async fn test_empty_body_from_owner_is_unprocessable() {
        let app = TestApp::new().await;

        let (status, body) = app
            .create_raw(Some("owner"), "invisible", None, Body::empty())
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let error: ApiErrorResponse = parse(body);
        assert_eq!(error.error.param.as_deref(), Some("body"));
        assert_eq!(app.count().await, 0);
    }

    #[tokio::test]
    async fn test_malformed_json_from_anonymous_is_unauthorized() {
        let app = TestApp::new().await;

        let (status, _) = app
            .create_raw(None, "invisible", Some("application/json"), Body::from("{"))
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_json_from_owner_is_unprocessable() {
        let app = TestApp::new().await;

        let (status, _) = app
            .create_raw(Some("owner"), "invisible", Some("application/json"), Body::from("{"))
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_body_without_content_type_is_accepted() {
        let app = TestApp::new().await;

        let (status, _) = app
            .create_raw(Some("owner"), "invisible", None, Body::from(valid_comment().to_string()))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(app.count().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_repository_is_not_found() {
        let app = TestApp::new().await;

        let (status, _) = app.create(Some("admin"), "missing", valid_comment()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthorized() {
        let app = TestApp::new().await;

        let request = Request::builder()
            .method("POST")
            .uri("/repositories/visible/comments")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, "Bearer not-a-token")
            .body(Body::from(valid_comment().to_string()))
            .unwrap();

        let (status, body) = app.send(request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let error: ApiErrorResponse = parse(body);
        assert_eq!(error.error.error_type, ApiErrorType::AuthenticationError);
        assert!(error.error.message.starts_with("Invalid JWT"));
        assert_eq!(app.count().await, 0);
    }

    #[tokio::test]
    async fn test_token_for_unknown_user_is_unauthorized() {
        let app = TestApp::new().await;
        let ghost = User::new(UserId::new("ghost").unwrap(), "ghost");
        let token = JwtService::new(JwtConfig::new(SECRET, 1)).generate(&ghost).unwrap();

        let request = Request::builder()
            .method("POST")
            .uri("/repositories/visible/comments")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::from(valid_comment().to_string()))
            .unwrap();

        let (status, _) = app.send(request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_author_deletes_comment() {
        let app = TestApp::new().await;
        let comment = app.seed_comment().await;

        let (status, body) = app.delete(Some("owner"), "invisible", &comment.id).await;

        assert_eq!(status, StatusCode::OK);
        let deleted: DeleteCommentResponse = parse(body);
        assert!(deleted.deleted);
        assert_eq!(deleted.id, comment.id);
        assert_eq!(app.count().await, 0);
    }

    #[tokio::test]
    async fn test_admin_deletes_comment() {
        let app = TestApp::new().await;
        let comment = app.seed_comment().await;

        let (status, _) = app.delete(Some("admin"), "invisible", &comment.id).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(app.count().await, 0);
    }

    #[tokio::test]
    async fn test_non_author_cannot_delete_comment() {
        let app = TestApp::new().await;
        let comment = app.seed_comment().await;

        let (status, body) = app.delete(Some("user"), "invisible", &comment.id).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let error: ApiErrorResponse = parse(body);
        assert_eq!(error.error.code.as_deref(), Some("not_author"));
        assert_eq!(app.count().await, 1);
    }

    #[tokio::test]
    async fn test_anonymous_cannot_delete_comment() {
        let app = TestApp::new().await;
        let comment = app.seed_comment().await;

        let (status, _) = app.delete(None, "invisible", &comment.id).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(app.count().await, 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_comment_is_not_found() {
        let app = TestApp::new().await;

        let (status, _) = app
            .delete(Some("admin"), "invisible", "7f1d2c5e-8a4b-4e6f-9c3d-2b1a0e9f8d7c")
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_malformed_comment_id_is_bad_request() {
        let app = TestApp::new().await;

        let (status, body) = app.delete(Some("admin"), "invisible", "not-a-uuid").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiErrorResponse = parse(body);
        assert_eq!(error.error.param.as_deref(), Some("id"));
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = TestApp::new().await;

        for path in ["/health", "/live", "/ready"] {
            let request = Request::builder().uri(path).body(Body::empty()).unwrap();
            let (status, _) = app.send(request).await;
            assert_eq!(status, StatusCode::OK, "{} failed", path);
        }
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let app = TestApp::new().await;

        let request = Request::builder()
            .uri("/health")
            .header("x-request-id", "req-7")
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();

        assert_eq!(response.headers()["x-request-id"], "req-7");
    }
}
