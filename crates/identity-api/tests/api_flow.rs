//! 가입 → 로그인 → 관리자 승격 HTTP 흐름 통합 테스트.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use identity_api::auth::SigningKey;
use identity_api::repository::{MemoryUserRepository, UserRepository};
use identity_api::{create_router, AppState};
use identity_core::Role;
use serde_json::{json, Value};
use tower::ServiceExt;

const TEST_SECRET: &str = "bXl0ZXN0c2VjcmV0bXl0ZXN0c2VjcmV0bXl0ZXN0c2VjcmV0bXl0ZXN0c2VjcmV0";

struct TestApp {
    router: Router,
    repo: Arc<MemoryUserRepository>,
}

impl TestApp {
    fn new() -> Self {
        let repo = Arc::new(MemoryUserRepository::new());
        let key = SigningKey::from_base64(TEST_SECRET).unwrap();
        let state = AppState::new(key, repo.clone()).unwrap();

        Self {
            router: create_router(Arc::new(state), None),
            repo,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }

    async fn signup(&self, username: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/signup",
            None,
            Some(json!({"username": username, "password": "password", "nickname": format!("{}-nick", username)})),
        )
        .await
    }

    async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/login",
            None,
            Some(json!({"username": username, "password": password})),
        )
        .await
    }

    async fn token_for(&self, username: &str) -> String {
        let (status, body) = self.login(username, "password").await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_signup_login_promote_flow() {
    let app = TestApp::new();

    let (status, body) = app.signup("user1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"username": "user1", "nickname": "user1-nick", "role": "USER"}));

    let (status, _) = app.signup("user2").await;
    assert_eq!(status, StatusCode::OK);

    // 일반 사용자는 승격 불가
    let user_token = app.token_for("user1").await;
    assert!(user_token.starts_with("Bearer "));

    let (status, body) = app
        .send(Method::PATCH, "/admin/users/2/roles", Some(&user_token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "ACCESS_DENIED");
    assert_eq!(
        body["error"]["message"],
        "관리자 권한이 필요한 요청입니다. 접근 권한이 없습니다."
    );

    // 관리자 부여 후 새 토큰 발급 (역할은 토큰에 기록됨)
    app.repo.update_role(1, Role::Admin).await.unwrap();
    let admin_token = app.token_for("user1").await;

    let (status, body) = app
        .send(Method::PATCH, "/admin/users/2/roles", Some(&admin_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"username": "user2", "nickname": "user2-nick", "role": "ADMIN"}));

    // 이미 ADMIN이어도 성공
    let (status, body) = app
        .send(Method::PATCH, "/admin/users/2/roles", Some(&admin_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "ADMIN");

    let (status, body) = app
        .send(Method::PATCH, "/admin/users/999/roles", Some(&admin_token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn test_duplicate_signup_is_conflict() {
    let app = TestApp::new();
    app.signup("user1").await;

    let (status, body) = app.signup("user1").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "DUPLICATE_USER");
    assert_eq!(body["error"]["message"], "이미 가입된 사용자입니다.");
    assert_eq!(app.repo.len().await, 1);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_look_identical() {
    let app = TestApp::new();
    app.signup("user1").await;

    let wrong_password = app.login("user1", "wrongpass").await;
    let unknown_user = app.login("nobody", "password").await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_user);
    assert!(wrong_password.1.get("token").is_none());
}

#[tokio::test]
async fn test_gate_rejects_missing_token() {
    let app = TestApp::new();

    let (status, body) = app
        .send(Method::PATCH, "/admin/users/1/roles", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_TOKEN");
    assert_eq!(body["error"]["message"], "JWT 토큰이 필요합니다.");

    // 스킴 없는 토큰도 누락으로 취급
    let (status, _) = app
        .send(Method::PATCH, "/admin/users/1/roles", Some("InvalidToken"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_gate_rejects_invalid_token() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::PATCH,
            "/admin/users/1/roles",
            Some("Bearer invalid.token.here"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "MALFORMED_TOKEN");
    assert_eq!(body["error"]["message"], "유효하지 않은 JWT 토큰입니다.");
}

#[tokio::test]
async fn test_documentation_is_public() {
    let app = TestApp::new();

    let (status, body) = app
        .send(Method::GET, "/v3/api-docs/openapi.json", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/signup").is_some());
    assert!(body["paths"].get("/admin/users/{user_id}/roles").is_some());
}

#[tokio::test]
async fn test_malformed_signup_body_uses_error_body() {
    let app = TestApp::new();

    let (status, body) = app
        .send(Method::POST, "/signup", None, Some(json!({"username": "x"})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_non_numeric_user_id_uses_error_body() {
    let app = TestApp::new();
    app.signup("admin").await;
    app.repo.update_role(1, Role::Admin).await.unwrap();
    let admin_token = app.token_for("admin").await;

    let (status, body) = app
        .send(Method::PATCH, "/admin/users/abc/roles", Some(&admin_token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
    assert!(body["error"]["message"].is_string());
}
