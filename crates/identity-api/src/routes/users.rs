//! 사용자 endpoint.
//!
//! - `POST /signup` - 회원 가입
//! - `POST /login` - 로그인 (Bearer 토큰 발급)
//! - `PATCH /admin/users/{user_id}/roles` - 관리자 승격 (ADMIN 전용)

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{patch, post},
    Json, Router,
};
use identity_core::{Role, User};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::IdentityContext;
use crate::error::{ApiResult, ErrorBody};
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// 회원 가입 요청.
#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    /// 로그인 이름 (고유)
    pub username: String,
    pub password: String,
    /// 표시 이름
    pub nickname: String,
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("nickname", &self.nickname)
            .finish()
    }
}

/// 로그인 요청.
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// 사용자 응답. 비밀번호 해시는 포함하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub username: String,
    pub nickname: String,
    pub role: Role,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            nickname: user.nickname.clone(),
            role: user.role,
        }
    }
}

/// 로그인 응답.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// `"Bearer <jwt>"` 형식 토큰
    #[schema(example = "Bearer eyJhbGciOiJIUzI1NiJ9...")]
    pub token: String,
}

/// 회원 가입.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "가입 성공", body = UserResponse),
        (status = 422, description = "잘못된 요청 본문", body = ErrorBody),
        (status = 409, description = "이미 가입된 사용자", body = ErrorBody),
        (status = 500, description = "서버 오류", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .users
        .signup(&req.username, &req.password, &req.nickname)
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// 로그인.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = TokenResponse),
        (status = 401, description = "아이디 또는 비밀번호 불일치", body = ErrorBody),
        (status = 500, description = "서버 오류", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let token = state.users.login(&req.username, &req.password).await?;

    Ok(Json(TokenResponse {
        token: token.into_string(),
    }))
}

/// 관리자 승격.
#[utoipa::path(
    patch,
    path = "/admin/users/{user_id}/roles",
    params(("user_id" = i64, Path, description = "승격할 사용자 ID")),
    responses(
        (status = 200, description = "승격 성공", body = UserResponse),
        (status = 400, description = "토큰 누락 또는 잘못된 사용자 ID", body = ErrorBody),
        (status = 401, description = "유효하지 않은 토큰", body = ErrorBody),
        (status = 403, description = "관리자 권한 필요", body = ErrorBody),
        (status = 404, description = "사용자 없음", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn promote_to_admin(
    State(state): State<Arc<AppState>>,
    IdentityContext(caller): IdentityContext,
    ApiPath(user_id): ApiPath<i64>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.users.promote_to_admin(&caller, user_id).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// 사용자 라우터.
pub fn users_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/admin/users/{user_id}/roles", patch(promote_to_admin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SigningKey;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    const TEST_SECRET: &str = "bXl0ZXN0c2VjcmV0bXl0ZXN0c2VjcmV0bXl0ZXN0c2VjcmV0bXl0ZXN0c2VjcmV0";

    fn app() -> Router {
        let state = AppState::in_memory(SigningKey::from_base64(TEST_SECRET).unwrap()).unwrap();
        users_router().with_state(Arc::new(state))
    }

    fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_user_response_omits_password_hash() {
        let user = User {
            id: 1,
            username: "user1".into(),
            password_hash: "$argon2id$secret".into(),
            nickname: "nick".into(),
            role: Role::User,
        };

        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"username": "user1", "nickname": "nick", "role": "USER"})
        );
    }

    #[test]
    fn test_request_debug_redacts_password() {
        let req = LoginRequest {
            username: "user1".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{:?}", req).contains("hunter2"));
    }

    #[tokio::test]
    async fn test_signup_returns_user() {
        let response = app()
            .oneshot(json_request(
                Method::POST,
                "/signup",
                serde_json::json!({"username": "user1", "password": "password", "nickname": "nick"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["username"], "user1");
        assert_eq!(body["role"], "USER");
        assert!(body.get("passwordHash").is_none());
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_signup_with_missing_field_uses_error_body() {
        let response = app()
            .oneshot(json_request(
                Method::POST,
                "/signup",
                serde_json::json!({"username": "x"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_REQUEST");
        assert!(body["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_login_with_unknown_user_is_unauthorized() {
        let response = app()
            .oneshot(json_request(
                Method::POST,
                "/login",
                serde_json::json!({"username": "ghost", "password": "password"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_promote_without_gate_is_unauthenticated() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::PATCH)
                    .uri("/admin/users/1/roles")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "UNAUTHENTICATED");
    }
}
