//! 인증 게이트 미들웨어.
//!
//! 공개 경로를 제외한 모든 요청에서 Bearer 토큰을 추출하고 검증한 뒤,
//! 식별 정보를 요청 extensions에 첨부합니다.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use identity_core::Identity;

use super::context::IdentityContext;
use super::jwt::{TokenError, TokenValidator, BEARER_PREFIX};
use crate::error::{ErrorBody, ErrorDetail};
use crate::metrics::record_gate_decision;

/// 토큰 없이 접근 가능한 경로 접두사.
pub const PUBLIC_PATH_PREFIXES: &[&str] = &[
    "/signup",
    "/login",
    "/swagger",
    "/v3/api-docs",
    "/favicon.ico",
];

/// 토큰 누락 시 메시지.
pub const MISSING_TOKEN_MESSAGE: &str = "JWT 토큰이 필요합니다.";

/// 토큰 검증 실패 시 메시지.
pub const INVALID_TOKEN_MESSAGE: &str = "유효하지 않은 JWT 토큰입니다.";

/// 게이트 거부 사유.
#[derive(Debug, thiserror::Error)]
pub enum GateRejection {
    /// Authorization 헤더 없음 또는 Bearer 스킴 아님
    #[error("{}", MISSING_TOKEN_MESSAGE)]
    MissingToken,
    /// 토큰 검증 실패
    #[error("{}", INVALID_TOKEN_MESSAGE)]
    Invalid(TokenError),
    /// 게이트를 거치지 않은 요청에서 식별 정보 요청
    #[error("인증 정보가 없습니다.")]
    Unauthenticated,
}

impl GateRejection {
    pub fn status(&self) -> StatusCode {
        match self {
            GateRejection::MissingToken => StatusCode::BAD_REQUEST,
            GateRejection::Invalid(_) | GateRejection::Unauthenticated => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            GateRejection::MissingToken => "MISSING_TOKEN",
            GateRejection::Invalid(e) => e.code(),
            GateRejection::Unauthenticated => "UNAUTHENTICATED",
        }
    }
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };

        (self.status(), Json(body)).into_response()
    }
}

/// 요청 인증 게이트.
#[derive(Debug, Clone)]
pub struct RequestGate {
    validator: TokenValidator,
    public_prefixes: Vec<String>,
}

impl RequestGate {
    /// 기본 공개 경로로 게이트 생성.
    pub fn new(validator: TokenValidator) -> Self {
        Self {
            validator,
            public_prefixes: PUBLIC_PATH_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// 인증 없이 통과하는 경로인지 확인 (접두사 일치).
    pub fn is_public_path(&self, path: &str) -> bool {
        self.public_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// 헤더에서 토큰을 추출하고 검증.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, GateRejection> {
        let raw = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .filter(|value| value.starts_with(BEARER_PREFIX))
            .ok_or(GateRejection::MissingToken)?;

        let body = TokenValidator::strip_scheme(raw).map_err(GateRejection::Invalid)?;

        self.validator.validate(body).map_err(GateRejection::Invalid)
    }
}

/// 인증 게이트 미들웨어.
///
/// 라우터에서 `middleware::from_fn_with_state(gate, auth_gate)`로 적용합니다.
pub async fn auth_gate(
    State(gate): State<Arc<RequestGate>>,
    mut request: Request,
    next: Next,
) -> Response {
    if gate.is_public_path(request.uri().path()) {
        record_gate_decision("public");
        return next.run(request).await;
    }

    match gate.authenticate(request.headers()) {
        Ok(identity) => {
            tracing::debug!(
                user_id = identity.user_id,
                role = %identity.role,
                "Request authenticated"
            );
            record_gate_decision("authenticated");
            request.extensions_mut().insert(IdentityContext(identity));
            next.run(request).await
        }
        Err(rejection) => {
            match &rejection {
                GateRejection::MissingToken => {
                    tracing::debug!(path = %request.uri().path(), "Missing bearer token");
                }
                other => {
                    tracing::warn!(
                        path = %request.uri().path(),
                        code = other.code(),
                        "Bearer token rejected"
                    );
                }
            }
            record_gate_decision(rejection.code());
            rejection.into_response()
        }
    }
}
