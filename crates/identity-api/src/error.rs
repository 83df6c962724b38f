//! API 에러 응답 타입.
//!
//! 모든 엔드포인트와 인증 게이트가 같은 에러 형식을 사용합니다.
//!
//! ```json
//! {
//!   "error": {
//!     "code": "USER_NOT_FOUND",
//!     "message": "사용자를 찾을 수 없습니다."
//!   }
//! }
//! ```

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use identity_core::DomainError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 내부 오류 시 외부로 노출되는 고정 메시지.
pub const INTERNAL_ERROR_MESSAGE: &str = "요청을 처리하는 중 서버 오류가 발생했습니다.";

/// 요청 본문 또는 경로 파라미터 오류 코드.
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";

/// 에러 응답 본문.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// 에러 상세.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// 에러 코드 (예: "DUPLICATE_USER", "EXPIRED_TOKEN")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
}

/// HTTP 경계 에러.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// 응답 본문 생성.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message.clone(),
            },
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::DuplicateUser => StatusCode::CONFLICT,
            DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            DomainError::UserNotFound => StatusCode::NOT_FOUND,
            DomainError::AccessDenied => StatusCode::FORBIDDEN,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if err.is_internal() {
            // 내부 원인은 로그에만 남김
            tracing::error!(error = %err, "Internal error while handling request");
            return Self::new(status, err.code(), INTERNAL_ERROR_MESSAGE);
        }

        Self::new(status, err.code(), err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), INVALID_REQUEST, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), INVALID_REQUEST, rejection.body_text())
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;
