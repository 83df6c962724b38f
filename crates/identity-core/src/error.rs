//! 사용자 서비스의 도메인 에러 타입.
//!
//! 비즈니스 로직이 발생시키는 에러를 정의합니다. 각 에러는 클라이언트에
//! 그대로 노출되는 실패 하나에 1:1로 대응하며, 프로세스 내에서 복구되지 않습니다.

use thiserror::Error;

/// 도메인 에러.
#[derive(Debug, Error)]
pub enum DomainError {
    /// 이미 존재하는 사용자 이름으로 가입 시도
    #[error("이미 가입된 사용자입니다.")]
    DuplicateUser,

    /// 사용자 이름 또는 비밀번호 불일치
    #[error("아이디 또는 비밀번호가 올바르지 않습니다.")]
    InvalidCredentials,

    /// 대상 사용자가 존재하지 않음
    #[error("사용자를 찾을 수 없습니다.")]
    UserNotFound,

    /// 관리자 권한이 필요한 작업
    #[error("관리자 권한이 필요한 요청입니다. 접근 권한이 없습니다.")]
    AccessDenied,

    /// 저장소 또는 해싱 실패
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 도메인 작업을 위한 Result 타입.
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// 클라이언트에 노출되는 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::DuplicateUser => "DUPLICATE_USER",
            DomainError::InvalidCredentials => "INVALID_CREDENTIALS",
            DomainError::UserNotFound => "USER_NOT_FOUND",
            DomainError::AccessDenied => "ACCESS_DENIED",
            DomainError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 내부 에러인지 확인합니다.
    pub fn is_internal(&self) -> bool {
        matches!(self, DomainError::Internal(_))
    }
}
