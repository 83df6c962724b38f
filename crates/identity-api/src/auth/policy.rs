//! 권한 정책.
//!
//! 인증된 사용자가 특권 작업(역할 승격)을 수행할 수 있는지 결정합니다.

use identity_core::{DomainError, DomainResult, Identity, Role};
use serde::Serialize;

/// 결정 사유 코드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    Granted,
    AdminRequired,
}

/// 접근 결정.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    pub allowed: bool,
    #[serde(rename = "reasonCode")]
    pub reason: ReasonCode,
}

impl AccessDecision {
    /// 거부된 결정을 [`DomainError::AccessDenied`]로 변환.
    pub fn into_result(self) -> DomainResult<()> {
        if self.allowed {
            Ok(())
        } else {
            Err(DomainError::AccessDenied)
        }
    }
}

/// 역할 기반 접근 정책.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    pub fn new() -> Self {
        Self
    }

    /// 역할 승격 가능 여부. ADMIN만 허용.
    pub fn can_promote(&self, caller_role: Role) -> bool {
        caller_role.is_admin()
    }

    /// 역할 승격 요청 평가.
    pub fn authorize_promotion(&self, caller: &Identity) -> AccessDecision {
        if self.can_promote(caller.role) {
            AccessDecision {
                allowed: true,
                reason: ReasonCode::Granted,
            }
        } else {
            AccessDecision {
                allowed: false,
                reason: ReasonCode::AdminRequired,
            }
        }
    }
}
