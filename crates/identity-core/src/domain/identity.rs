//! 인증된 사용자 식별 정보와 역할.

use serde::{Deserialize, Serialize};

/// 사용자 역할.
///
/// 두 값으로 닫힌 집합입니다. 토큰의 `userRole` 클레임과 저장소에는
/// 대문자 이름(`USER`, `ADMIN`)으로 기록됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// 일반 사용자
    User,
    /// 관리자 - 역할 승격 가능
    Admin,
}

impl Role {
    /// 관리자 역할인지 확인.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// 와이어 이름 반환.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// 문자열에서 역할 파싱.
    ///
    /// 와이어 이름과 정확히 일치해야 합니다 (대소문자 구분).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 인증된 사용자 식별 정보.
///
/// 유효한 토큰 또는 저장된 사용자 레코드에서 한 번 만들어진 뒤에는 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// 사용자 ID
    pub user_id: i64,
    /// 사용자 이름
    pub username: String,
    /// 사용자 역할
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: i64, username: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
        }
    }
}
