//! 저장된 사용자 레코드.

use super::{Identity, Role};

/// 저장소에 보관되는 사용자 레코드.
///
/// `password_hash`는 외부로 직렬화되지 않도록 `Serialize`를 구현하지 않습니다.
/// 응답에는 API 계층의 `UserResponse`를 사용합니다.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    /// 고유 로그인 이름
    pub username: String,
    /// PHC 형식 비밀번호 해시
    pub password_hash: String,
    pub nickname: String,
    pub role: Role,
}

impl User {
    /// 레코드에서 식별 정보 추출.
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.username.clone(), self.role)
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("nickname", &self.nickname)
            .field("role", &self.role)
            .finish()
    }
}

/// 신규 가입 입력.
///
/// 역할은 항상 [`Role::User`]로 시작하므로 포함하지 않습니다.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub nickname: String,
}

impl NewUser {
    /// 주어진 ID로 사용자 레코드 생성.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            nickname: self.nickname,
            role: Role::User,
        }
    }
}
