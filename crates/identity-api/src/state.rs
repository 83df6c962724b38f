//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! 시작 시 한 번 구성되어 `Arc`로 라우터에 전달됩니다.

use std::sync::Arc;

use crate::auth::{
    AccessPolicy, CredentialHasher, PasswordError, RequestGate, SigningKey, TokenIssuer,
    TokenValidator,
};
use crate::repository::{MemoryUserRepository, UserRepository};
use crate::services::UserService;

/// 애플리케이션 공유 상태.
#[derive(Debug, Clone)]
pub struct AppState {
    /// 가입, 로그인, 역할 승격
    pub users: UserService,

    /// 인증 게이트 - 라우터 미들웨어에서 사용
    pub gate: Arc<RequestGate>,
}

impl AppState {
    /// 서명 키와 저장소로 상태 구성.
    ///
    /// 키는 발급기와 검증기가 공유합니다.
    pub fn new(
        key: SigningKey,
        repo: Arc<dyn UserRepository>,
    ) -> Result<Self, PasswordError> {
        let key = Arc::new(key);
        let users = UserService::new(
            repo,
            CredentialHasher::new()?,
            TokenIssuer::new(key.clone()),
            AccessPolicy::new(),
        );

        Ok(Self {
            users,
            gate: Arc::new(RequestGate::new(TokenValidator::new(key))),
        })
    }

    /// 메모리 저장소로 상태 구성.
    pub fn in_memory(key: SigningKey) -> Result<Self, PasswordError> {
        Self::new(key, Arc::new(MemoryUserRepository::new()))
    }
}
