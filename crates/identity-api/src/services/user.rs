//! 사용자 서비스.
//!
//! 가입, 로그인, 관리자 승격 흐름을 조합합니다. 해싱과 검증은 CPU를 많이 쓰므로
//! blocking 스레드 풀에서 실행합니다.

use std::sync::Arc;

use identity_core::{DomainError, DomainResult, Identity, NewUser, Role, User};
use tracing::{info, warn};

use crate::auth::{AccessPolicy, BearerToken, CredentialHasher, TokenIssuer};
use crate::metrics::{record_login, record_promotion};
use crate::repository::UserRepository;

/// 사용자 서비스.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    hasher: CredentialHasher,
    issuer: TokenIssuer,
    policy: AccessPolicy,
}

impl UserService {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        hasher: CredentialHasher,
        issuer: TokenIssuer,
        policy: AccessPolicy,
    ) -> Self {
        Self {
            repo,
            hasher,
            issuer,
            policy,
        }
    }

    /// 회원 가입.
    ///
    /// 이미 존재하는 이름이면 [`DomainError::DuplicateUser`]이며 아무것도 저장하지 않습니다.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        nickname: &str,
    ) -> DomainResult<User> {
        if self.repo.exists_by_username(username).await? {
            info!(username, "Signup rejected: username already taken");
            return Err(DomainError::DuplicateUser);
        }

        let password_hash = self.hash_password(password.to_string()).await?;

        // 동시 가입 경합은 저장소의 중복 검사가 처리
        let user = self
            .repo
            .insert(NewUser {
                username: username.to_string(),
                password_hash,
                nickname: nickname.to_string(),
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "User signed up");
        Ok(user)
    }

    /// 로그인 후 Bearer 토큰 발급.
    ///
    /// 없는 사용자와 틀린 비밀번호는 모두 [`DomainError::InvalidCredentials`]입니다.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<BearerToken> {
        let Some(user) = self.repo.find_by_username(username).await? else {
            record_login("invalid_credentials");
            info!(username, "Login failed");
            return Err(DomainError::InvalidCredentials);
        };

        if !self
            .verify_password(password.to_string(), user.password_hash.clone())
            .await?
        {
            record_login("invalid_credentials");
            info!(username, "Login failed");
            return Err(DomainError::InvalidCredentials);
        }

        let token = self
            .issuer
            .issue(&user.identity())
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        record_login("success");
        info!(user_id = user.id, "User logged in");
        Ok(token)
    }

    /// 대상 사용자를 ADMIN으로 승격.
    ///
    /// 이미 ADMIN인 대상도 그대로 성공합니다.
    pub async fn promote_to_admin(&self, caller: &Identity, target_id: i64) -> DomainResult<User> {
        let decision = self.policy.authorize_promotion(caller);
        if !decision.allowed {
            record_promotion("denied");
            warn!(
                caller_id = caller.user_id,
                target_id,
                reason = ?decision.reason,
                "Role promotion denied"
            );
        }
        decision.into_result()?;

        let Some(user) = self.repo.update_role(target_id, Role::Admin).await? else {
            record_promotion("not_found");
            return Err(DomainError::UserNotFound);
        };

        record_promotion("granted");
        info!(caller_id = caller.user_id, target_id, "User promoted to ADMIN");
        Ok(user)
    }

    async fn hash_password(&self, password: String) -> DomainResult<String> {
        let hasher = self.hasher.clone();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::Internal(format!("hashing task failed: {}", e)))?
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn verify_password(&self, password: String, hashed: String) -> DomainResult<bool> {
        let hasher = self.hasher.clone();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hashed))
            .await
            .map_err(|e| DomainError::Internal(format!("verification task failed: {}", e)))
    }
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("hasher", &self.hasher)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
