//! 비밀번호 해싱.
//!
//! Argon2id 기반 단방향 해시 및 상수 시간 검증.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// 고정 작업 계수 (반복 횟수).
pub const WORK_FACTOR: u32 = 12;

/// 메모리 비용 (KiB).
const MEMORY_COST_KIB: u32 = 19 * 1024;

/// 병렬도.
const PARALLELISM: u32 = 1;

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("해시 파라미터 설정 실패: {0}")]
    InvalidParams(String),
    #[error("비밀번호 해싱 실패: {0}")]
    HashingFailed(String),
}

/// 자격증명 해셔.
///
/// 솔트는 매 호출마다 무작위로 생성되며, 결과는 파라미터와 솔트를 포함하는
/// PHC 문자열입니다. 검증은 해시 문자열에 기록된 파라미터를 사용하므로
/// 작업 계수가 바뀌어도 기존 해시는 계속 검증됩니다.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    /// 고정 작업 계수로 해셔 생성.
    pub fn new() -> Result<Self, PasswordError> {
        let params = Params::new(MEMORY_COST_KIB, WORK_FACTOR, PARALLELISM, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// 비밀번호 해싱.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let hash = hasher.hash("my_secure_password")?;
    /// // "$argon2id$v=19$m=19456,t=12,p=1$..."
    /// ```
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// 비밀번호 검증.
    ///
    /// 일치하지 않거나 저장된 해시 형식이 잘못된 경우 모두 `false`를 반환합니다.
    pub fn verify(&self, password: &str, hashed: &str) -> bool {
        let parsed = match PasswordHash::new(hashed) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is not a valid PHC string");
                return false;
            }
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("work_factor", &WORK_FACTOR)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> CredentialHasher {
        CredentialHasher::new().unwrap()
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hasher = hasher();
        let hash = hasher.hash("password").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("t=12"));

        assert!(hasher.verify("password", &hash));
        assert!(!hasher.verify("wrongpass", &hash));
    }

    #[test]
    fn test_same_password_different_hashes() {
        let hasher = hasher();
        let hash1 = hasher.hash("Password1").unwrap();
        let hash2 = hasher.hash("Password1").unwrap();

        // 솔트가 다르므로 해시가 다름
        assert_ne!(hash1, hash2);
        assert!(hasher.verify("Password1", &hash1));
        assert!(hasher.verify("Password1", &hash2));
    }

    #[test]
    fn test_malformed_hash_is_rejected_without_error() {
        let hasher = hasher();
        assert!(!hasher.verify("password", "not-a-valid-hash"));
        assert!(!hasher.verify("password", ""));
    }

    #[test]
    fn test_verifies_hash_with_other_params() {
        // 저장된 해시의 파라미터로 검증
        let weak = Argon2::default();
        let salt = SaltString::generate(&mut OsRng);
        let hash = weak.hash_password(b"legacy", &salt).unwrap().to_string();

        assert!(hasher().verify("legacy", &hash));
    }

    #[test]
    fn test_unicode_and_empty_passwords() {
        let hasher = hasher();

        let hash = hasher.hash("한글패스워드123").unwrap();
        assert!(hasher.verify("한글패스워드123", &hash));

        let empty = hasher.hash("").unwrap();
        assert!(hasher.verify("", &empty));
        assert!(!hasher.verify(" ", &empty));
    }
}
