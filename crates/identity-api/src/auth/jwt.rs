//! JWT 토큰 처리.
//!
//! HS256 서명 키 로드, 토큰 발급 및 검증.
//!
//! 검증 순서는 고정입니다: 구조 → 서명 → 만료. 서명이 잘못된 토큰은 만료 여부와
//! 상관없이 항상 [`TokenError::InvalidSignature`]를 반환합니다.

use std::sync::Arc;

use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use identity_core::{Identity, Role};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Authorization 헤더 스킴 접두사.
pub const BEARER_PREFIX: &str = "Bearer ";

/// 토큰 유효 시간 (시간). 호출마다 바꿀 수 없습니다.
pub const TOKEN_TTL_HOURS: i64 = 2;

/// 서명 키 최소 길이 (바이트, 256비트).
pub const MIN_KEY_BYTES: usize = 32;

/// JWT 페이로드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID 문자열
    pub sub: String,
    /// 사용자 이름
    pub username: String,
    /// 사용자 역할
    #[serde(rename = "userRole")]
    pub user_role: Role,
    /// Issued At (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// 주어진 시각 기준으로 Claims 생성.
    pub fn for_identity(identity: &Identity, now: DateTime<Utc>) -> Self {
        Self {
            sub: identity.user_id.to_string(),
            username: identity.username.clone(),
            user_role: identity.role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        }
    }

    /// 주어진 시각에 만료되었는지 확인.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() > self.exp.saturating_mul(1000)
    }

    /// 식별 정보로 변환.
    fn into_identity(self) -> Result<Identity, TokenError> {
        let user_id = self
            .sub
            .parse::<i64>()
            .map_err(|_| TokenError::Malformed)?;

        Ok(Identity::new(user_id, self.username, self.user_role))
    }
}

/// 서명 키 로드 에러.
///
/// 시작 시에만 발생하며 치명적인 설정 오류로 취급됩니다.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("JWT 서명 키가 설정되지 않았습니다")]
    Missing,
    #[error("JWT 서명 키가 올바른 Base64가 아닙니다: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    #[error("JWT 서명 키가 너무 짧습니다: {bits}비트 (최소 256비트)")]
    TooShort { bits: usize },
}

/// 토큰 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("잘못된 토큰 형식입니다.")]
    Malformed,
    #[error("토큰 서명이 유효하지 않습니다.")]
    InvalidSignature,
    #[error("토큰이 만료되었습니다.")]
    Expired,
    #[error("토큰 인코딩 실패: {0}")]
    Encoding(jsonwebtoken::errors::Error),
}

impl TokenError {
    /// 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Malformed => "MALFORMED_TOKEN",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::Expired => "EXPIRED_TOKEN",
            TokenError::Encoding(_) => "TOKEN_ENCODING_FAILED",
        }
    }
}

/// HS256 서명 키.
///
/// 프로세스 시작 시 한 번 생성되어 `Arc`로 발급기/검증기에 공유됩니다.
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    /// Base64로 인코딩된 키에서 생성.
    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        let bytes = base64::engine::general_purpose::STANDARD.decode(encoded.trim())?;

        if bytes.len() < MIN_KEY_BYTES {
            return Err(KeyError::TooShort {
                bits: bytes.len() * 8,
            });
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(&bytes),
            decoding: DecodingKey::from_secret(&bytes),
        })
    }

    /// 설정 값에서 생성. 값이 없으면 [`KeyError::Missing`].
    pub fn from_config(secret: Option<&SecretString>) -> Result<Self, KeyError> {
        let secret = secret.ok_or(KeyError::Missing)?;
        Self::from_base64(secret.expose_secret())
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey([REDACTED])")
    }
}

/// `"Bearer "` 접두사가 붙은 발급 토큰.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// 전체 문자열 (`"Bearer <jwt>"`).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 접두사를 제외한 JWT 본문.
    pub fn body(&self) -> &str {
        self.0.strip_prefix(BEARER_PREFIX).unwrap_or(&self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}

/// 토큰 발급기.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    key: Arc<SigningKey>,
}

impl TokenIssuer {
    pub fn new(key: Arc<SigningKey>) -> Self {
        Self { key }
    }

    /// 현재 시각 기준으로 토큰 발급.
    pub fn issue(&self, identity: &Identity) -> Result<BearerToken, TokenError> {
        self.issue_at(identity, Utc::now())
    }

    /// 주어진 시각 기준으로 토큰 발급.
    ///
    /// 같은 `now`에 대해 항상 같은 토큰을 생성합니다.
    pub fn issue_at(
        &self,
        identity: &Identity,
        now: DateTime<Utc>,
    ) -> Result<BearerToken, TokenError> {
        let claims = Claims::for_identity(identity, now);

        let jwt = encode(&Header::new(Algorithm::HS256), &claims, &self.key.encoding)
            .map_err(TokenError::Encoding)?;

        Ok(BearerToken(format!("{}{}", BEARER_PREFIX, jwt)))
    }
}

/// 토큰 검증기.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    key: Arc<SigningKey>,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(key: Arc<SigningKey>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // 만료는 서명 검증 후 validate_at에서 직접 확인
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self { key, validation }
    }

    /// `"Bearer "` 접두사 제거.
    pub fn strip_scheme(raw: &str) -> Result<&str, TokenError> {
        raw.strip_prefix(BEARER_PREFIX).ok_or(TokenError::Malformed)
    }

    /// 현재 시각 기준으로 토큰 검증.
    pub fn validate(&self, token: &str) -> Result<Identity, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// 주어진 시각 기준으로 토큰 검증.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, TokenError> {
        let data = decode::<Claims>(token, &self.key.decoding, &self.validation)
            .map_err(classify_decode_error)?;

        if data.claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        data.claims.into_identity()
    }
}

fn classify_decode_error(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}
