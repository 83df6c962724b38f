//! 인증 및 권한 부여.
//!
//! Bearer 토큰 기반 인증과 역할 기반 접근 결정을 제공합니다.
//!
//! # 구성 요소
//!
//! - [`CredentialHasher`]: 비밀번호 해싱 및 검증
//! - [`TokenIssuer`] / [`TokenValidator`]: 토큰 발급 및 검증
//! - [`RequestGate`] / [`auth_gate`]: 보호 경로 인증 미들웨어
//! - [`IdentityContext`]: 핸들러용 인증 정보 추출기
//! - [`AccessPolicy`]: 역할 승격 권한 결정
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! async fn protected_handler(
//!     IdentityContext(identity): IdentityContext,
//! ) -> impl IntoResponse {
//!     format!("Hello, {}!", identity.username)
//! }
//! ```

mod context;
mod gate;
mod jwt;
mod password;
mod policy;

pub use context::IdentityContext;
pub use gate::{auth_gate, GateRejection, RequestGate, PUBLIC_PATH_PREFIXES};
pub use jwt::{
    BearerToken, Claims, KeyError, SigningKey, TokenError, TokenIssuer, TokenValidator,
    BEARER_PREFIX, TOKEN_TTL_HOURS,
};
pub use password::{CredentialHasher, PasswordError, WORK_FACTOR};
pub use policy::{AccessDecision, AccessPolicy, ReasonCode};
