//! # Identity Core
//!
//! 사용자 인증 서비스의 핵심 도메인 모델 및 공통 인프라를 제공합니다.
//!
//! 이 크레이트는 서비스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 사용자 식별 정보 ([`Identity`]) 및 역할 ([`Role`])
//! - 저장된 사용자 레코드 ([`User`], [`NewUser`])
//! - 도메인 에러 분류 ([`DomainError`])
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
