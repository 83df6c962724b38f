//! 사용자 인증 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (가입, 로그인, 관리자 승격)
//! - Bearer 토큰 발급 및 검증
//! - 보호 경로 인증 게이트
//! - Prometheus 메트릭
//!
//! # 모듈 구성
//!
//! - [`auth`]: 비밀번호 해싱, 토큰, 인증 게이트, 권한 정책
//! - [`repository`]: 사용자 저장소 (메모리 / PostgreSQL)
//! - [`services`]: 비즈니스 로직
//! - [`routes`]: REST API 엔드포인트
//! - [`extract`]: 에러 형식을 맞춘 요청 추출기
//! - [`server`]: 종료 토큰 기반 서버 구동
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod auth;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;

pub use auth::{IdentityContext, RequestGate, SigningKey, TokenIssuer, TokenValidator};
pub use error::{ApiError, ApiResult, ErrorBody};
pub use metrics::setup_metrics_recorder;
pub use middleware::metrics_layer;
pub use routes::{create_api_router, create_router};
pub use state::AppState;
