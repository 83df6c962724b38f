//! REST API 라우트.
//!
//! 모든 API 엔드포인트를 정의하고 라우터를 구성합니다.

pub mod users;

use std::sync::Arc;

use axum::{extract::State, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::auth::auth_gate;
use crate::middleware::metrics_layer;
use crate::openapi::swagger_ui_router;
use crate::state::AppState;

pub use users::{LoginRequest, SignupRequest, TokenResponse, UserResponse};

/// API 라우터 생성 (상태 미적용).
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new().merge(users::users_router())
}

/// /metrics 엔드포인트 핸들러.
async fn metrics_handler(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

/// 인증 게이트를 포함한 전체 라우터 생성.
///
/// 게이트는 API, 문서, `/metrics` 전부에 적용되며 공개 경로만 통과시킵니다.
/// 메트릭 레코더가 없으면 `/metrics`는 등록되지 않습니다.
pub fn create_router(state: Arc<AppState>, metrics_handle: Option<PrometheusHandle>) -> Router {
    let gate = state.gate.clone();

    let mut router = Router::new()
        .merge(create_api_router().with_state(state))
        .merge(swagger_ui_router());

    if let Some(handle) = metrics_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics_handler))
                .with_state(handle),
        );
    }

    router
        .layer(middleware::from_fn_with_state(gate, auth_gate))
        .layer(middleware::from_fn(metrics_layer))
}
