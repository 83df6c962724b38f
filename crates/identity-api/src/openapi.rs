//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui`, 스펙 JSON은 `/v3/api-docs/openapi.json`에서 제공됩니다.
//! 두 경로 모두 인증 게이트의 공개 경로입니다.

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::error::{ErrorBody, ErrorDetail};
use crate::routes::users::{LoginRequest, SignupRequest, TokenResponse, UserResponse};
use identity_core::Role;

/// OpenAPI 스펙 JSON 경로.
pub const OPENAPI_JSON_PATH: &str = "/v3/api-docs/openapi.json";

/// Identity API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Identity API",
        description = r#"
# 사용자 인증 REST API

회원 가입, 로그인, 관리자 승격을 제공합니다.

## 인증

`/signup`, `/login`을 제외한 엔드포인트는 Bearer 토큰이 필요합니다.
로그인 응답의 `token` 값을 그대로 `Authorization` 헤더에 넣으세요.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    tags(
        (name = "users", description = "사용자 - 가입 및 로그인"),
        (name = "admin", description = "관리자 - 역할 관리")
    ),
    paths(
        crate::routes::users::signup,
        crate::routes::users::login,
        crate::routes::users::promote_to_admin,
    ),
    components(
        schemas(
            SignupRequest,
            LoginRequest,
            UserResponse,
            TokenResponse,
            Role,
            ErrorBody,
            ErrorDetail,
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Bearer 인증 스킴 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Swagger UI 라우터.
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url(OPENAPI_JSON_PATH, ApiDoc::openapi())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_valid() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&spec).unwrap();

        assert!(json.contains("Identity API"));
        assert!(json.contains("/signup"));
        assert!(json.contains("/login"));
        assert!(json.contains("/admin/users/{user_id}/roles"));
    }

    #[test]
    fn test_openapi_has_bearer_scheme() {
        let spec = ApiDoc::openapi();
        let schemes = &spec.components.as_ref().unwrap().security_schemes;

        assert!(schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn test_openapi_contains_schemas() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();

        assert!(json.contains("UserResponse"));
        assert!(json.contains("TokenResponse"));
        assert!(json.contains("ErrorBody"));
    }

    #[test]
    fn test_swagger_ui_router_creates() {
        let _router: Router<()> = swagger_ui_router();
    }
}
