//! 요청별 인증 컨텍스트.
//!
//! 인증 게이트가 요청 extensions에 넣은 식별 정보를 핸들러에서 꺼내는 추출기.

use axum::{extract::FromRequestParts, http::request::Parts};
use identity_core::Identity;

use super::gate::GateRejection;

/// 인증된 사용자 컨텍스트.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn protected_handler(
///     IdentityContext(identity): IdentityContext,
/// ) -> impl IntoResponse {
///     format!("Authenticated user: {}", identity.username)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext(pub Identity);

impl IdentityContext {
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl<S> FromRequestParts<S> for IdentityContext
where
    S: Send + Sync,
{
    type Rejection = GateRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // 게이트를 거치지 않은 라우트에서 사용된 경우
        parts
            .extensions
            .get::<IdentityContext>()
            .cloned()
            .ok_or(GateRejection::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;
    use identity_core::Role;

    #[tokio::test]
    async fn test_extracts_identity_from_extensions() {
        let identity = Identity::new(7, "user7", Role::Admin);
        let mut request = Request::builder().uri("/any").body(()).unwrap();
        request
            .extensions_mut()
            .insert(IdentityContext(identity.clone()));
        let (mut parts, _) = request.into_parts();

        let ctx = IdentityContext::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(ctx.identity(), &identity);
    }

    #[tokio::test]
    async fn test_missing_context_is_unauthenticated() {
        let (mut parts, _) = Request::builder()
            .uri("/any")
            .body(())
            .unwrap()
            .into_parts();

        let rejection = IdentityContext::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
