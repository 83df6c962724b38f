//! HTTP 서버 구동.

use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// 종료 토큰이 취소될 때까지 요청을 처리합니다.
///
/// 토큰 취소 후에는 처리 중인 요청을 마치고 반환합니다.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}
