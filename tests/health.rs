mod common;

use axum::http::StatusCode;
use common::{router, send, test_state};

#[tokio::test]
async fn health_check_returns_ok() -> anyhow::Result<()> {
    let state = test_state().await?;
    let (status, body) = send(router(&state), "GET", "/health", None, None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Health check");
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "sqlite");
    Ok(())
}
