mod common;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, StatusCode};

#[tokio::test]
async fn mock_stream_opens_with_ready_event() -> Result<()> {
    let server = common::mock_server().await?;

    let mut res = reqwest::get(server.url("/api/threads/t1/stream")).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::CONTENT_TYPE], "text/event-stream");

    let chunk = tokio::time::timeout(Duration::from_secs(5), res.chunk())
        .await
        .context("no event within 5s")??
        .context("stream closed")?;
    let text = String::from_utf8_lossy(&chunk);
    assert!(text.contains("event: ready"), "unexpected first chunk: {text}");
    assert!(text.contains("mock-user-id-backend"));
    Ok(())
}

#[tokio::test]
async fn stream_without_token_is_401() -> Result<()> {
    let server = common::token_server().await?;

    let res = reqwest::get(server.url("/api/threads/t1/stream")).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn stream_token_param_gets_past_authentication() -> Result<()> {
    let server = common::token_server().await?;
    let url = format!(
        "{}?token={}",
        server.url("/api/threads/t1/stream"),
        common::token_for("u1")
    );

    // Identity resolved from the query; the thread lookup then needs the database
    let res = reqwest::get(url).await?;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}
