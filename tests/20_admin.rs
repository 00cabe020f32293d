mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn admin_is_disabled_without_mock_mode() -> Result<()> {
    let server = common::token_server().await?;
    let client = reqwest::Client::new();

    // Even a token naming the admin identity is refused
    let res = client
        .get(server.url("/admin/site-settings"))
        .bearer_auth(common::token_for("mock-user-id-backend"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "FORBIDDEN");
    Ok(())
}

#[tokio::test]
async fn admin_create_validates_payload() -> Result<()> {
    let server = common::mock_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/admin/editable-content"))
        .json(&json!({ "pageSlug": "", "blockKey": "hero", "content": "Hi" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["pageSlug"].is_string());
    assert!(body["field_errors"].get("blockKey").is_none());
    Ok(())
}

#[tokio::test]
async fn admin_update_needs_a_field() -> Result<()> {
    let server = common::mock_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .put(server.url("/admin/page-seo/home"))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn admin_reads_surface_database_outage() -> Result<()> {
    let server = common::mock_server().await?;

    let res = reqwest::get(server.url("/admin/site-settings")).await?;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
    Ok(())
}

#[tokio::test]
async fn public_content_needs_no_credentials() -> Result<()> {
    let server = common::token_server().await?;

    // Past the gate and into the (unreachable) database
    let res = reqwest::get(server.url("/admin/editable-content/public/page/home")).await?;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}
