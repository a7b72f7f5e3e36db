mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_reports_store() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = reqwest::get(server.url("/health")).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["store"], "memory");
    Ok(())
}

#[tokio::test]
async fn root_describes_service() -> Result<()> {
    let server = common::TestServer::start().await?;

    let body: serde_json::Value = reqwest::get(server.url("/")).await?.json().await?;
    assert_eq!(body["data"]["name"], "Notes API");
    assert_eq!(body["data"]["collection"], "notes");
    Ok(())
}

#[tokio::test]
async fn client_health_check() -> Result<()> {
    let server = common::TestServer::start().await?;
    let data = server.client_for(None).health().await?;
    assert_eq!(data["status"], "ok");
    Ok(())
}
