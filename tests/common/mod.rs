#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use notes_api::client::NotesClient;
use notes_api::config::AppConfig;
use notes_api::{router, AppState};

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub state: AppState,
}

impl TestServer {
    /// Serve a fresh in-memory instance on an unused port for the current test
    pub async fn start() -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();

        let mut config = AppConfig::development();
        config.api.enable_request_logging = false;
        let state = AppState::in_memory(config)?;

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;

        let app = router(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            port,
            base_url,
            state,
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn token_for(&self, subject: &str) -> String {
        self.state.auth.issue(subject).expect("token")
    }

    pub fn client_for(&self, subject: Option<&str>) -> NotesClient {
        let token = subject.map(|s| self.token_for(s));
        NotesClient::new(self.base_url.clone(), token).expect("client")
    }
}

/// POST a note as `token` and return its id
pub async fn create_note(
    server: &TestServer,
    token: &str,
    title: &str,
    content: &str,
) -> Result<String> {
    let res = reqwest::Client::new()
        .post(server.url("/api/notes"))
        .bearer_auth(token)
        .json(&serde_json::json!({ "title": title, "content": content }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());
    let body: serde_json::Value = res.json().await?;
    body["data"]["id"]
        .as_str()
        .map(str::to_string)
        .context("missing id in create response")
}

pub async fn list_notes(server: &TestServer, token: &str) -> Result<Vec<serde_json::Value>> {
    let res = reqwest::Client::new()
        .get(server.url("/api/notes"))
        .bearer_auth(token)
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "list failed: {}", res.status());
    let body: serde_json::Value = res.json().await?;
    body["data"]
        .as_array()
        .cloned()
        .context("list data is not an array")
}
