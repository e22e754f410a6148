#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use bank_api::auth::TokenService;
use bank_api::config::SecurityConfig;
use bank_api::database::InMemoryStore;
use bank_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TOKEN_HEADER: &str = "x-jwt-token";

/// A live server on a free port, backed by its own in-memory store.
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<InMemoryStore>,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    /// POST /account and return the created account JSON
    pub async fn create_account(&self, first: &str, last: &str, password: &str) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/account"))
            .json(&json!({ "firstName": first, "lastName": last, "password": password }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "create failed: {}", res.status());
        Ok(res.json().await?)
    }

    /// POST /login and return the issued token
    pub async fn login(&self, number: i64, password: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/login"))
            .json(&json!({ "number": number, "password": password }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        let body: Value = res.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response has no token")
    }
}

/// Spawn a fresh server. Each test gets its own so stores never leak between tests.
pub async fn spawn_server() -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test port")?;

    let store = Arc::new(InMemoryStore::new());
    let tokens = TokenService::new(&SecurityConfig::with_secret(TEST_SECRET));
    let router = app(AppState::new(store.clone(), tokens));

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let server = TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        store,
        client: reqwest::Client::new(),
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}
