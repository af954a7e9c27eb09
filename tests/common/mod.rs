#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use employee_records_api::config::{AppConfig, DatabaseConfig};
use employee_records_api::database::DatabaseManager;
use employee_records_api::handlers::AppState;
use employee_records_api::server;

/// A server running in-process on its own port with a private in-memory store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::from_env();
        config.database = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            connection_timeout: 5,
            enable_query_logging: false,
        };
        config.api.enable_request_logging = false;

        let pool = DatabaseManager::connect(&config.database).await?;
        let router = server::app(AppState::new(pool), &config);
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = self.client.get(&url).send().await {
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

    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url)
    }

    /// POST a payload and return (status, body)
    pub async fn create(&self, body: Value) -> Result<(StatusCode, Value)> {
        let res = self.client.post(self.url("/api/employees")).json(&body).send().await?;
        Ok((res.status(), res.json().await?))
    }

    pub async fn get(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.get(self.url(path)).send().await?;
        Ok((res.status(), res.json().await?))
    }

    pub async fn put(&self, path: &str, body: Value) -> Result<(StatusCode, Value)> {
        let res = self.client.put(self.url(path)).json(&body).send().await?;
        Ok((res.status(), res.json().await?))
    }

    pub async fn delete(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.delete(self.url(path)).send().await?;
        Ok((res.status(), res.json().await?))
    }
}

/// Each test gets a fresh server, so stores never leak between tests
pub async fn start_server() -> Result<TestServer> {
    let server = TestServer::spawn().await?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

pub fn employee(first: &str, last: &str, email: &str, active: bool) -> Value {
    json!({
        "first_name": first,
        "last_name": last,
        "date_of_birth": "1990-05-17",
        "email": email,
        "is_active": active
    })
}

/// Seed the two-record example store: Ann Lee (active, id 1) and Bo Han (inactive, id 2)
pub async fn seed_example(server: &TestServer) -> Result<()> {
    let (status, _) = server.create(employee("Ann", "Lee", "ann@x.com", true)).await?;
    anyhow::ensure!(status == StatusCode::CREATED, "seeding Ann failed: {}", status);
    let (status, _) = server.create(employee("Bo", "Han", "bo@x.com", false)).await?;
    anyhow::ensure!(status == StatusCode::CREATED, "seeding Bo failed: {}", status);
    Ok(())
}

pub fn ids(body: &Value) -> Vec<i64> {
    let mut ids: Vec<i64> = body
        .as_array()
        .map(|a| a.iter().filter_map(|e| e["id"].as_i64()).collect())
        .unwrap_or_default();
    ids.sort_unstable();
    ids
}
