//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers on an ephemeral port and
//! making HTTP requests against them.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use ngo_api::{create_app, create_app_state_with_clock};
use ngo_common::AppConfig;
use ngo_core::ManualClock;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{LoginRequest, RegisterRequest, ADMIN_EMAIL, ADMIN_PASSWORD};

/// Instant the test clock starts at: 1 May 2026, 10:00
pub fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 5, 1)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .unwrap_or_default()
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub clock: Arc<ManualClock>,
    upload_dir: PathBuf,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with the in-memory store
    pub async fn start() -> Result<Self> {
        let upload_dir = std::env::temp_dir().join(format!("ngo-it-{}", uuid::Uuid::new_v4()));
        let config = test_config(&upload_dir)?;
        let clock = Arc::new(ManualClock::new(start_time()));

        let state = create_app_state_with_clock(config, clock.clone()).await?;
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            clock,
            upload_dir,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn api(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url(), path)
    }

    /// Make a GET request to a path outside `/api/v1`
    pub async fn get_raw(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(format!("{}{}", self.base_url(), path)).send().await?)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.api(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.get(self.api(path)).bearer_auth(token).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.api(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.api(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a body-less POST request with auth token
    pub async fn post_empty_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.post(self.api(path)).bearer_auth(token).send().await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .patch(self.api(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.delete(self.api(path)).bearer_auth(token).send().await?)
    }

    /// Upload raw photo bytes
    pub async fn put_photo(
        &self,
        path: &str,
        token: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Response> {
        Ok(self
            .client
            .put(self.api(path))
            .bearer_auth(token)
            .query(&[("filename", file_name)])
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?)
    }

    /// Create a gallery posting from raw photo bytes
    pub async fn post_photo(
        &self,
        path: &str,
        token: &str,
        title: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.api(path))
            .bearer_auth(token)
            .query(&[("title", title), ("filename", file_name)])
            .header(reqwest::header::CONTENT_TYPE, "image/jpeg")
            .body(bytes)
            .send()
            .await?)
    }

    /// Log in and return the access token
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let body = assert_json(self.post("/auth/login", &request).await?, StatusCode::OK).await?;
        token_of(&body)
    }

    /// Token of the bootstrapped admin
    pub async fn admin_token(&self) -> Result<String> {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Register an account and return its token
    pub async fn register(&self, request: &RegisterRequest) -> Result<String> {
        let response = self.post("/auth/register", request).await?;
        let body = assert_json(response, StatusCode::CREATED).await?;
        token_of(&body)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

fn token_of(body: &Value) -> Result<String> {
    body["access_token"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("no access_token in {body}"))
}

/// Configuration for an in-memory server with a bootstrapped admin
pub fn test_config(upload_dir: &std::path::Path) -> Result<AppConfig> {
    let vars: HashMap<&str, String> = HashMap::from([
        ("STORAGE_BACKEND", "memory".to_string()),
        ("ADMIN_EMAIL", ADMIN_EMAIL.to_string()),
        ("ADMIN_PASSWORD", ADMIN_PASSWORD.to_string()),
        ("UPLOAD_DIR", upload_dir.display().to_string()),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000".to_string()),
        ("RATE_LIMIT_BURST", "10000".to_string()),
    ]);
    AppConfig::from_lookup(|key| vars.get(key).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Assert response status and parse the JSON body
pub async fn assert_json(response: Response, expected_status: StatusCode) -> Result<Value> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error response and return its body
pub async fn assert_error(
    response: Response,
    expected_status: StatusCode,
    code: &str,
) -> Result<Value> {
    let body = assert_json(response, expected_status).await?;
    if body["error"]["code"] != code {
        anyhow::bail!("Expected error code {code}, got {body}");
    }
    Ok(body)
}
