#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use employee_directory::config::AppConfig;
use employee_directory::handlers::AppState;
use employee_directory::server;
use reqwest::StatusCode;
use tokio::task::JoinHandle;

pub const USER: &str = "user";
pub const PASS: &str = "pass";

/// A tier running in-process on its own port for the duration of one test
pub struct TestTier {
    pub port: u16,
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl TestTier {
    pub fn employees_url(&self) -> String {
        format!("{}/api/v1/employee", self.base_url)
    }

    pub fn url(&self, suffix: &str) -> String {
        format!("{}/api/v1/employee/{}", self.base_url, suffix)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("tier did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestTier {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn config() -> AppConfig {
    AppConfig::development()
}

pub fn unused_port() -> Result<u16> {
    portpicker::pick_unused_port().context("failed to pick free port")
}

pub async fn spawn(state: AppState) -> Result<TestTier> {
    let port = unused_port()?;
    let listener = server::bind("127.0.0.1", port).await?;
    let handle = tokio::spawn(async move {
        if let Err(e) = server::serve(listener, state, false).await {
            eprintln!("test tier stopped: {e}");
        }
    });

    let tier = TestTier {
        port,
        base_url: format!("http://127.0.0.1:{}", port),
        handle,
    };
    tier.wait_ready(Duration::from_secs(5)).await?;
    Ok(tier)
}

/// Server tier seeded as configured
pub async fn spawn_server(config: &AppConfig) -> Result<TestTier> {
    spawn(server::server_state(config)?).await
}

/// Api tier proxying to `upstream`
pub async fn spawn_proxy(config: &AppConfig, upstream: &str) -> Result<TestTier> {
    let mut config = config.clone();
    config.api.upstream_url = Some(upstream.to_string());
    config.api.upstream_timeout_secs = 2;
    spawn(server::api_state(&config)?).await
}

/// Config whose store starts with no records
pub fn empty_seed_config() -> Result<(AppConfig, tempfile::NamedTempFile)> {
    let file = tempfile::NamedTempFile::new()?;
    std::fs::write(file.path(), "[]\n")?;
    let mut config = config();
    config.employee.seed_file = Some(file.path().to_path_buf());
    Ok((config, file))
}
