use anyhow::{Context, Result};
use reqwest::Client;
use std::fs;
use std::path::Path;
use std::time::Duration;
use time::format_description::well_known::Rfc3339;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_USER_AGENT: &str = "wine-catalog-fetcher/0.1";

/// Outcome of one successful dataset download.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub bytes: usize,
    pub fetched_at: String,
}

pub fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client> {
    let client = Client::builder()
        .user_agent(user_agent.to_string())
        .redirect(reqwest::redirect::Policy::limited(5))
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;
    Ok(client)
}

/// One-shot download with default client settings.
pub async fn download(url: &str, dest: &Path) -> Result<FetchReport> {
    let client = build_client(DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT)?;
    fetch_dataset(&client, url, dest).await
}

/// Download the dataset to `dest`, overwriting any existing copy.
/// Non-success status codes are errors; the destination is written only
/// after the whole body has arrived.
pub async fn fetch_dataset(client: &Client, url: &str, dest: &Path) -> Result<FetchReport> {
    tracing::info!(url, dest = %dest.display(), "downloading dataset");
    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .with_context(|| format!("fetching {url}"))?;
    let bytes = resp.bytes().await.context("reading dataset body")?;

    if let Some(dir) = dest.parent() {
        fs::create_dir_all(dir).ok();
    }
    fs::write(dest, &bytes).with_context(|| format!("writing {}", dest.display()))?;

    let fetched_at = time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    tracing::info!(bytes = bytes.len(), %fetched_at, "dataset download complete");
    Ok(FetchReport {
        bytes: bytes.len(),
        fetched_at,
    })
}
