use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tracing::{info, warn};

const PRIMARY_URL: &str =
    "https://raw.githubusercontent.com/ripienaar/free-for-dev/refs/heads/master/README.md";
const FALLBACK_URL: &str = "https://cdn.jsdelivr.net/gh/ripienaar/free-for-dev@master/README.md";

/// Source of the raw catalog document. Injected into the cache so tests can
/// substitute canned markdown for the network.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self) -> Result<String>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
    sources: Vec<String>,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()?,
            sources: vec![PRIMARY_URL.to_string(), FALLBACK_URL.to_string()],
        })
    }

    async fn fetch_one(&self, url: &str) -> Result<String> {
        let res = self.client.get(url).send().await?;
        if !res.status().is_success() {
            bail!("{} returned HTTP {}", url, res.status());
        }
        res.text().await.context("Failed to read response body")
    }
}

#[async_trait]
impl DocumentSource for HttpFetcher {
    /// Try the primary source, then the fallback mirror. No retry beyond
    /// that single fallback; the TTL cache retries on the next cold read.
    async fn fetch(&self) -> Result<String> {
        let mut last_err = None;
        for url in &self.sources {
            info!("Fetching document: {}", url);
            match self.fetch_one(url).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    warn!("Fetch failed for {}: {:#}", url, e);
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("no document sources configured")))
    }
}
