use crate::http::headers::browser_headers;
use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use urlencoding::encode;

/// HTTP client for the stats API, either direct or through a forwarding proxy
pub struct StatsHttpClient {
    client: Client,
    proxy_url: Option<String>,
}

impl StatsHttpClient {
    pub fn new(proxy_url: Option<String>) -> Result<Self> {
        let client = Self::build_client()?;
        Ok(Self { client, proxy_url })
    }

    pub async fn get(&self, url: &str) -> Result<reqwest::Response> {
        match &self.proxy_url {
            Some(proxy_url) => self.send_via_proxy(proxy_url, url).await,
            None => self.send_direct(url).await,
        }
    }

    fn build_client() -> Result<Client> {
        Client::builder()
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_direct(&self, url: &str) -> Result<reqwest::Response> {
        debug!("GET {}", url);
        self.client
            .get(url)
            .headers(browser_headers())
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))
    }

    async fn send_via_proxy(&self, proxy_url: &str, url: &str) -> Result<reqwest::Response> {
        let proxied = proxied_url(proxy_url, url);
        debug!("GET {} (proxied)", url);
        self.client
            .get(&proxied)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request through proxy {}", proxy_url))
    }
}

/// Wraps the target URL into the proxy's single `url` query parameter
pub fn proxied_url(proxy_url: &str, target: &str) -> String {
    let separator = if proxy_url.contains('?') { '&' } else { '?' };
    format!("{}{}url={}", proxy_url, separator, encode(target))
}
