use anyhow::{Context, Result};
use log::info;
use reqwest::Client;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::handlers::proxy::ProxyState;
use crate::api::routes::create_proxy_router;
use crate::config::ProxySettings;

/// Stateless pass-through proxy in front of the stats API
pub struct ProxyService {
    port: u16,
    settings: ProxySettings,
}

impl ProxyService {
    pub fn new(port: u16, settings: ProxySettings) -> Self {
        Self { port, settings }
    }

    pub async fn run(&self) -> Result<()> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        let state = Arc::new(ProxyState {
            client,
            settings: self.settings.clone(),
        });

        let app = create_proxy_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!(
            "Proxy for {} listening on {}",
            self.settings.upstream_origin, addr
        );

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
