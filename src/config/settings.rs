use log::info;

/// Environment variable selecting proxy mode for the stats client
pub const PROXY_URL_ENV: &str = "NBA_PROXY_URL";

#[derive(Debug, Clone)]
pub struct StatsSettings {
    pub base_url: String,
    pub proxy_url: Option<String>,
    pub league_id: &'static str,
    pub search_limit: usize,
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            base_url: "https://stats.nba.com/stats".to_string(),
            proxy_url: None,
            league_id: "00",
            search_limit: 25,
        }
    }
}

impl StatsSettings {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_proxy_url(mut self, proxy_url: Option<String>) -> Self {
        self.proxy_url = proxy_url.filter(|url| !url.trim().is_empty());
        self
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub cache_max_age_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            cache_max_age_secs: 3600,
        }
    }
}

impl ServerSettings {
    pub fn cache_control(&self) -> String {
        format!(
            "public, s-maxage={0}, stale-while-revalidate={0}",
            self.cache_max_age_secs
        )
    }
}

#[derive(Debug, Clone)]
pub struct ProxySettings {
    pub upstream_origin: String,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            upstream_origin: "https://stats.nba.com".to_string(),
        }
    }
}

impl ProxySettings {
    pub fn with_upstream_origin(mut self, origin: impl Into<String>) -> Self {
        self.upstream_origin = origin.into();
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub stats: StatsSettings,
    pub server: ServerSettings,
    pub proxy: ProxySettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with overrides read from the process environment
    pub fn from_env() -> Self {
        let proxy_url = std::env::var(PROXY_URL_ENV).ok();
        let config = Self::new().with_proxy_url(proxy_url);

        match &config.stats.proxy_url {
            Some(url) => info!("Stats client in proxy mode via {}", url),
            None => info!("Stats client in direct mode"),
        }
        config
    }

    pub fn with_proxy_url(mut self, proxy_url: Option<String>) -> Self {
        self.stats = self.stats.with_proxy_url(proxy_url);
        self
    }
}
