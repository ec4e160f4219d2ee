use serde::Deserialize;

use crate::api::stats_client::StatsClient;
use crate::config::AppConfig;

pub mod pages;
pub mod players;
pub mod proxy;

pub struct AppState {
    pub client: StatsClient,
    pub config: AppConfig,
}

impl AppState {
    pub fn per_page(&self) -> u32 {
        self.config.stats.search_limit as u32
    }
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}
