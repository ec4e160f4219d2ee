use log::warn;

use crate::api::StatsClient;
use crate::domain::{PlayerStats, SearchEnvelope};
use crate::ui::session::PlayerSource;

impl PlayerSource for StatsClient {
    async fn search_page(&self, query: &str, page: u32) -> SearchEnvelope {
        let per_page = self.settings().search_limit as u32;
        // results always fit on one page
        if page > 1 {
            return SearchEnvelope::empty(per_page);
        }

        match self.search_players(query).await {
            Ok(outcome) => outcome.into_envelope(per_page),
            Err(e) => {
                warn!("Player search for '{}' failed: {:?}", query, e);
                SearchEnvelope::empty(per_page)
            }
        }
    }

    async fn fetch_stats(&self, player_id: i64) -> Option<PlayerStats> {
        match self.player_stats(player_id).await {
            Ok(stats) => stats,
            Err(e) => {
                warn!("Stats lookup for player {} failed: {:?}", player_id, e);
                None
            }
        }
    }
}
