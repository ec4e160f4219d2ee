use crate::api::parsers::dashboard::{
    PlayerIdentity, SeasonAverages, parse_player_identity, parse_season_averages,
};
use crate::api::parsers::players::{filter_players, parse_player_index};
use crate::config::StatsSettings;
use crate::domain::{Player, PlayerStats, SearchEnvelope, Season};
use crate::errors::{UpstreamError, fetch_context, parse_context};
use crate::http::StatsHttpClient;
use anyhow::{Context, Result};
use log::{info, warn};
use reqwest::Url;
use serde_json::Value;

const ALL_PLAYERS_ENDPOINT: &str = "commonallplayers";
const DASHBOARD_ENDPOINT: &str = "playerdashboardbygeneralsplits";
const PLAYER_INFO_ENDPOINT: &str = "commonplayerinfo";

/// Outcome of a player search; `error` is set when the upstream refused the request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    pub players: Vec<Player>,
    pub error: Option<UpstreamError>,
}

impl SearchOutcome {
    pub fn into_envelope(self, per_page: u32) -> SearchEnvelope {
        let error = self.error.map(|e| e.to_string());
        SearchEnvelope::from_players(self.players, per_page).with_error(error)
    }
}

/// Result of a single upstream fetch
enum Fetched {
    Json(Value),
    Rejected(UpstreamError),
    Malformed,
}

/// Client for the NBA stats API
pub struct StatsClient {
    http: StatsHttpClient,
    settings: StatsSettings,
}

impl StatsClient {
    pub fn new(settings: StatsSettings) -> Result<Self> {
        let http = StatsHttpClient::new(settings.proxy_url.clone())?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &StatsSettings {
        &self.settings
    }

    /// Active players whose name contains `query`
    ///
    /// A blank query returns nothing without touching the network. Upstream
    /// refusals are reported through [`SearchOutcome::error`]; only transport
    /// failures are returned as `Err`.
    pub async fn search_players(&self, query: &str) -> Result<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchOutcome::default());
        }

        let url = self.build_all_players_url(Season::current())?;
        info!("Searching players matching '{}'", query);

        let data = match self.fetch_json(&url).await? {
            Fetched::Json(data) => data,
            Fetched::Rejected(error) => {
                return Ok(SearchOutcome {
                    players: Vec::new(),
                    error: Some(error),
                });
            }
            Fetched::Malformed => return Ok(SearchOutcome::default()),
        };

        let players = filter_players(
            parse_player_index(&data),
            query,
            self.settings.search_limit,
        );
        info!("Found {} players matching '{}'", players.len(), query);

        Ok(SearchOutcome {
            players,
            error: None,
        })
    }

    /// Season averages for the season in progress, falling back to the previous one
    pub async fn player_stats(&self, player_id: i64) -> Result<Option<PlayerStats>> {
        self.player_stats_for_season(player_id, Season::current())
            .await
    }

    pub async fn player_stats_for_season(
        &self,
        player_id: i64,
        season: Season,
    ) -> Result<Option<PlayerStats>> {
        let (averages, season) = match self.fetch_season_averages(player_id, season).await? {
            Some(averages) => (averages, season),
            None => {
                let previous = season.previous();
                info!(
                    "No {} averages for player {}, trying {}",
                    season, player_id, previous
                );
                match self.fetch_season_averages(player_id, previous).await? {
                    Some(averages) => (averages, previous),
                    None => {
                        warn!("No season averages for player {}", player_id);
                        return Ok(None);
                    }
                }
            }
        };

        if averages.fga <= 0.0 {
            warn!(
                "Player {} has no field goal attempts in {}",
                player_id, season
            );
            return Ok(None);
        }

        let identity = self.fetch_identity(player_id).await;
        let mut player = Player::new(player_id, identity.first_name, identity.last_name);
        player.display_name = identity.display_name;

        Ok(Some(PlayerStats {
            player,
            pts: averages.pts,
            fga: averages.fga,
            season: season.to_string(),
        }))
    }

    // --- Helper Methods ---

    async fn fetch_season_averages(
        &self,
        player_id: i64,
        season: Season,
    ) -> Result<Option<SeasonAverages>> {
        let url = self.build_dashboard_url(player_id, season)?;
        match self.fetch_json(&url).await? {
            Fetched::Json(data) => Ok(parse_season_averages(&data)),
            Fetched::Rejected(_) | Fetched::Malformed => Ok(None),
        }
    }

    async fn fetch_identity(&self, player_id: i64) -> PlayerIdentity {
        let fetched = match self.build_player_info_url(player_id) {
            Ok(url) => self.fetch_json(&url).await,
            Err(e) => Err(e),
        };

        match fetched {
            Ok(Fetched::Json(data)) => parse_player_identity(&data),
            Ok(_) => PlayerIdentity::default(),
            Err(e) => {
                warn!("Identity lookup for player {} failed: {:?}", player_id, e);
                PlayerIdentity::default()
            }
        }
    }

    async fn fetch_json(&self, url: &Url) -> Result<Fetched> {
        let response = self
            .http
            .get(url.as_str())
            .await
            .with_context(|| fetch_context(url.as_str()))?;

        if let Some(error) = UpstreamError::from_status(response.status()) {
            warn!("{} returned {}", url, response.status());
            return Ok(Fetched::Rejected(error));
        }

        match response.json::<Value>().await {
            Ok(data) => Ok(Fetched::Json(data)),
            Err(e) => {
                warn!("{}: {}", parse_context(url.path()), e);
                Ok(Fetched::Malformed)
            }
        }
    }

    fn build_url(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Url> {
        let base = format!("{}/{}", self.settings.base_url.trim_end_matches('/'), endpoint);
        Url::parse_with_params(&base, params)
            .with_context(|| format!("Invalid stats API URL: {}", base))
    }

    fn build_all_players_url(&self, season: Season) -> Result<Url> {
        self.build_url(
            ALL_PLAYERS_ENDPOINT,
            &[
                ("LeagueID", self.settings.league_id.to_string()),
                ("Season", season.to_string()),
                ("IsOnlyCurrentSeason", "1".to_string()),
            ],
        )
    }

    fn build_dashboard_url(&self, player_id: i64, season: Season) -> Result<Url> {
        let mut params = vec![
            ("PlayerID", player_id.to_string()),
            ("Season", season.to_string()),
            ("SeasonType", "Regular Season".to_string()),
            ("PerMode", "PerGame".to_string()),
            ("MeasureType", "Base".to_string()),
            ("LeagueID", self.settings.league_id.to_string()),
        ];
        params.extend(
            NEUTRAL_DASHBOARD_FILTERS
                .iter()
                .map(|(key, value)| (*key, value.to_string())),
        );
        self.build_url(DASHBOARD_ENDPOINT, &params)
    }

    fn build_player_info_url(&self, player_id: i64) -> Result<Url> {
        self.build_url(
            PLAYER_INFO_ENDPOINT,
            &[
                ("PlayerID", player_id.to_string()),
                ("LeagueID", self.settings.league_id.to_string()),
            ],
        )
    }
}

/// Filters the dashboard endpoint rejects requests without
const NEUTRAL_DASHBOARD_FILTERS: &[(&str, &str)] = &[
    ("DateFrom", ""),
    ("DateTo", ""),
    ("GameSegment", ""),
    ("LastNGames", "0"),
    ("Location", ""),
    ("Month", "0"),
    ("OpponentTeamID", "0"),
    ("Outcome", ""),
    ("PORound", "0"),
    ("PaceAdjust", "N"),
    ("Period", "0"),
    ("PlusMinus", "N"),
    ("Rank", "N"),
    ("SeasonSegment", ""),
    ("ShotClockRange", ""),
    ("VsConference", ""),
    ("VsDivision", ""),
];
