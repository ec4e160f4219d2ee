use serde::{Deserialize, Serialize};

/// Player as returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Player {
    pub fn new(id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Display name, or "First Last" when none was provided
    pub fn full_name(&self) -> String {
        match &self.display_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string(),
        }
    }
}

/// Per-game season averages for a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player: Player,
    pub pts: f64,
    pub fga: f64,
    pub season: String,
}

/// Rounds a per-game average to one decimal place
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total_pages: u32,
    pub current_page: u32,
    pub next_page: Option<u32>,
    pub per_page: u32,
    pub total_count: u32,
}

impl PaginationMeta {
    /// Meta for an empty result
    pub fn empty(per_page: u32) -> Self {
        Self {
            total_pages: 0,
            current_page: 1,
            next_page: None,
            per_page,
            total_count: 0,
        }
    }

    /// Meta for a result that fits on a single page
    pub fn single_page(count: usize, per_page: u32) -> Self {
        if count == 0 {
            return Self::empty(per_page);
        }
        Self {
            total_pages: 1,
            current_page: 1,
            next_page: None,
            per_page,
            total_count: count as u32,
        }
    }
}

/// Paginated search response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub data: Vec<Player>,
    pub meta: PaginationMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchEnvelope {
    pub fn empty(per_page: u32) -> Self {
        Self {
            data: Vec::new(),
            meta: PaginationMeta::empty(per_page),
            error: None,
        }
    }

    pub fn from_players(players: Vec<Player>, per_page: u32) -> Self {
        let meta = PaginationMeta::single_page(players.len(), per_page);
        Self {
            data: players,
            meta,
            error: None,
        }
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }
}
