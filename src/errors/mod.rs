use reqwest::StatusCode;

/// Non-success answer from the stats API or the proxy in front of it
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    #[error(
        "Request blocked by the stats API (HTTP 403). The proxy or server IP is likely blocked."
    )]
    Blocked,

    #[error("Could not reach the stats API through the proxy (HTTP 502).")]
    ProxyUnreachable,

    #[error("Stats API request failed (HTTP {0}).")]
    Status(u16),
}

impl UpstreamError {
    /// Classify a response status; `None` for success
    pub fn from_status(status: StatusCode) -> Option<Self> {
        if status.is_success() {
            return None;
        }
        Some(match status {
            StatusCode::FORBIDDEN => Self::Blocked,
            StatusCode::BAD_GATEWAY => Self::ProxyUnreachable,
            other => Self::Status(other.as_u16()),
        })
    }
}

/// Context message for a failed fetch
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Context message for an unreadable body
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}
