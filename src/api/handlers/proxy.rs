use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderValue, Method, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Json, Response},
};
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::api::models::ErrorResponse;
use crate::config::ProxySettings;
use crate::http::browser_headers;

pub struct ProxyState {
    pub client: Client,
    pub settings: ProxySettings,
}

#[derive(Deserialize)]
pub struct ProxyParams {
    pub url: Option<String>,
}

/// Re-issues a GET to the stats API and mirrors the answer verbatim
pub async fn forward(
    State(state): State<Arc<ProxyState>>,
    method: Method,
    params: Option<Query<ProxyParams>>,
) -> Response {
    if method != Method::GET {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(ErrorResponse::new("Method not allowed")),
        )
            .into_response();
    }

    let target = params
        .and_then(|Query(params)| params.url)
        .filter(|url| is_allowed_target(url, &state.settings.upstream_origin));
    let Some(target) = target else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing or invalid url parameter")),
        )
            .into_response();
    };

    info!("Forwarding {}", target);
    let upstream = match state
        .client
        .get(&target)
        .headers(browser_headers())
        .send()
        .await
    {
        Ok(upstream) => upstream,
        Err(e) => {
            warn!("Upstream request to {} failed: {}", target, e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::new("Upstream request failed").with_message(e.to_string())),
            )
                .into_response();
        }
    };

    let status = upstream.status();
    let content_type = upstream
        .headers()
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    response.headers_mut().insert(CONTENT_TYPE, content_type);
    response
}

/// Only URLs under the configured upstream origin may be forwarded
pub fn is_allowed_target(url: &str, origin: &str) -> bool {
    let prefix = format!("{}/", origin.trim_end_matches('/'));
    url.starts_with(&prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_allowed_target() {
        let origin = "https://stats.nba.com";
        assert!(is_allowed_target(
            "https://stats.nba.com/stats/commonplayerinfo?PlayerID=1",
            origin
        ));
        assert!(!is_allowed_target("https://stats.nba.com.evil.io/x", origin));
        assert!(!is_allowed_target("http://stats.nba.com/stats", origin));
        assert!(!is_allowed_target("https://example.com/", origin));
        assert!(!is_allowed_target("", origin));
    }
}
