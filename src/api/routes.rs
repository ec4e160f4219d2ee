use axum::{
    extract::State,
    http::{HeaderValue, header::CACHE_CONTROL},
    middleware::map_response_with_state,
    response::Response,
    routing::{any, get},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    pages::{health, index},
    players::{get_player_stats, search_players},
    proxy::{forward, ProxyState},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    let cache_control = HeaderValue::from_str(&state.config.server.cache_control())
        .unwrap_or_else(|_| HeaderValue::from_static("public, s-maxage=3600"));

    let api = Router::new()
        .route("/api/players/search", get(search_players))
        .route("/api/players/:id/stats", get(get_player_stats))
        .layer(map_response_with_state(cache_control, add_cache_hint))
        .with_state(state);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .merge(api)
}

pub fn create_proxy_router(state: Arc<ProxyState>) -> Router {
    Router::new()
        .route("/", any(forward))
        .with_state(state)
}

/// Sets the revalidation hint on successful answers only
async fn add_cache_hint(
    State(cache_control): State<HeaderValue>,
    mut response: Response,
) -> Response {
    if response.status().is_success() {
        response
            .headers_mut()
            .entry(CACHE_CONTROL)
            .or_insert(cache_control);
    }
    response
}
