use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use std::sync::Arc;

use crate::api::models::{ErrorResponse, StatsResponse};
use crate::domain::SearchEnvelope;
use super::{AppState, SearchParams};

pub async fn search_players(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let per_page = state.per_page();
    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return (StatusCode::OK, Json(SearchEnvelope::empty(per_page))).into_response();
    }

    match state.client.search_players(&query).await {
        Ok(outcome) => {
            let status = if outcome.error.is_some() {
                StatusCode::SERVICE_UNAVAILABLE
            } else {
                StatusCode::OK
            };
            (status, Json(outcome.into_envelope(per_page))).into_response()
        }
        Err(e) => {
            error!("Player search for '{}' failed: {:?}", query, e);
            (StatusCode::OK, Json(SearchEnvelope::empty(per_page))).into_response()
        }
    }
}

pub async fn get_player_stats(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> impl IntoResponse {
    let Some(id) = parse_player_id(&raw_id) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid player ID")),
        )
            .into_response();
    };

    // Fractional ids are numbers but never name a player
    if id.fract() != 0.0 {
        return not_found();
    }

    match state.client.player_stats(id as i64).await {
        Ok(Some(stats)) => {
            info!("Resolved {} stats for player {}", stats.season, stats.player.id);
            Json(StatsResponse { data: stats }).into_response()
        }
        Ok(None) => not_found(),
        Err(e) => {
            error!("Stats lookup for player {} failed: {:?}", raw_id, e);
            not_found()
        }
    }
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("No stats found for this player")),
    )
        .into_response()
}

/// Finite numeric id, or `None`
fn parse_player_id(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|id| id.is_finite())
}
