use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::{OffsetDateTime, UtcOffset};
use tracing::{instrument, warn};

use super::dto::{SuggestionsQuery, TrendsQuery};
use super::services::{self, TrendReport};
use super::suggestions::SmartSuggestion;
use crate::{auth::AuthUser, state::AppState};

pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/suggestions", get(get_suggestions))
        .route("/analytics/trends", get(get_trends))
}

#[instrument(skip(state))]
pub async fn get_suggestions(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<SuggestionsQuery>,
) -> Result<Json<Vec<SmartSuggestion>>, (StatusCode, String)> {
    let offset = caller_offset(q.utc_offset_minutes)?;
    let now = OffsetDateTime::now_utc().to_offset(offset);

    let items = services::rank_suggestions(
        state.gateway.as_ref(),
        &state.config.analytics,
        user_id,
        now,
        q.q.as_deref(),
    )
    .await?;
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn get_trends(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<TrendsQuery>,
) -> Result<Json<TrendReport>, (StatusCode, String)> {
    let report = services::compute_trends(
        state.gateway.as_ref(),
        &state.config.analytics,
        user_id,
        q.start_date,
        q.end_date,
    )
    .await?;
    Ok(Json(report))
}

fn caller_offset(minutes: Option<i32>) -> Result<UtcOffset, (StatusCode, String)> {
    let Some(minutes) = minutes else {
        return Ok(UtcOffset::UTC);
    };
    minutes
        .checked_mul(60)
        .and_then(|secs| UtcOffset::from_whole_seconds(secs).ok())
        .ok_or_else(|| {
            warn!(minutes, "rejected utc offset");
            (StatusCode::BAD_REQUEST, "invalid utc_offset_minutes".into())
        })
}
