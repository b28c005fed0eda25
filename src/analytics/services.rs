use serde::Serialize;
use time::{Date, OffsetDateTime};
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

use super::error::AnalyticsError;
use super::suggestions::{self, SmartSuggestion};
use super::summary::{self, SummaryStatistics};
use super::trends::{self, DailyTotal};
use crate::config::AnalyticsTuning;
use crate::dates::DateRange;
use crate::foods::{GatewayError, MacroGoal, NutritionGateway};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub range: DateRange,
    pub daily_totals: Vec<DailyTotal>,
    pub summary: SummaryStatistics,
    pub macro_goal: Option<MacroGoal>,
}

/// Up to `max_suggestions` foods worth re-logging right now.
#[instrument(skip(gateway, tuning))]
pub async fn rank_suggestions(
    gateway: &dyn NutritionGateway,
    tuning: &AnalyticsTuning,
    owner: Uuid,
    now: OffsetDateTime,
    search_term: Option<&str>,
) -> Result<Vec<SmartSuggestion>, AnalyticsError> {
    let window = DateRange::lookback(now.date(), tuning.lookback_days);
    let history = gateway
        .fetch_food_entries(owner, window)
        .await
        .map_err(|e| {
            error!(error = %e, %owner, "fetch food entries for suggestions failed");
            AnalyticsError::SuggestionsUnavailable(e)
        })?;

    let ranked = suggestions::rank(&history, now, search_term, tuning);
    debug!(%owner, history = history.len(), returned = ranked.len(), "suggestions ranked");
    Ok(ranked)
}

/// Daily buckets and summary statistics for `[start, end]`.
///
/// The three reads run concurrently. Only the food-entry read is fatal; a
/// failed day-off or goal read degrades to "none".
#[instrument(skip(gateway, tuning))]
pub async fn compute_trends(
    gateway: &dyn NutritionGateway,
    tuning: &AnalyticsTuning,
    owner: Uuid,
    start: Date,
    end: Date,
) -> Result<TrendReport, AnalyticsError> {
    let range = DateRange::new(start, end).ok_or(AnalyticsError::InvalidRange { start, end })?;

    let (entries, markers, goal) = tokio::join!(
        gateway.fetch_food_entries(owner, range),
        gateway.fetch_day_off_markers(owner, range),
        gateway.fetch_latest_macro_goal(owner),
    );

    let entries = entries.map_err(|e| {
        error!(error = %e, %owner, "fetch food entries for trends failed");
        AnalyticsError::TrendDataUnavailable(e)
    })?;
    let markers = markers.unwrap_or_else(|e| {
        warn!(error = %e, %owner, "day-off markers unavailable; continuing without");
        Vec::new()
    });
    let macro_goal = match goal {
        Ok(goal) => goal,
        Err(GatewayError::NotFound) => {
            debug!(%owner, "no macro goal set");
            None
        }
        Err(e) => {
            warn!(error = %e, %owner, "macro goal unavailable; continuing without");
            None
        }
    };

    let daily_totals = trends::aggregate(range, &entries, &markers);
    let summary = summary::summarize(&daily_totals, macro_goal.as_ref(), tuning.goal_tolerance);

    Ok(TrendReport {
        range,
        daily_totals,
        summary,
        macro_goal,
    })
}
