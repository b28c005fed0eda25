use std::collections::BTreeMap;

use serde::Serialize;
use time::OffsetDateTime;

use crate::config::AnalyticsTuning;
use crate::dates::{calendar_days_between, last_eaten_label};
use crate::foods::FoodLogEntry;

const SECONDS_PER_DAY: f64 = 86_400.0;
const USUAL_TIME_THRESHOLD: f64 = 0.7;
const FREQUENT_THRESHOLD: u32 = 3;
const RECENT_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SuggestionReason {
    #[serde(rename = "usually eaten around this time")]
    UsualTime,
    #[serde(rename = "frequently eaten")]
    Frequent,
    #[serde(rename = "added recently")]
    AddedRecently,
    #[serde(rename = "recently added")]
    RecentlyAdded,
}

impl SuggestionReason {
    fn classify(avg_time_score: f64, frequency: u32, recency_score: f64) -> Self {
        if avg_time_score > USUAL_TIME_THRESHOLD {
            Self::UsualTime
        } else if frequency >= FREQUENT_THRESHOLD {
            Self::Frequent
        } else if recency_score > RECENT_THRESHOLD {
            Self::AddedRecently
        } else {
            Self::RecentlyAdded
        }
    }
}

/// The most recent occurrence of a food plus its ranking data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmartSuggestion {
    #[serde(flatten)]
    pub entry: FoodLogEntry,
    pub score: f64,
    pub reason: SuggestionReason,
    pub last_eaten_label: String,
    pub frequency: u32,
    /// Linear `frequency / max_frequency`; informational only.
    pub frequency_score: f64,
}

/// Score, order and bound suggestions; optionally filter them by `search_term`.
pub fn rank(
    entries: &[FoodLogEntry],
    now: OffsetDateTime,
    search_term: Option<&str>,
    tuning: &AnalyticsTuning,
) -> Vec<SmartSuggestion> {
    let mut groups: BTreeMap<String, Vec<&FoodLogEntry>> = BTreeMap::new();
    for entry in entries {
        groups
            .entry(entry.name.to_lowercase())
            .or_default()
            .push(entry);
    }
    if groups.is_empty() {
        return Vec::new();
    }

    let max_frequency = groups.values().map(Vec::len).max().unwrap_or(1) as f64;

    let mut ranked: Vec<(String, SmartSuggestion)> = groups
        .into_iter()
        .filter_map(|(key, rows)| {
            score_group(&rows, max_frequency, now, tuning).map(|s| (key, s))
        })
        .collect();

    // Ties fall back to the normalised name so output is stable.
    ranked.sort_by(|a, b| b.1.score.total_cmp(&a.1.score).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(tuning.max_suggestions);
    let top: Vec<SmartSuggestion> = ranked.into_iter().map(|(_, s)| s).collect();

    match normalize_term(search_term) {
        Some(term) => filter_and_rerank(top, &term, tuning),
        None => top,
    }
}

fn score_group(
    rows: &[&FoodLogEntry],
    max_frequency: f64,
    now: OffsetDateTime,
    tuning: &AnalyticsTuning,
) -> Option<SmartSuggestion> {
    let frequency = rows.len() as u32;
    // First row wins on identical timestamps.
    let most_recent = rows
        .iter()
        .copied()
        .reduce(|best, e| if e.created_at > best.created_at { e } else { best })?;

    let avg_time_score =
        rows.iter().map(|e| time_similarity(e.created_at, now, tuning)).sum::<f64>() / rows.len() as f64;

    let days_since = ((now - most_recent.created_at).as_seconds_f64() / SECONDS_PER_DAY).max(0.0);
    let recency_score = (1.0 - days_since / tuning.recency_window_days).max(0.0);

    let freq = f64::from(frequency);
    let frequency_boost =
        freq.powf(tuning.frequency_exponent) / max_frequency.powf(tuning.frequency_exponent);

    let score = tuning.time_weight * avg_time_score
        + tuning.recency_weight * recency_score
        + tuning.frequency_weight * frequency_boost;

    Some(SmartSuggestion {
        entry: most_recent.clone(),
        score,
        reason: SuggestionReason::classify(avg_time_score, frequency, recency_score),
        last_eaten_label: last_eaten_label(calendar_days_between(most_recent.created_at, now)),
        frequency,
        frequency_score: freq / max_frequency,
    })
}

/// Hour-of-day closeness in `[0, 1]`, plus a bonus for the same weekday.
fn time_similarity(logged_at: OffsetDateTime, now: OffsetDateTime, tuning: &AnalyticsTuning) -> f64 {
    let local = logged_at.to_offset(now.offset());
    let hour_gap = (f64::from(now.hour()) - f64::from(local.hour())).abs();
    let mut score = (1.0 - hour_gap / tuning.time_window_hours).max(0.0);
    if local.weekday() == now.weekday() {
        score += tuning.same_weekday_bonus;
    }
    score
}

fn normalize_term(term: Option<&str>) -> Option<String> {
    term.map(|t| t.trim().to_lowercase()).filter(|t| !t.is_empty())
}

fn matches_term(entry: &FoodLogEntry, term: &str) -> bool {
    entry.name.to_lowercase().contains(term)
        || entry
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(term))
}

/// Live search over the already-bounded pool: never re-expands it.
fn filter_and_rerank(
    pool: Vec<SmartSuggestion>,
    term: &str,
    tuning: &AnalyticsTuning,
) -> Vec<SmartSuggestion> {
    let mut hits: Vec<SmartSuggestion> = pool
        .into_iter()
        .filter(|s| matches_term(&s.entry, term))
        .map(|mut s| {
            let name = s.entry.name.to_lowercase();
            s.score += f64::from(s.frequency).powf(tuning.frequency_exponent)
                * tuning.search_frequency_weight;
            if name == term {
                s.score += tuning.exact_match_bonus;
            }
            if name.starts_with(term) {
                s.score += tuning.prefix_match_bonus;
            }
            s
        })
        .collect();
    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    hits
}
