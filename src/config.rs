use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

/// Product-tuning constants for the analytics engine.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsTuning {
    pub lookback_days: i64,
    pub max_suggestions: usize,
    pub time_window_hours: f64,
    pub same_weekday_bonus: f64,
    pub recency_window_days: f64,
    pub time_weight: f64,
    pub recency_weight: f64,
    pub frequency_weight: f64,
    pub frequency_exponent: f64,
    pub search_frequency_weight: f64,
    pub exact_match_bonus: f64,
    pub prefix_match_bonus: f64,
    pub goal_tolerance: f64,
}

impl Default for AnalyticsTuning {
    fn default() -> Self {
        Self {
            lookback_days: 30,
            max_suggestions: 10,
            time_window_hours: 12.0,
            same_weekday_bonus: 0.3,
            recency_window_days: 7.0,
            time_weight: 0.25,
            recency_weight: 0.25,
            frequency_weight: 0.5,
            frequency_exponent: 1.5,
            search_frequency_weight: 0.15,
            exact_match_bonus: 0.3,
            prefix_match_bonus: 0.1,
            goal_tolerance: 0.9,
        }
    }
}

impl AnalyticsTuning {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            lookback_days: env_or("SUGGESTION_LOOKBACK_DAYS", d.lookback_days),
            max_suggestions: env_or("SUGGESTION_LIMIT", d.max_suggestions),
            time_window_hours: env_or("TIME_WINDOW_HOURS", d.time_window_hours),
            recency_window_days: env_or("RECENCY_WINDOW_DAYS", d.recency_window_days),
            goal_tolerance: env_or("GOAL_TOLERANCE", d.goal_tolerance),
            ..d
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub analytics: AnalyticsTuning,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "macro-tracker".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "macro-tracker-users".into()),
        };
        Ok(Self {
            database_url,
            jwt,
            analytics: AnalyticsTuning::from_env(),
        })
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn env_or_falls_back_on_garbage() {
        std::env::set_var("MACRO_TRACKER_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_or("MACRO_TRACKER_TEST_GARBAGE", 7_i64), 7);
        std::env::set_var("MACRO_TRACKER_TEST_NUMBER", " 14 ");
        assert_eq!(env_or("MACRO_TRACKER_TEST_NUMBER", 7_i64), 14);
        assert_eq!(env_or("MACRO_TRACKER_TEST_MISSING", 0.9_f64), 0.9);
    }

    #[test]
    fn default_tuning_matches_product_constants() {
        let t = AnalyticsTuning::default();
        assert_eq!(t.lookback_days, 30);
        assert_eq!(t.max_suggestions, 10);
        assert_eq!(t.time_weight + t.recency_weight + t.frequency_weight, 1.0);
        assert_eq!(t.goal_tolerance, 0.9);
    }
}
