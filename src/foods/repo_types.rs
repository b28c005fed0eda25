use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use super::models::{DayOffMarker, FoodLogEntry, MacroGoal};

/// Raw `food_logs` row. Numeric columns come back as text and are
/// coerced once, here, before anything downstream sees them.
#[derive(Debug, Clone, FromRow)]
pub struct FoodLogRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub calendar_date: Date,
    pub created_at: OffsetDateTime,
    pub calories: Option<String>,
    pub protein_grams: Option<String>,
    pub carbs_total_grams: Option<String>,
    pub carbs_fiber_grams: Option<String>,
    pub carbs_sugar_grams: Option<String>,
    pub fat_total_grams: Option<String>,
    pub fat_saturated_grams: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DayOffRow {
    pub user_id: Uuid,
    pub calendar_date: Date,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct MacroGoalRow {
    pub user_id: Uuid,
    pub daily_calorie_goal: i32,
    pub protein_percentage: Option<String>,
    pub carbs_percentage: Option<String>,
    pub fat_percentage: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Parse-or-default: missing, blank, unparseable or non-finite values become `0.0`.
/// Amounts are never negative.
pub fn parse_amount(raw: Option<&str>) -> f64 {
    let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0.0;
    };
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => v.max(0.0),
        _ => {
            debug!(value = %s, "unparseable amount coerced to 0");
            0.0
        }
    }
}

impl From<FoodLogRow> for FoodLogEntry {
    fn from(r: FoodLogRow) -> Self {
        Self {
            id: r.id,
            owner: r.user_id,
            name: r.name,
            description: r.description,
            calendar_date: r.calendar_date,
            created_at: r.created_at,
            calories: parse_amount(r.calories.as_deref()),
            protein_grams: parse_amount(r.protein_grams.as_deref()),
            carbs_total_grams: parse_amount(r.carbs_total_grams.as_deref()),
            carbs_fiber_grams: parse_amount(r.carbs_fiber_grams.as_deref()),
            carbs_sugar_grams: parse_amount(r.carbs_sugar_grams.as_deref()),
            fat_total_grams: parse_amount(r.fat_total_grams.as_deref()),
            fat_saturated_grams: parse_amount(r.fat_saturated_grams.as_deref()),
        }
    }
}

impl From<DayOffRow> for DayOffMarker {
    fn from(r: DayOffRow) -> Self {
        Self {
            owner: r.user_id,
            calendar_date: r.calendar_date,
            reason: r.reason,
        }
    }
}

impl From<MacroGoalRow> for MacroGoal {
    fn from(r: MacroGoalRow) -> Self {
        Self {
            owner: r.user_id,
            daily_calorie_goal: r.daily_calorie_goal,
            protein_percentage: parse_amount(r.protein_percentage.as_deref()),
            carbs_percentage: parse_amount(r.carbs_percentage.as_deref()),
            fat_percentage: parse_amount(r.fat_percentage.as_deref()),
            created_at: r.created_at,
        }
    }
}
