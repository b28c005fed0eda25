use serde::Serialize;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::dates::iso_date;

/// A logged meal, with every macro already coerced to a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodLogEntry {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "iso_date")]
    pub calendar_date: Date, // day the entry counts toward
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub calories: f64,
    pub protein_grams: f64,
    pub carbs_total_grams: f64,
    pub carbs_fiber_grams: f64,
    pub carbs_sugar_grams: f64,
    pub fat_total_grams: f64,
    pub fat_saturated_grams: f64,
}

/// "YOLO day": a day the user opted out of strict goal tracking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayOffMarker {
    pub owner: Uuid,
    #[serde(with = "iso_date")]
    pub calendar_date: Date,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroGoal {
    pub owner: Uuid,
    pub daily_calorie_goal: i32,
    pub protein_percentage: f64,
    pub carbs_percentage: f64,
    pub fat_percentage: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
