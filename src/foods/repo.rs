use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{DayOffRow, FoodLogRow, MacroGoalRow};
use crate::dates::DateRange;

/// Food entries whose calendar date falls in `range`, oldest first.
pub async fn list_food_logs(
    db: &PgPool,
    user_id: Uuid,
    range: DateRange,
) -> anyhow::Result<Vec<FoodLogRow>> {
    let rows = sqlx::query_as::<_, FoodLogRow>(
        r#"
        SELECT id, user_id, name, description, calendar_date, created_at,
               calories::text            AS calories,
               protein_grams::text       AS protein_grams,
               carbs_total_grams::text   AS carbs_total_grams,
               carbs_fiber_grams::text   AS carbs_fiber_grams,
               carbs_sugar_grams::text   AS carbs_sugar_grams,
               fat_total_grams::text     AS fat_total_grams,
               fat_saturated_grams::text AS fat_saturated_grams
          FROM food_logs
         WHERE user_id = $1
           AND calendar_date BETWEEN $2 AND $3
         ORDER BY calendar_date ASC, created_at ASC
        "#,
    )
    .bind(user_id)
    .bind(range.start)
    .bind(range.end)
    .fetch_all(db)
    .await
    .context("list food logs")?;
    Ok(rows)
}

pub async fn list_day_offs(
    db: &PgPool,
    user_id: Uuid,
    range: DateRange,
) -> anyhow::Result<Vec<DayOffRow>> {
    let rows = sqlx::query_as::<_, DayOffRow>(
        r#"
        SELECT user_id, calendar_date, reason
          FROM day_offs
         WHERE user_id = $1
           AND calendar_date BETWEEN $2 AND $3
         ORDER BY calendar_date ASC
        "#,
    )
    .bind(user_id)
    .bind(range.start)
    .bind(range.end)
    .fetch_all(db)
    .await
    .context("list day offs")?;
    Ok(rows)
}

/// Most recently created goal, if the user ever set one.
pub async fn latest_macro_goal(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<MacroGoalRow>> {
    let row = sqlx::query_as::<_, MacroGoalRow>(
        r#"
        SELECT user_id, daily_calorie_goal,
               protein_percentage::text AS protein_percentage,
               carbs_percentage::text   AS carbs_percentage,
               fat_percentage::text     AS fat_percentage,
               created_at
          FROM macro_goals
         WHERE user_id = $1
         ORDER BY created_at DESC
         LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("latest macro goal")?;
    Ok(row)
}
