use serde::Serialize;

use super::trends::DailyTotal;
use crate::foods::MacroGoal;

const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
const KCAL_PER_GRAM_CARBS: f64 = 4.0;
const KCAL_PER_GRAM_FAT: f64 = 9.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MacroSplit {
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GoalCompletion {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

/// Daily gram targets derived from a percentage-based goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroTargets {
    pub calories: f64,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fat_grams: f64,
}

impl MacroTargets {
    pub fn from_goal(goal: &MacroGoal) -> Self {
        let calories = f64::from(goal.daily_calorie_goal);
        Self {
            calories,
            protein_grams: calories * goal.protein_percentage / 100.0 / KCAL_PER_GRAM_PROTEIN,
            carbs_grams: calories * goal.carbs_percentage / 100.0 / KCAL_PER_GRAM_CARBS,
            fat_grams: calories * goal.fat_percentage / 100.0 / KCAL_PER_GRAM_FAT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub avg_calories: i64,
    pub avg_protein: i64,
    pub avg_carbs: i64,
    pub avg_fat: i64,
    pub macro_percentages: MacroSplit,
    pub goal_completion: GoalCompletion,
    /// Days with intake or a day off; never below 1.
    pub total_days: u32,
    pub total_days_in_range: u32,
    pub days_logged: u32,
    pub days_off: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<MacroTargets>,
}

pub fn summarize(
    totals: &[DailyTotal],
    goal: Option<&MacroGoal>,
    tolerance: f64,
) -> SummaryStatistics {
    let days_with_data: Vec<&DailyTotal> = totals
        .iter()
        .filter(|d| d.calories > 0.0 || d.is_day_off)
        .collect();
    let actual_days: Vec<&DailyTotal> = days_with_data
        .iter()
        .copied()
        .filter(|d| d.calories > 0.0 && !d.is_day_off)
        .collect();

    let total_days = days_with_data.len().max(1) as u32;
    let avg_days = actual_days.len().max(1) as f64;
    let average = |f: fn(&DailyTotal) -> f64| -> i64 {
        (actual_days.iter().map(|d| f(d)).sum::<f64>() / avg_days).round() as i64
    };

    let avg_calories = average(|d| d.calories);
    let avg_protein = average(|d| d.protein);
    let avg_carbs = average(|d| d.carbs);
    let avg_fat = average(|d| d.fat);

    let targets = goal.map(MacroTargets::from_goal);
    let goal_completion = targets
        .map(|t| completion_rates(&days_with_data, &t, tolerance, total_days))
        .unwrap_or_default();

    SummaryStatistics {
        avg_calories,
        avg_protein,
        avg_carbs,
        avg_fat,
        macro_percentages: macro_split(avg_calories, avg_protein, avg_carbs, avg_fat),
        goal_completion,
        total_days,
        total_days_in_range: totals.len() as u32,
        days_logged: actual_days.len() as u32,
        days_off: totals.iter().filter(|d| d.is_day_off).count() as u32,
        targets,
    }
}

/// Percent of macro-derived calories; the denominator is the macro kcal sum,
/// not the logged calories.
fn macro_split(avg_calories: i64, protein: i64, carbs: i64, fat: i64) -> MacroSplit {
    let protein_kcal = protein as f64 * KCAL_PER_GRAM_PROTEIN;
    let carbs_kcal = carbs as f64 * KCAL_PER_GRAM_CARBS;
    let fat_kcal = fat as f64 * KCAL_PER_GRAM_FAT;
    let total = protein_kcal + carbs_kcal + fat_kcal;
    if avg_calories <= 0 || total <= 0.0 {
        return MacroSplit::default();
    }
    let pct = |kcal: f64| (kcal / total * 100.0).round() as i64;
    MacroSplit {
        protein: pct(protein_kcal),
        carbs: pct(carbs_kcal),
        fat: pct(fat_kcal),
    }
}

fn completion_rates(
    days: &[&DailyTotal],
    targets: &MacroTargets,
    tolerance: f64,
    total_days: u32,
) -> GoalCompletion {
    let met = |actual: f64, target: f64| actual >= target * tolerance;
    let mut counts = [0u32; 4];
    for day in days {
        let hits = if day.is_day_off {
            [true; 4]
        } else {
            [
                met(day.calories, targets.calories),
                met(day.protein, targets.protein_grams),
                met(day.carbs, targets.carbs_grams),
                met(day.fat, targets.fat_grams),
            ]
        };
        for (count, hit) in counts.iter_mut().zip(hits) {
            *count += u32::from(hit);
        }
    }
    let pct = |n: u32| (f64::from(n) / f64::from(total_days) * 100.0).round() as i64;
    GoalCompletion {
        calories: pct(counts[0]),
        protein: pct(counts[1]),
        carbs: pct(counts[2]),
        fat: pct(counts[3]),
    }
}

#[cfg(test)]
mod summary_tests {
    use super::*;
    use time::macros::{date, datetime};
    use time::Duration;
    use uuid::Uuid;

    fn day(offset: i64, calories: f64, protein: f64, carbs: f64, fat: f64) -> DailyTotal {
        DailyTotal {
            date: date!(2024 - 03 - 01) + Duration::days(offset),
            date_label: String::new(),
            calories,
            protein,
            carbs,
            fat,
            is_day_off: false,
        }
    }

    fn off(offset: i64) -> DailyTotal {
        DailyTotal {
            is_day_off: true,
            ..day(offset, 0.0, 0.0, 0.0, 0.0)
        }
    }

    fn goal(calories: i32, protein: f64, carbs: f64, fat: f64) -> MacroGoal {
        MacroGoal {
            owner: Uuid::nil(),
            daily_calorie_goal: calories,
            protein_percentage: protein,
            carbs_percentage: carbs,
            fat_percentage: fat,
            created_at: datetime!(2024-01-01 00:00 UTC),
        }
    }

    #[test]
    fn empty_range_is_safe() {
        let totals: Vec<DailyTotal> = (0..7).map(|i| day(i, 0.0, 0.0, 0.0, 0.0)).collect();
        let s = summarize(&totals, Some(&goal(2000, 30.0, 40.0, 30.0)), 0.9);
        assert_eq!(s.avg_calories, 0);
        assert_eq!(s.avg_protein, 0);
        assert_eq!(s.macro_percentages, MacroSplit::default());
        assert_eq!(s.goal_completion, GoalCompletion::default());
        assert_eq!(s.total_days, 1);
        assert_eq!(s.total_days_in_range, 7);
        assert_eq!(s.days_logged, 0);
    }

    #[test]
    fn no_buckets_at_all_is_safe() {
        let s = summarize(&[], None, 0.9);
        assert_eq!(s.total_days, 1);
        assert_eq!(s.avg_calories, 0);
        assert!(s.targets.is_none());
    }

    #[test]
    fn day_off_excluded_from_averages_but_meets_goals() {
        let totals = vec![off(0), day(1, 1000.0, 50.0, 100.0, 30.0)];
        let s = summarize(&totals, Some(&goal(2000, 30.0, 40.0, 30.0)), 0.9);
        assert_eq!(s.avg_calories, 1000);
        assert_eq!(s.total_days, 2);
        assert_eq!(s.days_off, 1);
        assert_eq!(s.days_logged, 1);
        assert_eq!(
            s.goal_completion,
            GoalCompletion { calories: 50, protein: 50, carbs: 50, fat: 50 }
        );
    }

    #[test]
    fn day_off_with_intake_still_counts_as_met() {
        let mut feast = day(0, 4000.0, 10.0, 500.0, 200.0);
        feast.is_day_off = true;
        let totals = vec![feast, day(1, 1850.0, 150.0, 200.0, 70.0)];
        let s = summarize(&totals, Some(&goal(2000, 30.0, 40.0, 30.0)), 0.9);
        assert_eq!(s.avg_calories, 1850);
        assert_eq!(s.total_days, 2);
        assert_eq!(s.goal_completion.calories, 100);
        assert_eq!(s.goal_completion.protein, 100);
    }

    #[test]
    fn goal_tolerance_is_ninety_percent() {
        let totals = vec![day(0, 1900.0, 0.0, 0.0, 0.0), day(1, 1700.0, 0.0, 0.0, 0.0)];
        let s = summarize(&totals, Some(&goal(2000, 30.0, 40.0, 30.0)), 0.9);
        assert_eq!(s.goal_completion.calories, 50);
        assert_eq!(s.goal_completion.protein, 0);
    }

    #[test]
    fn macro_targets_use_percentages_and_kcal_factors() {
        let t = MacroTargets::from_goal(&goal(2000, 30.0, 40.0, 30.0));
        assert_eq!(t.calories, 2000.0);
        assert_eq!(t.protein_grams, 150.0);
        assert_eq!(t.carbs_grams, 200.0);
        assert!((t.fat_grams - 66.666_666).abs() < 1e-3);
    }

    #[test]
    fn per_macro_completion() {
        // targets: protein 150g, carbs 200g, fat ~66.7g
        let totals = vec![day(0, 2000.0, 136.0, 179.0, 61.0)];
        let s = summarize(&totals, Some(&goal(2000, 30.0, 40.0, 30.0)), 0.9);
        assert_eq!(
            s.goal_completion,
            GoalCompletion { calories: 100, protein: 100, carbs: 0, fat: 100 }
        );
    }

    #[test]
    fn macro_split_uses_rounded_averages() {
        let totals = vec![
            day(0, 1600.0, 100.0, 200.0, 50.0),
            day(1, 1600.0, 100.0, 200.0, 50.0),
        ];
        let s = summarize(&totals, None, 0.9);
        // 400 + 800 + 450 = 1650 kcal from macros
        assert_eq!(s.macro_percentages, MacroSplit { protein: 24, carbs: 48, fat: 27 });
        assert_eq!(s.goal_completion, GoalCompletion::default());
        assert!(s.targets.is_none());
    }

    #[test]
    fn calories_without_macros_give_zero_split() {
        let totals = vec![day(0, 500.0, 0.0, 0.0, 0.0)];
        let s = summarize(&totals, None, 0.9);
        assert_eq!(s.avg_calories, 500);
        assert_eq!(s.macro_percentages, MacroSplit::default());
    }

    #[test]
    fn averages_round_to_nearest() {
        let totals = vec![day(0, 1001.0, 10.0, 0.0, 0.0), day(1, 1000.0, 11.0, 0.0, 0.0)];
        let s = summarize(&totals, None, 0.9);
        assert_eq!(s.avg_calories, 1001);
        assert_eq!(s.avg_protein, 11);
    }

    #[test]
    fn summary_serializes_without_targets_when_goal_missing() {
        let s = summarize(&[day(0, 100.0, 1.0, 1.0, 1.0)], None, 0.9);
        let json = serde_json::to_value(&s).unwrap();
        assert!(json.get("targets").is_none());
        assert_eq!(json["total_days"], 1);
    }
}
