use std::collections::{HashMap, HashSet};

use serde::Serialize;
use time::Date;
use tracing::debug;

use crate::dates::{iso_date, short_label, DateRange};
use crate::foods::{DayOffMarker, FoodLogEntry};

/// Summed intake for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub date_label: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub is_day_off: bool,
}

impl DailyTotal {
    fn empty(date: Date, is_day_off: bool) -> Self {
        Self {
            date,
            date_label: short_label(date),
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            is_day_off,
        }
    }

    fn add(&mut self, entry: &FoodLogEntry) {
        self.calories += entry.calories;
        self.protein += entry.protein_grams;
        self.carbs += entry.carbs_total_grams;
        self.fat += entry.fat_total_grams;
    }
}

/// One zero-filled bucket per day of `range`, ascending. Entries dated
/// outside the range are skipped.
pub fn aggregate(
    range: DateRange,
    entries: &[FoodLogEntry],
    markers: &[DayOffMarker],
) -> Vec<DailyTotal> {
    let days_off: HashSet<Date> = markers.iter().map(|m| m.calendar_date).collect();

    let mut buckets: Vec<DailyTotal> = range
        .days()
        .map(|d| DailyTotal::empty(d, days_off.contains(&d)))
        .collect();
    let index: HashMap<Date, usize> = buckets
        .iter()
        .enumerate()
        .map(|(i, b)| (b.date, i))
        .collect();

    for entry in entries {
        match index.get(&entry.calendar_date) {
            Some(&i) => buckets[i].add(entry),
            None => debug!(
                entry_id = %entry.id,
                date = %entry.calendar_date,
                "entry outside requested range ignored"
            ),
        }
    }

    buckets
}

#[cfg(test)]
mod trend_tests {
    use super::*;
    use time::macros::{date, datetime};
    use uuid::Uuid;

    fn meal(on: Date, calories: f64, protein: f64, carbs: f64, fat: f64) -> FoodLogEntry {
        FoodLogEntry {
            id: Uuid::new_v4(),
            owner: Uuid::nil(),
            name: "Meal".into(),
            description: None,
            calendar_date: on,
            created_at: datetime!(2024-03-01 12:00 UTC),
            calories,
            protein_grams: protein,
            carbs_total_grams: carbs,
            carbs_fiber_grams: 0.0,
            carbs_sugar_grams: 0.0,
            fat_total_grams: fat,
            fat_saturated_grams: 0.0,
        }
    }

    fn day_off(on: Date) -> DayOffMarker {
        DayOffMarker {
            owner: Uuid::nil(),
            calendar_date: on,
            reason: Some("birthday".into()),
        }
    }

    fn range(start: Date, end: Date) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    #[test]
    fn zero_fills_every_day_in_range() {
        let r = range(date!(2024 - 01 - 28), date!(2024 - 02 - 03));
        let totals = aggregate(r, &[], &[]);
        assert_eq!(totals.len(), 7);
        assert_eq!(totals.first().unwrap().date, date!(2024 - 01 - 28));
        assert_eq!(totals.last().unwrap().date, date!(2024 - 02 - 03));
        assert!(totals.windows(2).all(|w| w[0].date < w[1].date));
        assert!(totals.iter().all(|t| t.calories == 0.0 && !t.is_day_off));
    }

    #[test]
    fn sums_entries_into_their_day() {
        let d = date!(2024 - 03 - 02);
        let r = range(date!(2024 - 03 - 01), date!(2024 - 03 - 03));
        let entries = vec![meal(d, 500.0, 30.0, 50.0, 20.0), meal(d, 300.0, 10.0, 40.0, 5.5)];
        let totals = aggregate(r, &entries, &[]);

        assert_eq!(totals[0].calories, 0.0);
        assert_eq!(totals[1].calories, 800.0);
        assert_eq!(totals[1].protein, 40.0);
        assert_eq!(totals[1].carbs, 90.0);
        assert_eq!(totals[1].fat, 25.5);
        assert_eq!(totals[1].date_label, "Mar 2");
        assert_eq!(totals[2].calories, 0.0);
    }

    #[test]
    fn marks_day_off_buckets() {
        let r = range(date!(2024 - 03 - 01), date!(2024 - 03 - 03));
        let markers = vec![day_off(date!(2024 - 03 - 03)), day_off(date!(2024 - 03 - 03))];
        let totals = aggregate(r, &[], &markers);
        assert!(!totals[0].is_day_off);
        assert!(!totals[1].is_day_off);
        assert!(totals[2].is_day_off);
    }

    #[test]
    fn ignores_entries_outside_range() {
        let r = range(date!(2024 - 03 - 01), date!(2024 - 03 - 02));
        let entries = vec![
            meal(date!(2024 - 02 - 29), 900.0, 0.0, 0.0, 0.0),
            meal(date!(2024 - 03 - 02), 250.0, 0.0, 0.0, 0.0),
            meal(date!(2024 - 03 - 03), 900.0, 0.0, 0.0, 0.0),
        ];
        let totals = aggregate(r, &entries, &[]);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[1].calories, 250.0);
        assert_eq!(totals.iter().map(|t| t.calories).sum::<f64>(), 250.0);
    }

    #[test]
    fn tolerates_inconsistent_subtotals() {
        // fiber larger than total carbs is an upstream concern; only totals are summed
        let mut odd = meal(date!(2024 - 03 - 01), 100.0, 1.0, 2.0, 3.0);
        odd.carbs_fiber_grams = 50.0;
        odd.fat_saturated_grams = 99.0;
        let r = range(date!(2024 - 03 - 01), date!(2024 - 03 - 01));
        let totals = aggregate(r, &[odd], &[]);
        assert_eq!(totals[0].carbs, 2.0);
        assert_eq!(totals[0].fat, 3.0);
    }
}
