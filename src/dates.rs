use serde::Serialize;
use time::{macros::format_description, Date, Duration, OffsetDateTime};

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// Closed calendar range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    #[serde(with = "iso_date")]
    pub start: Date,
    #[serde(with = "iso_date")]
    pub end: Date,
}

impl DateRange {
    /// Returns `None` when `start` is after `end`.
    pub fn new(start: Date, end: Date) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// `[end - days, end]`.
    pub fn lookback(end: Date, days: i64) -> Self {
        let start = end
            .checked_sub(Duration::days(days.max(0)))
            .unwrap_or(Date::MIN);
        Self { start, end }
    }

    /// Number of calendar days, both endpoints included.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).whole_days() + 1
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every day from `start` to `end` inclusive, ascending.
    pub fn days(&self) -> impl Iterator<Item = Date> + '_ {
        std::iter::successors(Some(self.start), |d| d.next_day()).take_while(|d| *d <= self.end)
    }
}

/// "Oct 5" style label used for chart axes.
pub fn short_label(date: Date) -> String {
    date.format(format_description!("[month repr:short] [day padding:none]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Whole calendar days between the dates of `then` and `now`, read in `now`'s offset.
pub fn calendar_days_between(then: OffsetDateTime, now: OffsetDateTime) -> i64 {
    let then_local = then.to_offset(now.offset()).date();
    (now.date() - then_local).whole_days()
}

pub fn last_eaten_label(days_ago: i64) -> String {
    match days_ago {
        i64::MIN..=0 => "today".to_string(),
        1 => "yesterday".to_string(),
        n => format!("{n} days ago"),
    }
}
