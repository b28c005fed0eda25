use serde::Deserialize;
use time::Date;

use crate::dates::iso_date;

#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    /// Live search term; blank means no filter.
    #[serde(default)]
    pub q: Option<String>,
    /// Caller's UTC offset, so "around this time" follows their clock.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct TrendsQuery {
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
}
