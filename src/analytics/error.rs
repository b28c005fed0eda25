use axum::http::StatusCode;
use thiserror::Error;
use time::Date;

use crate::foods::GatewayError;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("trend data unavailable")]
    TrendDataUnavailable(#[source] GatewayError),
    #[error("suggestions unavailable")]
    SuggestionsUnavailable(#[source] GatewayError),
    #[error("invalid date range: {start} is after {end}")]
    InvalidRange { start: Date, end: Date },
}

impl AnalyticsError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::TrendDataUnavailable(_) | Self::SuggestionsUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::InvalidRange { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<AnalyticsError> for (StatusCode, String) {
    fn from(e: AnalyticsError) -> Self {
        (e.status(), e.to_string())
    }
}
