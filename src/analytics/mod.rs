//! "Log it again" suggestions and date-range trends over a user's food log.

mod dto;
pub mod error;
pub mod handlers;
pub mod services;
pub mod suggestions;
pub mod summary;
pub mod trends;

use crate::state::AppState;
use axum::Router;

pub use error::AnalyticsError;
pub use services::{compute_trends, rank_suggestions, TrendReport};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::analytics_routes())
}
