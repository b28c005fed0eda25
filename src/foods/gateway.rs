use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use super::models::{DayOffMarker, FoodLogEntry, MacroGoal};
use super::repo;
use crate::dates::DateRange;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("record not found")]
    NotFound,
    #[error("store error: {0:#}")]
    Store(#[from] anyhow::Error),
}

/// Read side of the persistent store, as seen by the analytics engine.
#[async_trait]
pub trait NutritionGateway: Send + Sync {
    async fn fetch_food_entries(
        &self,
        owner: Uuid,
        range: DateRange,
    ) -> Result<Vec<FoodLogEntry>, GatewayError>;

    async fn fetch_day_off_markers(
        &self,
        owner: Uuid,
        range: DateRange,
    ) -> Result<Vec<DayOffMarker>, GatewayError>;

    async fn fetch_latest_macro_goal(&self, owner: Uuid) -> Result<Option<MacroGoal>, GatewayError>;
}

#[derive(Clone)]
pub struct PgGateway {
    db: PgPool,
}

impl PgGateway {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NutritionGateway for PgGateway {
    async fn fetch_food_entries(
        &self,
        owner: Uuid,
        range: DateRange,
    ) -> Result<Vec<FoodLogEntry>, GatewayError> {
        let rows = repo::list_food_logs(&self.db, owner, range).await?;
        Ok(rows.into_iter().map(FoodLogEntry::from).collect())
    }

    async fn fetch_day_off_markers(
        &self,
        owner: Uuid,
        range: DateRange,
    ) -> Result<Vec<DayOffMarker>, GatewayError> {
        let rows = repo::list_day_offs(&self.db, owner, range).await?;
        Ok(rows.into_iter().map(DayOffMarker::from).collect())
    }

    async fn fetch_latest_macro_goal(&self, owner: Uuid) -> Result<Option<MacroGoal>, GatewayError> {
        Ok(repo::latest_macro_goal(&self.db, owner).await?.map(MacroGoal::from))
    }
}
