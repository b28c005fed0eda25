pub mod gateway;
pub mod models;
mod repo;
pub mod repo_types;

pub use gateway::{GatewayError, NutritionGateway, PgGateway};
pub use models::{DayOffMarker, FoodLogEntry, MacroGoal};
