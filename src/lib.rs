pub mod analytics;
pub mod app;
pub mod auth;
pub mod config;
pub mod dates;
pub mod foods;
pub mod state;
