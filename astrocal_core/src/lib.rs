#![forbid(unsafe_code)]

//! Core domain model and business logic for the AstroCal calorie tracker.
//!
//! This crate provides:
//! - Domain types (profiles, foods, intake ledgers, goal states)
//! - The daily energy target model (Mifflin-St Jeor)
//! - Intake ledger mutation rules
//! - The built-in food catalog
//! - History summaries
//! - Persistence (profiles, day ledgers, session)
//! - Login/registration

pub mod types;
pub mod error;
pub mod energy;
pub mod catalog;
pub mod ledger;
pub mod history;
pub mod store;
pub mod auth;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog, FoodFilter};
pub use ledger::goal_comparison;
pub use history::{summarize, DaySummary, HISTORY_WINDOW};
pub use store::ProfileStore;
pub use auth::{login_or_register, LoginOutcome};
pub use config::Config;
