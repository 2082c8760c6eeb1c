//! DayPlan - income allocation and day-by-day budgeting
//!
//! This library allocates a monthly income across spending categories,
//! spreads each category's amount over the days of the month, and later
//! rebalances the calendar when actual spending drifts from plan.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, user settings and the region/category tables
//! - `error`: Custom error types
//! - `models`: Core data models (money, months, calendar days, plans)
//! - `services`: The allocation engine and plan operations
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `export`: CSV/JSON/YAML export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `dayplan` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use dayplan::config::{EngineConfig, Settings};
//! use dayplan::services::PlanEngine;
//!
//! let config = EngineConfig::builtin()?;
//! let settings = Settings::default();
//! let generated = PlanEngine::new(&config, &settings)
//!     .generate_plan(&answers, settings.user_id, month)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{DayplanError, DayplanResult};
