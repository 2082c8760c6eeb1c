//! Service layer for DayPlan
//!
//! The allocation engine, leaf-first: income classification, the
//! discretionary pool, category weights, calendar distribution and
//! redistribution. `planner` ties them together and adds persistence.

pub mod classifier;
pub mod discretionary;
pub mod distributor;
pub mod planner;
pub mod redistributor;
pub mod weights;

pub use classifier::IncomeClassifier;
pub use discretionary::{compute_discretionary, DiscretionaryBudget};
pub use distributor::{seeded_rng, CalendarDayDistributor, Placement};
pub use planner::{GeneratedPlan, PlanEngine, PlanService, RedistributionOutcome};
pub use redistributor::{redistribute, redistribute_balances, Redistribution};
pub use weights::{apply_weights, compute_weights, monthly_frequencies};
