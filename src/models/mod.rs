//! Core data models for DayPlan
//!
//! This module contains the data structures of the allocation engine:
//! money, income tiers, category behaviors, calendar days, plans and
//! redistribution transfers.

pub mod calendar;
pub mod category;
pub mod ids;
pub mod income;
pub mod money;
pub mod period;
pub mod plan;
pub mod transfer;

pub use calendar::{CalendarDay, DayStatus, DayType};
pub use category::{Cadence, CategoryBehavior, CategorySpec, FixedDay, HabitFrequency};
pub use ids::UserId;
pub use income::{IncomeTier, RegionProfile};
pub use money::Money;
pub use period::BudgetMonth;
pub use plan::{MonthlyBudgetPlan, OnboardingAnswers, PlanRecord};
pub use transfer::{DayBalance, DayBalanceInput, Transfer};
