//! Custom error types for DayPlan
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::Money;

/// The main error type for DayPlan operations
#[derive(Error, Debug)]
pub enum DayplanError {
    /// Configuration-related errors (bad tables, unknown categories)
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for caller-supplied input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Fixed expenses cannot be covered by income
    #[error("Budget infeasible: fixed expenses exceed income by {}", infeasible_gap(.income, .fixed_total))]
    BudgetInfeasible { income: Money, fixed_total: Money },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl DayplanError {
    /// Create a "not found" error for stored plans
    pub fn plan_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Plan",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for calendar days
    pub fn day_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Day",
            identifier: identifier.into(),
        }
    }

    /// Create a configuration error for a category missing from the behavior table
    pub fn unknown_category(name: &str) -> Self {
        Self::Config(format!("category '{}' has no registered behavior", name))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for DayplanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DayplanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

fn infeasible_gap(income: &Money, fixed_total: &Money) -> Money {
    *fixed_total - *income
}

/// Result type alias for DayPlan operations
pub type DayplanResult<T> = Result<T, DayplanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DayplanError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = DayplanError::plan_not_found("2025-01");
        assert_eq!(err.to_string(), "Plan not found: 2025-01");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_budget_infeasible_reports_gap() {
        let err = DayplanError::BudgetInfeasible {
            income: Money::from_cents(300_000),
            fixed_total: Money::from_cents(345_050),
        };
        assert_eq!(
            err.to_string(),
            "Budget infeasible: fixed expenses exceed income by $450.50"
        );
    }

    #[test]
    fn test_unknown_category_is_config_error() {
        let err = DayplanError::unknown_category("yachting");
        assert!(matches!(err, DayplanError::Config(_)));
        assert!(err.to_string().contains("yachting"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DayplanError = io_err.into();
        assert!(matches!(err, DayplanError::Io(_)));
    }
}
