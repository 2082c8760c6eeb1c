//! Income tiers and regional thresholds

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// One of five ordered income brackets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeTier {
    Low,
    LowerMiddle,
    Middle,
    UpperMiddle,
    High,
}

impl IncomeTier {
    /// All tiers in ascending order
    pub fn all() -> &'static [IncomeTier] {
        &[
            IncomeTier::Low,
            IncomeTier::LowerMiddle,
            IncomeTier::Middle,
            IncomeTier::UpperMiddle,
            IncomeTier::High,
        ]
    }
}

impl fmt::Display for IncomeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IncomeTier::Low => "Low",
            IncomeTier::LowerMiddle => "Lower-middle",
            IncomeTier::Middle => "Middle",
            IncomeTier::UpperMiddle => "Upper-middle",
            IncomeTier::High => "High",
        };
        f.pad(label)
    }
}

/// Annual-income upper bounds for every tier below `High`
///
/// `upper_bounds[i]` is the largest annual income that still belongs to
/// `IncomeTier::all()[i]`; anything above the last bound is `High`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionProfile {
    /// Region code (e.g., "US", "US-CA")
    pub code: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Upper annual-income bound of Low, LowerMiddle, Middle, UpperMiddle
    pub upper_bounds: [Money; 4],
}

impl RegionProfile {
    pub fn new(code: impl Into<String>, name: impl Into<String>, upper_bounds: [Money; 4]) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            upper_bounds,
        }
    }

    /// Check that bounds are positive and strictly increasing
    pub fn validate(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err("region code cannot be empty".into());
        }
        if !self.upper_bounds[0].is_positive() {
            return Err(format!("region '{}': thresholds must be positive", self.code));
        }
        if self.upper_bounds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(format!(
                "region '{}': thresholds must be strictly increasing",
                self.code
            ));
        }
        Ok(())
    }

    /// Map an annual income onto a tier
    pub fn tier_for_annual(&self, annual: Money) -> IncomeTier {
        let tiers = IncomeTier::all();
        self.upper_bounds
            .iter()
            .position(|bound| annual <= *bound)
            .map(|i| tiers[i])
            .unwrap_or(IncomeTier::High)
    }
}
