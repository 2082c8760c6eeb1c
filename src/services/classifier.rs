//! Income classifier
//!
//! Maps a monthly income to one of five ordered tiers using the annual
//! thresholds of the user's region.

use crate::config::EngineConfig;
use crate::models::{IncomeTier, Money};

/// Classifies incomes against the region table
pub struct IncomeClassifier<'a> {
    config: &'a EngineConfig,
}

impl<'a> IncomeClassifier<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Classify a monthly income for a region
    ///
    /// Unknown regions resolve to the default national profile. Negative
    /// incomes are treated as zero.
    pub fn classify(&self, monthly_income: Money, region: &str) -> IncomeTier {
        let annual = Money::from_cents(monthly_income.non_negative().cents().saturating_mul(12));
        let profile = self.config.region(region);
        let tier = profile.tier_for_annual(annual);
        tracing::debug!(region = %profile.code, %annual, %tier, "classified income");
        tier
    }
}
