//! Plan generation and redistribution
//!
//! `PlanEngine` runs the in-memory pipeline for one user's month:
//! classify, compute the discretionary pool, weight categories and lay the
//! amounts onto the calendar. `PlanService` wraps it with persistence and
//! the audit trail.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::audit::{AuditEntry, EntityType};
use crate::config::{ClusteredSelection, EngineConfig, Settings};
use crate::error::{DayplanError, DayplanResult};
use crate::models::{
    BudgetMonth, CalendarDay, CategoryBehavior, DayBalance, DayBalanceInput, IncomeTier, Money,
    MonthlyBudgetPlan, OnboardingAnswers, PlanRecord, Transfer, UserId,
};
use crate::storage::{PlanKey, Storage};

use super::classifier::IncomeClassifier;
use super::discretionary::compute_discretionary;
use super::distributor::{seeded_rng, CalendarDayDistributor, Placement};
use super::redistributor::{redistribute, Redistribution};
use super::weights::{apply_weights, compute_weights, monthly_frequencies};

/// A freshly generated month
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    /// Region code the income was classified against
    pub region: String,
    pub tier: IncomeTier,
    pub plan: MonthlyBudgetPlan,
    pub days: Vec<CalendarDay>,
}

/// Days after a redistribution pass, with the transfers that produced them
#[derive(Debug, Clone)]
pub struct RedistributionOutcome {
    pub days: Vec<CalendarDay>,
    pub transfers: Vec<Transfer>,
    /// Overage per day that could not be covered
    pub unresolved: BTreeMap<NaiveDate, Money>,
}

impl RedistributionOutcome {
    pub fn total_moved(&self) -> Money {
        self.transfers.iter().map(|t| t.amount).sum()
    }
}

/// In-memory plan pipeline
pub struct PlanEngine<'a> {
    config: &'a EngineConfig,
    settings: &'a Settings,
}

impl<'a> PlanEngine<'a> {
    pub fn new(config: &'a EngineConfig, settings: &'a Settings) -> Self {
        Self { config, settings }
    }

    /// Generate the month-level plan and its calendar
    ///
    /// # Errors
    ///
    /// - `Validation` for negative amounts in the answers
    /// - `BudgetInfeasible` when fixed expenses exceed income
    /// - `Config` when a habit names a category with no behavior
    pub fn generate_plan(
        &self,
        answers: &OnboardingAnswers,
        user_id: UserId,
        month: BudgetMonth,
    ) -> DayplanResult<GeneratedPlan> {
        answers.validate().map_err(DayplanError::Validation)?;

        let region = if answers.region.trim().is_empty() {
            self.settings.default_region.as_str()
        } else {
            answers.region.as_str()
        };

        let total_income = answers.total_income();
        let tier = IncomeClassifier::new(self.config).classify(total_income, region);
        let region = self.config.region(region).code.clone();
        let budget = compute_discretionary(total_income, &answers.fixed_expenses, answers.savings_goal)?;

        // Every habit must map to exactly one behavior before anything is placed
        let mut behaviors = BTreeMap::new();
        for name in answers.habits.keys() {
            let spec = self.config.require_category(name)?;
            behaviors.insert(name.clone(), spec.clone());
        }

        let fallback: Vec<String> = self
            .config
            .discretionary_categories()
            .map(|c| c.name.clone())
            .collect();
        let weights = compute_weights(&monthly_frequencies(&answers.habits), &fallback);
        let category_amounts = apply_weights(budget.discretionary_total, &weights);

        let mut days = CalendarDay::for_dates(&month.dates());
        let distributor = CalendarDayDistributor::new(self.settings.clustered_default_days);

        for (name, amount) in &answers.fixed_expenses {
            let fixed_day = self
                .config
                .category(name)
                .filter(|c| c.behavior == CategoryBehavior::Fixed)
                .map(|c| c.fixed_day)
                .unwrap_or_default();
            let placement = Placement::new(name, *amount, CategoryBehavior::Fixed).with_fixed_day(fixed_day);
            // FIXED placement never draws from the rng
            distributor.distribute(&mut days, &placement, &mut StdRng::seed_from_u64(0));
        }

        for (name, amount) in &category_amounts {
            let spec = match behaviors.get(name) {
                Some(spec) => spec.clone(),
                None => self.config.require_category(name)?.clone(),
            };
            let user_frequency = answers.habits.get(name).and_then(|h| h.day_count());
            let placement = Placement::new(name, *amount, spec.behavior)
                .with_fixed_day(spec.fixed_day)
                .with_frequency(user_frequency);

            let mut rng = match self.settings.clustered_selection {
                ClusteredSelection::Seeded => seeded_rng(user_id, month, name),
                ClusteredSelection::Fresh => StdRng::from_entropy(),
            };
            distributor.distribute(&mut days, &placement, &mut rng);
        }

        for day in &mut days {
            day.refresh_status(self.settings.warning_threshold_percent);
        }

        let plan = MonthlyBudgetPlan {
            total_income,
            fixed_total: budget.fixed_total,
            discretionary_total: budget.discretionary_total,
            savings_goal: budget.adjusted_savings_goal,
            category_amounts,
        };

        tracing::info!(
            user = %user_id,
            %month,
            region = %region,
            %tier,
            income = %plan.total_income,
            discretionary = %plan.discretionary_total,
            categories = plan.category_amounts.len(),
            "generated plan"
        );

        Ok(GeneratedPlan {
            region,
            tier,
            plan,
            days,
        })
    }

    /// Rebalance a month's days, returning a new day list
    ///
    /// Each day's spent (recorded spending plus earlier redistribution) is
    /// compared with its planned total. The net movement lands in
    /// `redistributed` so recorded spending is never rewritten.
    pub fn apply_redistribution(&self, days: &[CalendarDay]) -> DayplanResult<RedistributionOutcome> {
        let mut inputs = BTreeMap::new();
        for day in days {
            let input: DayBalanceInput = DayBalance::new(day.spent(), day.limit()).into();
            if inputs.insert(day.date, input).is_some() {
                return Err(DayplanError::Validation(format!(
                    "{} appears more than once",
                    day.date
                )));
            }
        }

        let Redistribution {
            balances,
            transfers,
            unresolved,
        } = redistribute(&inputs)?;

        let days = days
            .iter()
            .map(|day| {
                let mut day = day.clone();
                if let Some(balance) = balances.get(&day.date) {
                    let delta = balance.spent - day.spent();
                    day.redistributed += delta;
                }
                day.refresh_status(self.settings.warning_threshold_percent);
                day
            })
            .collect();

        Ok(RedistributionOutcome {
            days,
            transfers,
            unresolved,
        })
    }
}

/// Persisted plan operations for the configured user
pub struct PlanService<'a> {
    storage: &'a Storage,
    config: &'a EngineConfig,
    settings: &'a Settings,
}

impl<'a> PlanService<'a> {
    pub fn new(storage: &'a Storage, config: &'a EngineConfig, settings: &'a Settings) -> Self {
        Self {
            storage,
            config,
            settings,
        }
    }

    fn engine(&self) -> PlanEngine<'_> {
        PlanEngine::new(self.config, self.settings)
    }

    fn user(&self) -> UserId {
        self.settings.user_id
    }

    /// Generate and store a month's plan, superseding any earlier one
    pub fn generate(&self, answers: &OnboardingAnswers, month: BudgetMonth) -> DayplanResult<PlanRecord> {
        let generated = self.engine().generate_plan(answers, self.user(), month)?;

        let now = chrono::Utc::now();
        let record = PlanRecord {
            user_id: self.user(),
            month,
            region: generated.region,
            tier: generated.tier,
            plan: generated.plan,
            days: generated.days,
            transfers: Vec::new(),
            generated_at: now,
            updated_at: now,
        };

        let previous = self.storage.plans.replace(record.clone())?;
        let key = PlanKey::new(record.user_id, month).to_string();
        match previous {
            Some(previous) => self.storage.log_update(
                EntityType::Plan,
                key,
                Some(month.friendly_name()),
                &previous.plan,
                &record.plan,
                Some("regenerated".into()),
            )?,
            None => self.storage.log_create(
                EntityType::Plan,
                key,
                Some(month.friendly_name()),
                &record.plan,
            )?,
        }

        Ok(record)
    }

    /// Get a stored plan
    pub fn get(&self, month: BudgetMonth) -> DayplanResult<PlanRecord> {
        self.storage.plans.require(self.user(), month)
    }

    /// Record actual spending against a day of a stored plan
    pub fn record_spending(
        &self,
        month: BudgetMonth,
        date: NaiveDate,
        category: &str,
        amount: Money,
    ) -> DayplanResult<CalendarDay> {
        if amount.is_negative() {
            return Err(DayplanError::Validation(format!(
                "spending cannot be negative ({})",
                amount
            )));
        }
        if !month.contains(date) {
            return Err(DayplanError::Validation(format!(
                "{} is outside {}",
                date, month
            )));
        }
        let category = category.trim();
        if category.is_empty() {
            return Err(DayplanError::Validation("category cannot be empty".into()));
        }

        let threshold = self.settings.warning_threshold_percent;
        let (before, day) = self.storage.plans.update(self.user(), month, |record| {
            let day = record
                .day_mut(date)
                .ok_or_else(|| DayplanError::day_not_found(date.to_string()))?;
            let before = day.spent_for(category);
            day.add_spending(category, amount);
            day.refresh_status(threshold);
            Ok((before, day.clone()))
        })?;

        let after = day.spent_for(category);
        self.storage.log_update(
            EntityType::CalendarDay,
            date.to_string(),
            Some(category.to_string()),
            &before,
            &after,
            Some(format!("{}: {} -> {}", category, before, after)),
        )?;

        tracing::debug!(%date, category, %amount, status = %day.status, "recorded spending");
        Ok(day)
    }

    /// Rebalance a stored month under the plan lock
    pub fn rebalance(&self, month: BudgetMonth) -> DayplanResult<RedistributionOutcome> {
        let engine = self.engine();
        let outcome = self.storage.plans.update(self.user(), month, |record| {
            let outcome = engine.apply_redistribution(&record.days)?;
            record.days = outcome.days.clone();
            record.transfers.extend(outcome.transfers.iter().copied());
            Ok(outcome)
        })?;

        let entries: Vec<AuditEntry> = outcome
            .transfers
            .iter()
            .map(|t| AuditEntry::create(EntityType::Transfer, t.source_day.to_string(), None, t))
            .collect();
        self.storage.audit().log_batch(&entries)?;

        tracing::info!(
            %month,
            transfers = outcome.transfers.len(),
            moved = %outcome.total_moved(),
            unresolved_days = outcome.unresolved.len(),
            "redistributed"
        );
        Ok(outcome)
    }
}
