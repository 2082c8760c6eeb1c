//! Discretionary budget calculator
//!
//! Fixed expenses are never reduced. When income cannot cover both fixed
//! expenses and the savings goal, the savings goal is trimmed first and the
//! discretionary pool drops to zero.

use std::collections::BTreeMap;

use crate::error::{DayplanError, DayplanResult};
use crate::models::Money;

/// Result of splitting income into fixed, discretionary and savings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscretionaryBudget {
    pub fixed_total: Money,
    pub discretionary_total: Money,
    pub adjusted_savings_goal: Money,
}

impl DiscretionaryBudget {
    /// Whether the savings goal had to be cut
    pub fn savings_trimmed(&self, requested: Money) -> bool {
        self.adjusted_savings_goal < requested
    }
}

/// Compute the discretionary pool
///
/// # Errors
///
/// `BudgetInfeasible` when fixed expenses alone exceed income.
pub fn compute_discretionary(
    income: Money,
    fixed_expenses: &BTreeMap<String, Money>,
    savings_goal: Money,
) -> DayplanResult<DiscretionaryBudget> {
    let fixed_total: Money = fixed_expenses.values().sum();
    if fixed_total > income {
        return Err(DayplanError::BudgetInfeasible {
            income,
            fixed_total,
        });
    }

    let savings_goal = savings_goal.non_negative();
    let discretionary = income - fixed_total - savings_goal;

    if discretionary.is_negative() {
        // Deficit comes out of savings; fixed_total <= income keeps this >= 0
        let adjusted = (savings_goal + discretionary).non_negative();
        tracing::debug!(
            requested = %savings_goal,
            adjusted = %adjusted,
            "savings goal trimmed to cover fixed expenses"
        );
        return Ok(DiscretionaryBudget {
            fixed_total,
            discretionary_total: Money::zero(),
            adjusted_savings_goal: adjusted,
        });
    }

    Ok(DiscretionaryBudget {
        fixed_total,
        discretionary_total: discretionary,
        adjusted_savings_goal: savings_goal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn expenses(items: &[(&str, i64)]) -> BTreeMap<String, Money> {
        items
            .iter()
            .map(|(name, cents)| (name.to_string(), Money::from_cents(*cents)))
            .collect()
    }

    #[test]
    fn test_worked_example() {
        let fixed = expenses(&[("rent", 150_000), ("utilities", 20_000), ("phone", 15_000)]);
        let budget =
            compute_discretionary(Money::from_dollars(5_500), &fixed, Money::from_dollars(500))
                .unwrap();

        assert_eq!(budget.fixed_total, Money::from_dollars(1_850));
        assert_eq!(budget.discretionary_total, Money::from_dollars(3_150));
        assert_eq!(budget.adjusted_savings_goal, Money::from_dollars(500));
    }

    #[test]
    fn test_savings_trimmed_before_anything_else() {
        let fixed = expenses(&[("rent", 400_000)]);
        let budget =
            compute_discretionary(Money::from_dollars(4_500), &fixed, Money::from_dollars(800))
                .unwrap();

        assert_eq!(budget.discretionary_total, Money::zero());
        assert_eq!(budget.adjusted_savings_goal, Money::from_dollars(500));
        assert!(budget.savings_trimmed(Money::from_dollars(800)));
    }

    #[test]
    fn test_fixed_equal_to_income_zeroes_savings() {
        let fixed = expenses(&[("rent", 300_000)]);
        let budget =
            compute_discretionary(Money::from_dollars(3_000), &fixed, Money::from_dollars(200))
                .unwrap();

        assert_eq!(budget.discretionary_total, Money::zero());
        assert_eq!(budget.adjusted_savings_goal, Money::zero());
    }

    #[test]
    fn test_infeasible_reports_gap() {
        let fixed = expenses(&[("rent", 250_000), ("childcare", 95_050)]);
        let err = compute_discretionary(Money::from_dollars(3_000), &fixed, Money::zero())
            .unwrap_err();

        assert!(matches!(err, DayplanError::BudgetInfeasible { .. }));
        assert!(err.to_string().contains("$450.50"));
    }

    #[test]
    fn test_no_fixed_expenses() {
        let budget =
            compute_discretionary(Money::from_dollars(2_000), &BTreeMap::new(), Money::zero())
                .unwrap();
        assert_eq!(budget.discretionary_total, Money::from_dollars(2_000));
    }

    proptest! {
        #[test]
        fn prop_parts_sum_to_income(
            income in 0i64..2_000_000,
            fixed in proptest::collection::vec(0i64..200_000, 0..6),
            savings in 0i64..1_000_000,
        ) {
            let fixed_map: BTreeMap<String, Money> = fixed
                .iter()
                .enumerate()
                .map(|(i, c)| (format!("item{}", i), Money::from_cents(*c)))
                .collect();
            let fixed_sum: i64 = fixed.iter().sum();

            match compute_discretionary(Money::from_cents(income), &fixed_map, Money::from_cents(savings)) {
                Ok(b) => {
                    prop_assert!(fixed_sum <= income);
                    prop_assert!(!b.discretionary_total.is_negative());
                    prop_assert!(!b.adjusted_savings_goal.is_negative());
                    prop_assert_eq!(
                        b.fixed_total + b.discretionary_total + b.adjusted_savings_goal,
                        Money::from_cents(income)
                    );
                }
                Err(DayplanError::BudgetInfeasible { .. }) => prop_assert!(fixed_sum > income),
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }
    }
}
