//! Calendar day distributor
//!
//! Places one category's monthly amount onto the days of a month. Each call
//! adds to `planned_budget`; amounts already placed by other categories are
//! never overwritten, so the order of calls for a month matters.
//!
//! - FIXED: the whole amount on the anchor day (1st or 5th).
//! - SPREAD: evenly over weekdays, optionally only the first N.
//! - CLUSTERED: evenly over N randomly chosen days, weekends first.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use crate::models::{BudgetMonth, CalendarDay, CategoryBehavior, FixedDay, Money, UserId};

/// One category's placement request
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub category: &'a str,
    pub amount: Money,
    pub behavior: CategoryBehavior,
    /// Anchor for FIXED behavior
    pub fixed_day: FixedDay,
    /// Day count derived from the user's reported frequency
    pub user_frequency: Option<usize>,
}

impl<'a> Placement<'a> {
    pub fn new(category: &'a str, amount: Money, behavior: CategoryBehavior) -> Self {
        Self {
            category,
            amount,
            behavior,
            fixed_day: FixedDay::default(),
            user_frequency: None,
        }
    }

    pub fn with_fixed_day(mut self, fixed_day: FixedDay) -> Self {
        self.fixed_day = fixed_day;
        self
    }

    pub fn with_frequency(mut self, user_frequency: Option<usize>) -> Self {
        self.user_frequency = user_frequency;
        self
    }
}

/// Distributes monthly amounts across calendar days
#[derive(Debug, Clone, Copy)]
pub struct CalendarDayDistributor {
    default_clustered_days: usize,
}

impl Default for CalendarDayDistributor {
    fn default() -> Self {
        Self::new(4)
    }
}

impl CalendarDayDistributor {
    pub fn new(default_clustered_days: usize) -> Self {
        Self {
            default_clustered_days: default_clustered_days.max(1),
        }
    }

    /// Place `placement.amount` onto `days`
    ///
    /// `days` must be in calendar order. Returns the indices that received a
    /// non-zero share, in calendar order. A zero amount or an empty month is
    /// a no-op.
    pub fn distribute<R: Rng + ?Sized>(
        &self,
        days: &mut [CalendarDay],
        placement: &Placement<'_>,
        rng: &mut R,
    ) -> Vec<usize> {
        if placement.amount.is_zero() || days.is_empty() {
            return Vec::new();
        }

        let selected = match placement.behavior {
            CategoryBehavior::Fixed => placement
                .fixed_day
                .day_index(days.len())
                .into_iter()
                .collect(),
            CategoryBehavior::Spread => spread_days(days, placement.user_frequency),
            CategoryBehavior::Clustered => {
                let target = placement
                    .user_frequency
                    .filter(|n| *n > 0)
                    .unwrap_or_else(|| {
                        tracing::debug!(
                            category = placement.category,
                            days = self.default_clustered_days,
                            "no frequency given, using default clustered day count"
                        );
                        self.default_clustered_days
                    });
                clustered_days(days, target, rng)
            }
        };

        let shares = match placement.behavior {
            CategoryBehavior::Clustered => placement.amount.split_by_cent(selected.len()),
            _ => placement.amount.split_evenly(selected.len()),
        };
        assign_shares(days, &selected, placement.category, shares)
    }
}

/// Weekdays in calendar order, truncated to the requested count
fn spread_days(days: &[CalendarDay], user_frequency: Option<usize>) -> Vec<usize> {
    let mut candidates: Vec<usize> = (0..days.len()).filter(|&i| !days[i].is_weekend()).collect();
    if candidates.is_empty() {
        candidates = (0..days.len()).collect();
    }

    if let Some(n) = user_frequency.filter(|n| *n > 0) {
        candidates.truncate(n);
    }
    candidates
}

/// `target` days (capped at the month length) chosen at random, weekends preferred
fn clustered_days<R: Rng + ?Sized>(days: &[CalendarDay], target: usize, rng: &mut R) -> Vec<usize> {
    let target = target.min(days.len());

    let (mut pool, weekdays): (Vec<usize>, Vec<usize>) =
        (0..days.len()).partition(|&i| days[i].is_weekend());

    if pool.len() < target {
        let needed = target - pool.len();
        tracing::debug!(
            weekend_days = pool.len(),
            supplement = needed,
            "not enough weekend days, sampling weekdays"
        );
        pool.extend(weekdays.choose_multiple(rng, needed).copied());
    }

    let mut selected: Vec<usize> = pool.choose_multiple(rng, target).copied().collect();
    selected.sort_unstable();
    selected
}

/// Add each share to its day, skipping zero shares
fn assign_shares(
    days: &mut [CalendarDay],
    indices: &[usize],
    category: &str,
    shares: Vec<Money>,
) -> Vec<usize> {
    let mut placed = Vec::with_capacity(indices.len());

    for (&index, share) in indices.iter().zip(shares) {
        if share.is_zero() {
            continue;
        }
        days[index].add_planned(category, share);
        placed.push(index);
    }
    placed
}

/// Deterministic RNG for one (user, month, category)
///
/// Regenerating a plan with the same inputs yields the same clustered days.
pub fn seeded_rng(user_id: UserId, month: BudgetMonth, category: &str) -> StdRng {
    let mut hasher = Sha256::new();
    hasher.update(user_id.as_bytes());
    hasher.update(month.year().to_le_bytes());
    hasher.update(month.month().to_le_bytes());
    hasher.update(b":");
    hasher.update(category.as_bytes());
    let digest = hasher.finalize();

    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest[..32]);
    StdRng::from_seed(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn month(year: i32, m: u32) -> Vec<CalendarDay> {
        CalendarDay::for_dates(&BudgetMonth::new(year, m).unwrap().dates())
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn planned(days: &[CalendarDay], category: &str) -> Money {
        days.iter().map(|d| d.planned_for(category)).sum()
    }

    fn days_with(days: &[CalendarDay], category: &str) -> usize {
        days.iter()
            .filter(|d| d.planned_for(category).is_positive())
            .count()
    }

    #[test]
    fn test_fixed_month_start() {
        let mut days = month(2025, 1);
        let placement = Placement::new("rent", Money::from_dollars(1_500), CategoryBehavior::Fixed)
            .with_fixed_day(FixedDay::MonthStart);

        let placed = CalendarDayDistributor::default().distribute(&mut days, &placement, &mut rng());

        assert_eq!(placed, vec![0]);
        assert_eq!(days[0].planned_for("rent"), Money::from_dollars(1_500));
    }

    #[test]
    fn test_fixed_fifth_or_last_day() {
        let mut days = month(2025, 1);
        let placement = Placement::new("phone", Money::from_dollars(60), CategoryBehavior::Fixed);
        CalendarDayDistributor::default().distribute(&mut days, &placement, &mut rng());
        assert_eq!(
            days[4].date,
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()
        );
        assert_eq!(days[4].planned_for("phone"), Money::from_dollars(60));

        let mut short: Vec<CalendarDay> = month(2025, 1).into_iter().take(3).collect();
        let placed = CalendarDayDistributor::default().distribute(&mut short, &placement, &mut rng());
        assert_eq!(placed, vec![2]);
    }

    #[test]
    fn test_spread_over_all_weekdays() {
        // January 2025 has 23 weekdays
        let mut days = month(2025, 1);
        let placement = Placement::new("groceries", Money::from_cents(60_001), CategoryBehavior::Spread);

        let placed = CalendarDayDistributor::default().distribute(&mut days, &placement, &mut rng());

        assert_eq!(placed.len(), 23);
        assert!(placed.iter().all(|&i| !days[i].is_weekend()));
        assert_eq!(planned(&days, "groceries"), Money::from_cents(60_001));
        // 60001 / 23 = 2608 r 17; the last weekday absorbs the remainder
        assert_eq!(days[placed[0]].planned_for("groceries").cents(), 2_608);
        assert_eq!(days[placed[22]].planned_for("groceries").cents(), 2_625);
    }

    #[test]
    fn test_spread_first_n_weekdays() {
        let mut days = month(2025, 1);
        let placement = Placement::new("coffee", Money::from_dollars(120), CategoryBehavior::Spread)
            .with_frequency(Some(12));

        let placed = CalendarDayDistributor::default().distribute(&mut days, &placement, &mut rng());

        assert_eq!(placed.len(), 12);
        // Jan 1 2025 is a Wednesday; the 12th weekday is Jan 16
        assert_eq!(days[placed[11]].date, NaiveDate::from_ymd_opt(2025, 1, 16).unwrap());
        assert!(placed.iter().all(|&i| days[i].planned_for("coffee") == Money::from_dollars(10)));
    }

    #[test]
    fn test_spread_frequency_capped_at_weekdays() {
        let mut days = month(2025, 1);
        let placement = Placement::new("transport", Money::from_dollars(300), CategoryBehavior::Spread)
            .with_frequency(Some(40));
        let placed = CalendarDayDistributor::default().distribute(&mut days, &placement, &mut rng());
        assert_eq!(placed.len(), 23);
    }

    #[test]
    fn test_spread_with_only_weekend_days() {
        // Jan 4-5 2025 is a weekend
        let mut days: Vec<CalendarDay> = month(2025, 1).into_iter().skip(3).take(2).collect();
        let placement = Placement::new("groceries", Money::from_dollars(50), CategoryBehavior::Spread);
        let placed = CalendarDayDistributor::default().distribute(&mut days, &placement, &mut rng());
        assert_eq!(placed, vec![0, 1]);
    }

    #[test]
    fn test_clustered_prefers_weekends() {
        let mut days = month(2025, 1);
        let placement = Placement::new("dining_out", Money::from_dollars(200), CategoryBehavior::Clustered);

        let placed = CalendarDayDistributor::default().distribute(&mut days, &placement, &mut rng());

        assert_eq!(placed.len(), 4);
        assert!(placed.iter().all(|&i| days[i].is_weekend()));
        assert_eq!(planned(&days, "dining_out"), Money::from_dollars(200));
    }

    #[test]
    fn test_clustered_supplements_from_weekdays() {
        // January 2025 has 8 weekend days
        let mut days = month(2025, 1);
        let placement = Placement::new("coffee", Money::from_dollars(120), CategoryBehavior::Clustered)
            .with_frequency(Some(12));

        let placed = CalendarDayDistributor::default().distribute(&mut days, &placement, &mut rng());

        assert_eq!(placed.len(), 12);
        assert_eq!(placed.iter().filter(|&&i| days[i].is_weekend()).count(), 8);
    }

    #[test]
    fn test_clustered_amount_below_day_count_spreads_cents() {
        let mut days = month(2025, 1);
        let placement = Placement::new("travel", Money::from_cents(3), CategoryBehavior::Clustered);

        let placed = CalendarDayDistributor::default().distribute(&mut days, &placement, &mut rng());

        assert_eq!(placed.len(), 3);
        assert!(placed.iter().all(|&i| days[i].planned_for("travel").cents() == 1));
        assert!(placed.iter().all(|&i| days[i].is_weekend()));
    }

    #[test]
    fn test_clustered_capped_at_month_length() {
        let mut days = month(2025, 2);
        let placement = Placement::new("gifts", Money::from_dollars(100), CategoryBehavior::Clustered)
            .with_frequency(Some(45));
        let placed = CalendarDayDistributor::default().distribute(&mut days, &placement, &mut rng());
        assert_eq!(placed.len(), 28);
    }

    #[test]
    fn test_zero_amount_and_empty_month_are_noops() {
        let distributor = CalendarDayDistributor::default();
        let mut days = month(2025, 1);
        let zero = Placement::new("travel", Money::zero(), CategoryBehavior::Clustered);
        assert!(distributor.distribute(&mut days, &zero, &mut rng()).is_empty());
        assert!(days.iter().all(|d| d.planned_budget.is_empty()));

        let mut empty: Vec<CalendarDay> = Vec::new();
        let some = Placement::new("travel", Money::from_dollars(10), CategoryBehavior::Spread);
        assert!(distributor.distribute(&mut empty, &some, &mut rng()).is_empty());
    }

    #[test]
    fn test_categories_accumulate_on_shared_days() {
        let distributor = CalendarDayDistributor::default();
        let mut days = month(2025, 1);
        distributor.distribute(
            &mut days,
            &Placement::new("groceries", Money::from_cents(2_300), CategoryBehavior::Spread),
            &mut rng(),
        );
        distributor.distribute(
            &mut days,
            &Placement::new("transport", Money::from_cents(4_600), CategoryBehavior::Spread),
            &mut rng(),
        );

        let first_weekday = &days[0];
        assert_eq!(first_weekday.planned_for("groceries").cents(), 100);
        assert_eq!(first_weekday.planned_for("transport").cents(), 200);
        assert_eq!(first_weekday.total.cents(), 300);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let user = UserId::new();
        let jan = BudgetMonth::new(2025, 1).unwrap();
        let placement = Placement::new("travel", Money::from_dollars(400), CategoryBehavior::Clustered)
            .with_frequency(Some(10));
        let distributor = CalendarDayDistributor::default();

        let mut a = month(2025, 1);
        let mut b = month(2025, 1);
        let picked_a = distributor.distribute(&mut a, &placement, &mut seeded_rng(user, jan, "travel"));
        let picked_b = distributor.distribute(&mut b, &placement, &mut seeded_rng(user, jan, "travel"));
        assert_eq!(picked_a, picked_b);
    }

    proptest! {
        #[test]
        fn prop_spread_sum_is_exact(cents in 1i64..10_000_000, freq in proptest::option::of(1usize..40)) {
            let mut days = month(2025, 3);
            let placement = Placement::new("groceries", Money::from_cents(cents), CategoryBehavior::Spread)
                .with_frequency(freq);
            CalendarDayDistributor::default().distribute(&mut days, &placement, &mut rng());
            prop_assert_eq!(planned(&days, "groceries"), Money::from_cents(cents));
        }

        #[test]
        fn prop_clustered_day_count(requested in 1usize..60, seed in any::<u64>(), m in 1u32..=12) {
            let mut days = month(2024, m);
            let total_days = days.len();
            // At least one cent per selected day, so every share is non-zero
            let amount = Money::from_cents(100_000);
            let placement = Placement::new("entertainment", amount, CategoryBehavior::Clustered)
                .with_frequency(Some(requested));

            CalendarDayDistributor::default().distribute(&mut days, &placement, &mut StdRng::seed_from_u64(seed));

            prop_assert_eq!(days_with(&days, "entertainment"), requested.min(total_days));
            prop_assert_eq!(planned(&days, "entertainment"), amount);
        }

        #[test]
        fn prop_clustered_cents_cover_as_many_days_as_possible(cents in 1i64..40, requested in 1usize..40) {
            let mut days = month(2025, 1);
            let placement = Placement::new("travel", Money::from_cents(cents), CategoryBehavior::Clustered)
                .with_frequency(Some(requested));

            CalendarDayDistributor::default().distribute(&mut days, &placement, &mut rng());

            let expected = requested.min(days.len()).min(cents as usize);
            prop_assert_eq!(days_with(&days, "travel"), expected);
            prop_assert_eq!(planned(&days, "travel"), Money::from_cents(cents));
        }
    }
}
