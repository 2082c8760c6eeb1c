//! Plan repository for JSON storage
//!
//! Holds one `PlanRecord` per (user, month). Updates run as a
//! read-modify-write under the repository's write lock and are persisted
//! before the lock is released, so concurrent redistribution requests for
//! the same month are serialized and a failed update leaves nothing behind.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{DayplanError, DayplanResult};
use crate::models::{BudgetMonth, PlanRecord, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PlanData {
    #[serde(default)]
    plans: Vec<PlanRecord>,
}

/// Composite key for stored plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlanKey {
    pub user_id: UserId,
    pub month: BudgetMonth,
}

impl PlanKey {
    pub fn new(user_id: UserId, month: BudgetMonth) -> Self {
        Self { user_id, month }
    }
}

impl std::fmt::Display for PlanKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.user_id, self.month)
    }
}

/// Repository for plan persistence
pub struct PlanRepository {
    path: PathBuf,
    plans: RwLock<BTreeMap<PlanKey, PlanRecord>>,
}

impl PlanRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            plans: RwLock::new(BTreeMap::new()),
        }
    }

    fn lock_err(e: impl std::fmt::Display) -> DayplanError {
        DayplanError::Storage(format!("Failed to acquire plan lock: {}", e))
    }

    fn persist(&self, plans: &BTreeMap<PlanKey, PlanRecord>) -> DayplanResult<()> {
        let data = PlanData {
            plans: plans.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &data)
    }

    /// Load plans from disk
    pub fn load(&self) -> DayplanResult<()> {
        let data: PlanData = read_json(&self.path)?;

        let mut plans = self.plans.write().map_err(Self::lock_err)?;
        plans.clear();
        for record in data.plans {
            plans.insert(PlanKey::new(record.user_id, record.month), record);
        }
        Ok(())
    }

    /// Save plans to disk
    pub fn save(&self) -> DayplanResult<()> {
        let plans = self.plans.read().map_err(Self::lock_err)?;
        self.persist(&plans)
    }

    pub fn get(&self, user_id: UserId, month: BudgetMonth) -> DayplanResult<Option<PlanRecord>> {
        let plans = self.plans.read().map_err(Self::lock_err)?;
        Ok(plans.get(&PlanKey::new(user_id, month)).cloned())
    }

    /// Get a plan or fail with a not-found error
    pub fn require(&self, user_id: UserId, month: BudgetMonth) -> DayplanResult<PlanRecord> {
        self.get(user_id, month)?
            .ok_or_else(|| DayplanError::plan_not_found(PlanKey::new(user_id, month).to_string()))
    }

    /// Store a freshly generated plan, superseding any earlier one for that month
    pub fn replace(&self, record: PlanRecord) -> DayplanResult<Option<PlanRecord>> {
        let key = PlanKey::new(record.user_id, record.month);
        let mut plans = self.plans.write().map_err(Self::lock_err)?;
        let previous = plans.insert(key, record);
        if let Err(e) = self.persist(&plans) {
            match previous {
                Some(previous) => plans.insert(key, previous),
                None => plans.remove(&key),
            };
            return Err(e);
        }
        Ok(previous)
    }

    /// Read-modify-write one plan under the exclusive lock
    ///
    /// `f` works on a copy; the copy is committed and written to disk only if
    /// `f` succeeds.
    pub fn update<F, R>(&self, user_id: UserId, month: BudgetMonth, f: F) -> DayplanResult<R>
    where
        F: FnOnce(&mut PlanRecord) -> DayplanResult<R>,
    {
        let key = PlanKey::new(user_id, month);
        let mut plans = self.plans.write().map_err(Self::lock_err)?;

        let mut working = plans
            .get(&key)
            .cloned()
            .ok_or_else(|| DayplanError::plan_not_found(key.to_string()))?;

        let result = f(&mut working)?;
        working.touch();

        let previous = plans.insert(key, working);
        if let Err(e) = self.persist(&plans) {
            // Roll back the in-memory copy so memory matches disk
            if let Some(previous) = previous {
                plans.insert(key, previous);
            }
            return Err(e);
        }
        Ok(result)
    }

    /// All months planned for a user, oldest first
    pub fn months_for_user(&self, user_id: UserId) -> DayplanResult<Vec<BudgetMonth>> {
        let plans = self.plans.read().map_err(Self::lock_err)?;
        Ok(plans
            .keys()
            .filter(|k| k.user_id == user_id)
            .map(|k| k.month)
            .collect())
    }

    pub fn count(&self) -> DayplanResult<usize> {
        let plans = self.plans.read().map_err(Self::lock_err)?;
        Ok(plans.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalendarDay, IncomeTier, Money, MonthlyBudgetPlan};
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, PlanRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = PlanRepository::new(temp_dir.path().join("plans.json"));
        (temp_dir, repo)
    }

    fn record(user_id: UserId, month: BudgetMonth) -> PlanRecord {
        PlanRecord {
            user_id,
            month,
            region: "US".into(),
            tier: IncomeTier::Middle,
            plan: MonthlyBudgetPlan {
                total_income: Money::from_dollars(5000),
                fixed_total: Money::from_dollars(2000),
                discretionary_total: Money::from_dollars(2500),
                savings_goal: Money::from_dollars(500),
                category_amounts: BTreeMap::new(),
            },
            days: CalendarDay::for_dates(&month.dates()),
            transfers: Vec::new(),
            generated_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn jan() -> BudgetMonth {
        BudgetMonth::new(2025, 1).unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_replace_persists_and_reloads() {
        let (temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        repo.replace(record(user, jan())).unwrap();

        let reopened = PlanRepository::new(temp_dir.path().join("plans.json"));
        reopened.load().unwrap();
        let loaded = reopened.require(user, jan()).unwrap();
        assert_eq!(loaded.days.len(), 31);
    }

    #[test]
    fn test_replace_supersedes_previous_generation() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        assert!(repo.replace(record(user, jan())).unwrap().is_none());
        assert!(repo.replace(record(user, jan())).unwrap().is_some());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_replace_rolls_back_when_write_fails() {
        let (temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        let mut first = record(user, jan());
        first.region = "US-CA".into();
        repo.replace(first).unwrap();

        // A directory where the temp file should go makes every write fail
        std::fs::create_dir(temp_dir.path().join("plans.json.tmp")).unwrap();

        let mut second = record(user, jan());
        second.region = "US-TX".into();
        assert!(repo.replace(second).is_err());
        assert!(repo.replace(record(user, jan().next())).is_err());

        assert_eq!(repo.require(user, jan()).unwrap().region, "US-CA");
        assert!(repo.get(user, jan().next()).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_update_commits_on_success() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        repo.replace(record(user, jan())).unwrap();

        repo.update(user, jan(), |r| {
            r.days[0].add_spending("coffee", Money::from_cents(450));
            Ok(())
        })
        .unwrap();

        let loaded = repo.require(user, jan()).unwrap();
        assert_eq!(loaded.days[0].spent_for("coffee").cents(), 450);
    }

    #[test]
    fn test_update_discards_on_error() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        repo.replace(record(user, jan())).unwrap();

        let result: DayplanResult<()> = repo.update(user, jan(), |r| {
            r.days[0].add_spending("coffee", Money::from_cents(450));
            Err(DayplanError::Validation("rejected".into()))
        });
        assert!(result.is_err());

        let loaded = repo.require(user, jan()).unwrap();
        assert!(loaded.days[0].actual_spending.is_empty());
    }

    #[test]
    fn test_update_missing_plan() {
        let (_temp_dir, repo) = create_test_repo();
        let result = repo.update(UserId::new(), jan(), |_| Ok(()));
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_months_for_user() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        repo.replace(record(user, jan().next())).unwrap();
        repo.replace(record(user, jan())).unwrap();
        repo.replace(record(UserId::new(), jan())).unwrap();

        assert_eq!(repo.months_for_user(user).unwrap(), vec![jan(), jan().next()]);
    }
}
