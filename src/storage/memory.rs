//! In-memory expense store
//!
//! Keeps the "persisted" set in process. Used for isolated managers in tests
//! and by embedders that handle durability themselves.

use crate::error::{TrackerError, TrackerResult};
use crate::models::Expense;

use super::{ExpenseStore, LoadReport};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    expenses: Vec<Expense>,
    fail_saves: bool,
    save_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing record set
    pub fn with_expenses(expenses: Vec<Expense>) -> Self {
        Self {
            expenses,
            ..Self::default()
        }
    }

    /// Make every following save fail (or succeed again)
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// What the last successful save stored
    pub fn stored(&self) -> &[Expense] {
        &self.expenses
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl ExpenseStore for MemoryStore {
    fn load(&self) -> LoadReport {
        LoadReport {
            expenses: self.expenses.clone(),
            ..LoadReport::default()
        }
    }

    fn save(&mut self, expenses: &[Expense]) -> TrackerResult<()> {
        if self.fail_saves {
            return Err(TrackerError::Storage("memory store is read-only".into()));
        }
        self.expenses = expenses.to_vec();
        self.save_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseDraft, ExpenseId, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let expense = ExpenseDraft::new(
            "Lunch",
            "Food",
            Money::from_units(10),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        )
        .into_expense(ExpenseId::FIRST)
        .unwrap();

        store.save(&[expense.clone()]).unwrap();

        assert_eq!(store.load().expenses, vec![expense]);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_failing_saves_keep_previous_state() {
        let mut store = MemoryStore::new();
        store.set_fail_saves(true);

        let err = store.save(&[]).unwrap_err();
        assert!(err.is_storage());
        assert_eq!(store.save_count(), 0);
    }
}
