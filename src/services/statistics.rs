//! Spending aggregations over the managed expense set
//!
//! Each period total has a `_on` variant taking "today" explicitly; the
//! plain variants use the local date.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::models::period::{self, days_in_month};
use crate::models::{Expense, Money, Period};
use crate::storage::ExpenseStore;

use super::expense::ExpenseManager;

/// Placeholder returned when there is no category to name
pub const NO_CATEGORY: &str = "N/A";

/// Amount spent in one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub count: usize,
}

/// Sum of `expenses` amounts
pub fn total_of<'a, I: IntoIterator<Item = &'a Expense>>(expenses: I) -> Money {
    expenses.into_iter().map(|e| e.amount).sum()
}

/// Per-category totals in first-seen order
pub fn category_totals_of<'a, I: IntoIterator<Item = &'a Expense>>(
    expenses: I,
) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for expense in expenses {
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(entry) => {
                entry.total += expense.amount;
                entry.count += 1;
            }
            None => totals.push(CategoryTotal {
                category: expense.category.clone(),
                total: expense.amount,
                count: 1,
            }),
        }
    }
    totals
}

impl<S: ExpenseStore> ExpenseManager<S> {
    /// Sum of every expense
    pub fn total(&self) -> Money {
        total_of(self.expenses())
    }

    /// Sum of expenses inside `period` looking back from `today`
    pub fn total_for_period_on(&self, period: Period, today: NaiveDate) -> Money {
        let (start, end) = period.range_ending(today);
        total_of(
            self.expenses()
                .iter()
                .filter(|e| e.date >= start && e.date <= end),
        )
    }

    pub fn total_today_on(&self, today: NaiveDate) -> Money {
        self.total_for_period_on(Period::Daily, today)
    }

    /// The seven days ending `today`
    pub fn total_this_week_on(&self, today: NaiveDate) -> Money {
        self.total_for_period_on(Period::Weekly, today)
    }

    /// Every expense in the calendar month and year of `today`
    pub fn total_this_month_on(&self, today: NaiveDate) -> Money {
        total_of(
            self.expenses()
                .iter()
                .filter(|e| e.date.year() == today.year() && e.date.month() == today.month()),
        )
    }

    pub fn total_today(&self) -> Money {
        self.total_today_on(period::today())
    }

    pub fn total_this_week(&self) -> Money {
        self.total_this_week_on(period::today())
    }

    pub fn total_this_month(&self) -> Money {
        self.total_this_month_on(period::today())
    }

    pub fn transaction_count(&self) -> usize {
        self.expenses().len()
    }

    /// Calendar month total spread over every day of the month
    pub fn average_per_day_on(&self, today: NaiveDate) -> Money {
        self.total_this_month_on(today)
            .per_day(days_in_month(today))
    }

    pub fn average_per_day(&self) -> Money {
        self.average_per_day_on(period::today())
    }

    /// Totals per category, in the order categories first appear
    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        category_totals_of(self.expenses())
    }

    /// Totals keyed by category
    pub fn total_by_category(&self) -> HashMap<String, Money> {
        self.category_totals()
            .into_iter()
            .map(|t| (t.category, t.total))
            .collect()
    }

    /// The category with the largest total, if any
    ///
    /// On a tie the category that appeared first wins.
    pub fn top_category(&self) -> Option<CategoryTotal> {
        let mut best: Option<CategoryTotal> = None;
        for entry in self.category_totals() {
            if best.as_ref().map_or(true, |b| entry.total > b.total) {
                best = Some(entry);
            }
        }
        best
    }

    /// Name of the category with the largest total, or [`NO_CATEGORY`]
    pub fn most_expensive_category(&self) -> String {
        self.top_category()
            .map(|t| t.category)
            .unwrap_or_else(|| NO_CATEGORY.to_string())
    }
}
