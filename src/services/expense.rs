//! Expense manager
//!
//! Owns the in-memory record set for the lifetime of the process and is the
//! single place ids are handed out. Every mutation is validated, written
//! through the store as a full rewrite, and only then applied in memory, so
//! a failed save leaves both sides as they were.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Expense, ExpenseDraft, ExpenseId};
use crate::storage::{ExpenseStore, SkippedLine};

/// Date format matched by keyword search when none is configured
pub const DEFAULT_SEARCH_DATE_FORMAT: &str = "%d/%m/%Y";

/// Ordering applied to query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Order records were added in
    #[default]
    Insertion,
    /// Newest first, ties keep insertion order
    DateDesc,
    /// Largest first, ties keep insertion order
    AmountDesc,
}

/// Options for querying expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseQuery {
    /// Case-insensitive keyword; blank means no keyword filter
    pub keyword: Option<String>,
    /// Exact category; `None` means all categories
    pub category: Option<String>,
    /// Inclusive start date
    pub start_date: Option<NaiveDate>,
    /// Inclusive end date
    pub end_date: Option<NaiveDate>,
    pub sort: SortOrder,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn since(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn date_range(self, start: NaiveDate, end: NaiveDate) -> Self {
        self.since(start).until(end)
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// In-memory expense set backed by an [`ExpenseStore`]
#[derive(Debug)]
pub struct ExpenseManager<S: ExpenseStore> {
    store: S,
    expenses: Vec<Expense>,
    /// `None` once the id space is used up
    next_id: Option<ExpenseId>,
    skipped: Vec<SkippedLine>,
    search_date_format: String,
}

impl<S: ExpenseStore> ExpenseManager<S> {
    /// Load every record from `store`
    pub fn open(store: S) -> Self {
        let mut manager = Self {
            store,
            expenses: Vec::new(),
            next_id: Some(ExpenseId::FIRST),
            skipped: Vec::new(),
            search_date_format: DEFAULT_SEARCH_DATE_FORMAT.to_string(),
        };
        manager.reload();
        manager
    }

    /// Discard the in-memory set and read the store again
    pub fn reload(&mut self) {
        let report = self.store.load();
        self.expenses = report.expenses;
        self.skipped = report.skipped;
        self.next_id = self
            .expenses
            .iter()
            .map(|e| e.id)
            .max()
            .map_or(Some(ExpenseId::FIRST), |max| max.next());

        info!(
            count = self.expenses.len(),
            skipped = self.skipped.len(),
            next_id = ?self.next_id,
            "loaded expenses"
        );
    }

    /// Date format keyword search matches against, besides ISO dates
    pub fn set_search_date_format(&mut self, format: impl Into<String>) {
        self.search_date_format = format.into();
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Lines the last load had to skip
    pub fn skipped_lines(&self) -> &[SkippedLine] {
        &self.skipped
    }

    /// The id the next added expense will get, `None` when none are left
    pub fn next_id(&self) -> Option<ExpenseId> {
        self.next_id
    }

    // === Mutations ===

    /// Record a new expense
    pub fn add(&mut self, draft: ExpenseDraft) -> TrackerResult<Expense> {
        let id = self.next_id.ok_or(TrackerError::IdsExhausted)?;
        let expense = draft.into_expense(id)?;

        let mut candidate = self.expenses.clone();
        candidate.push(expense.clone());
        self.commit(candidate)?;
        self.next_id = id.next();

        info!(id = %expense.id, category = %expense.category, amount = %expense.amount, "added expense");
        Ok(expense)
    }

    /// Replace every field of an existing expense except its id
    pub fn update(&mut self, id: ExpenseId, draft: ExpenseDraft) -> TrackerResult<Expense> {
        let index = self.index_of(id)?;
        let updated = draft.into_expense(id)?;

        let mut candidate = self.expenses.clone();
        candidate[index] = updated.clone();
        self.commit(candidate)?;

        info!(id = %id, "updated expense");
        Ok(updated)
    }

    /// Remove an expense; its id is not handed out again
    pub fn delete(&mut self, id: ExpenseId) -> TrackerResult<Expense> {
        let index = self.index_of(id)?;

        let mut candidate = self.expenses.clone();
        let removed = candidate.remove(index);
        self.commit(candidate)?;

        info!(id = %id, "deleted expense");
        Ok(removed)
    }

    fn index_of(&self, id: ExpenseId) -> TrackerResult<usize> {
        self.expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))
    }

    /// Persist `candidate`, and adopt it only once the store accepted it
    fn commit(&mut self, candidate: Vec<Expense>) -> TrackerResult<()> {
        self.store.save(&candidate)?;
        debug!(count = candidate.len(), "persisted expenses");
        self.expenses = candidate;
        Ok(())
    }

    // === Queries ===

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Snapshot of every expense in insertion order
    pub fn get_all(&self) -> Vec<Expense> {
        self.expenses.clone()
    }

    /// Borrowed view of every expense in insertion order
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Case-insensitive match on description, category, or date
    pub fn search(&self, keyword: &str) -> Vec<Expense> {
        self.collect(|e| e.matches_keyword(keyword, &self.search_date_format))
    }

    /// Exact category match; `None` returns everything
    pub fn filter_by_category(&self, category: Option<&str>) -> Vec<Expense> {
        match category {
            Some(category) => self.collect(|e| e.category == category),
            None => self.get_all(),
        }
    }

    /// Expenses dated within `start..=end`
    pub fn filter_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Expense> {
        self.collect(|e| e.date >= start && e.date <= end)
    }

    /// Newest first
    pub fn sort_by_date_desc(&self) -> Vec<Expense> {
        let mut sorted = self.get_all();
        sort(&mut sorted, SortOrder::DateDesc);
        sorted
    }

    /// Largest amount first
    pub fn sort_by_amount_desc(&self) -> Vec<Expense> {
        let mut sorted = self.get_all();
        sort(&mut sorted, SortOrder::AmountDesc);
        sorted
    }

    /// Apply every filter of `query`, then sort and limit
    pub fn query(&self, query: &ExpenseQuery) -> Vec<Expense> {
        let mut expenses = self.collect(|e| {
            query
                .keyword
                .as_deref()
                .map_or(true, |k| e.matches_keyword(k, &self.search_date_format))
                && query.category.as_deref().map_or(true, |c| e.category == c)
                && query.start_date.map_or(true, |start| e.date >= start)
                && query.end_date.map_or(true, |end| e.date <= end)
        });

        sort(&mut expenses, query.sort);

        if let Some(limit) = query.limit {
            expenses.truncate(limit);
        }
        expenses
    }

    /// Categories in the order they first appear
    pub fn distinct_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for expense in &self.expenses {
            if !categories.contains(&expense.category) {
                categories.push(expense.category.clone());
            }
        }
        categories
    }

    fn collect<F: Fn(&Expense) -> bool>(&self, keep: F) -> Vec<Expense> {
        self.expenses.iter().filter(|e| keep(*e)).cloned().collect()
    }
}

/// Stable sort, so equal keys keep their relative order
fn sort(expenses: &mut [Expense], order: SortOrder) {
    match order {
        SortOrder::Insertion => {}
        SortOrder::DateDesc => expenses.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::AmountDesc => expenses.sort_by(|a, b| b.amount.cmp(&a.amount)),
    }
}
