//! Period Report
//!
//! Spending for a daily, weekly or monthly window ending today, with a
//! per-category breakdown and a plain-text rendering for export.

use chrono::NaiveDate;

use crate::config::Settings;
use crate::display::report::{centered, format_bar, format_percentage, rule, truncate};
use crate::models::{Expense, Money, Period};
use crate::services::statistics::{category_totals_of, total_of};
use crate::services::{ExpenseManager, ExpenseQuery, SortOrder, NO_CATEGORY};
use crate::storage::ExpenseStore;

/// One category's share of the period
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub category: String,
    pub total: Money,
    pub count: usize,
    /// Share of the period total, 0-100
    pub percentage: f64,
}

/// Spending report for one period
#[derive(Debug, Clone)]
pub struct PeriodReport {
    pub period: Period,
    /// Inclusive start of the window
    pub start_date: NaiveDate,
    /// Inclusive end of the window (today)
    pub end_date: NaiveDate,
    /// Expenses in the window, newest first
    pub expenses: Vec<Expense>,
    pub total: Money,
    /// Largest category, or `N/A` when the window is empty
    pub top_category: String,
    /// Total divided by the number of days in the period
    pub average_per_day: Money,
    /// Largest category first
    pub categories: Vec<CategoryBreakdown>,
}

impl PeriodReport {
    /// Build the report for `period` looking back from `today`
    pub fn generate<S: ExpenseStore>(
        manager: &ExpenseManager<S>,
        period: Period,
        today: NaiveDate,
    ) -> Self {
        let (start_date, end_date) = period.range_ending(today);
        let expenses = manager.query(
            &ExpenseQuery::new()
                .date_range(start_date, end_date)
                .sort(SortOrder::DateDesc),
        );

        let total = total_of(&expenses);

        let mut categories: Vec<CategoryBreakdown> = category_totals_of(&expenses)
            .into_iter()
            .map(|t| CategoryBreakdown {
                percentage: t.total.percentage_of(total),
                category: t.category,
                total: t.total,
                count: t.count,
            })
            .collect();
        // Stable, so ties keep first-seen order
        categories.sort_by(|a, b| b.total.cmp(&a.total));

        let top_category = categories
            .first()
            .map(|c| c.category.clone())
            .unwrap_or_else(|| NO_CATEGORY.to_string());

        Self {
            period,
            start_date,
            end_date,
            average_per_day: total.per_day(period.day_count(today)),
            expenses,
            total,
            top_category,
            categories,
        }
    }

    pub fn transaction_count(&self) -> usize {
        self.expenses.len()
    }

    /// Suggested export file name, e.g. `report_monthly_2024-01-11.txt`
    pub fn default_file_name(&self, today: NaiveDate) -> String {
        format!("report_{}_{}.txt", self.period, today.format("%Y-%m-%d"))
    }

    /// Plain-text export of the report
    pub fn format_text(&self, settings: &Settings) -> String {
        let width = settings.report_width;
        let title = format!("EXPENSE REPORT - {}", self.period.as_str().to_uppercase());

        let mut output = String::new();
        output.push_str(&rule('=', width));
        output.push('\n');
        output.push_str(&centered(&title, width));
        output.push('\n');
        output.push_str(&rule('=', width));
        output.push_str("\n\n");

        output.push_str(&format!("Total: {}\n", settings.format_money(self.total)));
        output.push_str(&format!("Transactions: {}\n\n", self.transaction_count()));

        output.push_str("Details:\n");
        output.push_str(&rule('-', width));
        output.push('\n');
        for expense in &self.expenses {
            output.push_str(&format!(
                "{} | {} | {} | {}\n",
                settings.format_date(expense.date),
                expense.category,
                expense.description,
                settings.format_money(expense.amount)
            ));
        }

        output
    }

    /// Report layout for the terminal, with the category breakdown
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} report: {} to {}\n",
            capitalize(self.period.as_str()),
            settings.format_date(self.start_date),
            settings.format_date(self.end_date)
        ));
        output.push_str(&rule('=', 64));
        output.push('\n');
        output.push_str(&format!("Total:           {}\n", settings.format_money(self.total)));
        output.push_str(&format!("Transactions:    {}\n", self.transaction_count()));
        output.push_str(&format!(
            "Average per day: {}\n",
            settings.format_money(self.average_per_day)
        ));
        output.push_str(&format!("Top category:    {}\n", self.top_category));

        if self.categories.is_empty() {
            output.push_str("\nNo expenses in this period.\n");
            return output;
        }

        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>18} {:>6} {:>5}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&rule('-', 64));
        output.push('\n');

        let max = self.categories[0].total.cents() as f64;
        for row in &self.categories {
            output.push_str(&format!(
                "{:<24} {:>18} {:>6} {:>5} {}\n",
                truncate(&row.category, 24),
                settings.format_money(row.total),
                row.count,
                format_percentage(row.percentage),
                format_bar(row.total.cents() as f64, max, 6)
            ));
        }

        output
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
