//! Dashboard summary: headline totals and the latest expenses

use chrono::NaiveDate;

use crate::config::Settings;
use crate::display::report::rule;
use crate::models::{Expense, Money};
use crate::services::{ExpenseManager, ExpenseQuery, SortOrder};
use crate::storage::ExpenseStore;

/// How many recent expenses the summary lists
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct Summary {
    pub total_today: Money,
    pub total_this_week: Money,
    pub total_this_month: Money,
    pub transaction_count: usize,
    pub average_per_day: Money,
    pub most_expensive_category: String,
    /// Newest first
    pub recent: Vec<Expense>,
}

impl Summary {
    pub fn compute<S: ExpenseStore>(manager: &ExpenseManager<S>, today: NaiveDate) -> Self {
        Self {
            total_today: manager.total_today_on(today),
            total_this_week: manager.total_this_week_on(today),
            total_this_month: manager.total_this_month_on(today),
            transaction_count: manager.transaction_count(),
            average_per_day: manager.average_per_day_on(today),
            most_expensive_category: manager.most_expensive_category(),
            recent: manager.query(
                &ExpenseQuery::new()
                    .sort(SortOrder::DateDesc)
                    .limit(RECENT_LIMIT),
            ),
        }
    }

    pub fn format_terminal(&self, settings: &Settings) -> String {
        let money = |m: Money| settings.format_money(m);
        let mut output = String::new();

        output.push_str("Expense Summary\n");
        output.push_str(&rule('=', 40));
        output.push('\n');
        output.push_str(&format!("Today:            {}\n", money(self.total_today)));
        output.push_str(&format!("This week:        {}\n", money(self.total_this_week)));
        output.push_str(&format!("This month:       {}\n", money(self.total_this_month)));
        output.push_str(&format!("Average per day:  {}\n", money(self.average_per_day)));
        output.push_str(&format!("Transactions:     {}\n", self.transaction_count));
        output.push_str(&format!("Top category:     {}\n", self.most_expensive_category));

        output.push_str("\nRecent expenses:\n");
        if self.recent.is_empty() {
            output.push_str("  (none yet)\n");
        }
        for expense in &self.recent {
            output.push_str(&format!(
                "  {}  {:<20} {:>18}\n",
                settings.format_date(expense.date),
                crate::display::report::truncate(&expense.description, 20),
                money(expense.amount)
            ));
        }

        output
    }
}
