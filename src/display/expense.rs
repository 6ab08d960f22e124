//! Expense display formatting
//!
//! Tables for expense lists and a field-by-field details view.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::{Expense, Money};
use crate::services::statistics::total_of;
use crate::services::CategoryTotal;

use super::report::{format_percentage, truncate};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Expenses")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Format a list of expenses as a table with a total line
pub fn format_expense_table(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.value(),
        date: settings.format_date(e.date),
        description: truncate(&e.description, 30),
        category: e.category.clone(),
        amount: settings.format_money(e.amount),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());

    format!(
        "{}\n{} expense(s), total {}\n",
        table,
        expenses.len(),
        settings.format_money(total_of(expenses))
    )
}

/// Format every field of one expense
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", settings.format_date(expense.date)));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!("Amount:      {}\n", settings.format_money(expense.amount)));

    if !expense.notes.is_empty() {
        output.push_str(&format!("Notes:       {}\n", expense.notes));
    }

    output
}

/// Spending per category, plus suggested categories not used yet
pub fn format_category_totals(totals: &[CategoryTotal], settings: &Settings) -> String {
    let mut output = String::new();

    if totals.is_empty() {
        output.push_str("No expenses recorded yet.\n");
    } else {
        let grand_total: Money = totals.iter().map(|t| t.total).sum();
        let rows = totals.iter().map(|t| CategoryRow {
            category: t.category.clone(),
            count: t.count,
            total: settings.format_money(t.total),
            share: format_percentage(t.total.percentage_of(grand_total)),
        });

        let mut table = Table::new(rows);
        table.with(Style::psql());
        output.push_str(&table.to_string());
        output.push('\n');
    }

    let unused: Vec<&str> = settings
        .categories
        .iter()
        .filter(|c| !totals.iter().any(|t| &t.category == *c))
        .map(String::as_str)
        .collect();

    if !unused.is_empty() {
        output.push_str("\nOther suggested categories:\n");
        for category in unused {
            output.push_str(&format!("  {}\n", category));
        }
    }

    output
}
