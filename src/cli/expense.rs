//! Expense CLI commands
//!
//! Implements recording, listing, editing and deleting expenses, plus the
//! summary and category views.

use clap::{Subcommand, ValueEnum};
use tracing::warn;

use crate::config::Settings;
use crate::display::{format_category_totals, format_expense_details, format_expense_table};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{period, ExpenseDraft, ExpenseId};
use crate::reports::Summary;
use crate::services::{ExpenseManager, ExpenseQuery, SortOrder};
use crate::storage::ExpenseStore;

use super::{parse_amount, parse_date};

/// Sort keys accepted by `list --sort`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Newest first
    Date,
    /// Largest first
    Amount,
}

impl From<SortKey> for SortOrder {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Date => SortOrder::DateDesc,
            SortKey::Amount => SortOrder::AmountDesc,
        }
    }
}

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        description: String,
        /// Category (see `categories` for suggestions)
        category: String,
        /// Amount, e.g. "50000" or "12.50"
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Date (YYYY-MM-DD or DD/MM/YYYY), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List expenses
    #[command(alias = "ls")]
    List {
        /// Keyword matched against description, category and date
        #[arg(short, long)]
        search: Option<String>,
        /// Only this category (exact match)
        #[arg(short, long)]
        category: Option<String>,
        /// Start date, inclusive
        #[arg(long)]
        from: Option<String>,
        /// End date, inclusive
        #[arg(long)]
        to: Option<String>,
        /// Sort order (default: order added)
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
        /// Maximum number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show expense details
    Show {
        /// Expense ID
        id: ExpenseId,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        id: ExpenseId,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New notes (pass "" to clear)
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: ExpenseId,
    },
    /// Show totals for today, this week and this month
    Summary,
    /// Show spending per category and the suggested categories
    Categories,
}

/// Handle an expense command
pub fn handle_expense_command<S: ExpenseStore>(
    manager: &mut ExpenseManager<S>,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> TrackerResult<()> {
    match cmd {
        ExpenseCommands::Add {
            description,
            category,
            amount,
            date,
            notes,
        } => {
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(date) => parse_date(&date, settings)?,
                None => period::today(),
            };
            warn_if_unknown_category(settings, &category);

            let draft = ExpenseDraft::new(description, category, amount, date)
                .with_notes(notes.unwrap_or_default());
            let expense = manager.add(draft)?;

            println!("Recorded expense:");
            print!("{}", indent(&format_expense_details(&expense, settings)));
        }

        ExpenseCommands::List {
            search,
            category,
            from,
            to,
            sort,
            limit,
        } => {
            let mut query = ExpenseQuery::new();
            if let Some(keyword) = search {
                query = query.keyword(keyword);
            }
            if let Some(category) = category {
                query = query.category(category);
            }
            if let Some(from) = from {
                query = query.since(parse_date(&from, settings)?);
            }
            if let Some(to) = to {
                query = query.until(parse_date(&to, settings)?);
            }
            if let Some(sort) = sort {
                query = query.sort(sort.into());
            }
            if let Some(limit) = limit {
                query = query.limit(limit);
            }

            let expenses = manager.query(&query);
            print!("{}", format_expense_table(&expenses, settings));
        }

        ExpenseCommands::Show { id } => {
            let expense = manager
                .get(id)
                .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))?;
            print!("{}", format_expense_details(expense, settings));
        }

        ExpenseCommands::Edit {
            id,
            description,
            category,
            amount,
            date,
            notes,
        } => {
            let mut draft = manager
                .get(id)
                .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))?
                .to_draft();

            let mut changed = false;
            if let Some(description) = description {
                draft.description = description;
                changed = true;
            }
            if let Some(category) = category {
                warn_if_unknown_category(settings, &category);
                draft.category = category;
                changed = true;
            }
            if let Some(amount) = amount {
                draft.amount = parse_amount(&amount)?;
                changed = true;
            }
            if let Some(date) = date {
                draft.date = Some(parse_date(&date, settings)?);
                changed = true;
            }
            if let Some(notes) = notes {
                draft.notes = notes;
                changed = true;
            }

            if !changed {
                println!("No changes specified.");
                return Ok(());
            }

            let expense = manager.update(id, draft)?;
            println!("Updated expense:");
            print!("{}", indent(&format_expense_details(&expense, settings)));
        }

        ExpenseCommands::Delete { id } => {
            let removed = manager.delete(id)?;
            println!(
                "Deleted expense {}: {} ({})",
                removed.id,
                removed.description,
                settings.format_money(removed.amount)
            );
        }

        ExpenseCommands::Summary => {
            let summary = Summary::compute(manager, period::today());
            print!("{}", summary.format_terminal(settings));
        }

        ExpenseCommands::Categories => {
            print!(
                "{}",
                format_category_totals(&manager.category_totals(), settings)
            );
        }
    }

    Ok(())
}

fn warn_if_unknown_category(settings: &Settings, category: &str) {
    if !category.trim().is_empty() && !settings.is_known_category(category) {
        warn!(category = %category, "category is not one of the suggested categories");
    }
}

fn indent(text: &str) -> String {
    text.lines().map(|line| format!("  {}\n", line)).collect()
}
