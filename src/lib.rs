//! Expense Tracker - personal spending log backed by a flat record file
//!
//! Records individual expenses (description, category, amount, date, notes),
//! keeps them in `data/expenses.csv`, and answers the questions a personal
//! spending log is for: what did I spend today, this week, this month, and
//! where did it go.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Base directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Expense records, amounts, ids and reporting periods
//! - `storage`: The record file codec and the `ExpenseStore` seam
//! - `services`: The expense manager (CRUD, queries, aggregations)
//! - `reports`: Period reports and the dashboard summary
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `expense` binary
//!
//! # Example
//!
//! ```rust,no_run
//! use expense_tracker::config::TrackerPaths;
//! use expense_tracker::models::{ExpenseDraft, Money};
//! use expense_tracker::services::ExpenseManager;
//! use expense_tracker::storage::CsvExpenseStore;
//!
//! let paths = TrackerPaths::from_env();
//! let mut manager = ExpenseManager::open(CsvExpenseStore::new(paths.expenses_file()));
//!
//! let today = chrono::Local::now().date_naive();
//! manager.add(ExpenseDraft::new("Lunch", "Food & Drinks", Money::from_units(50000), today))?;
//! println!("Spent today: {}", manager.total_today());
//! # Ok::<(), expense_tracker::TrackerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
