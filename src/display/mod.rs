//! Display formatting for terminal output
//!
//! Tables and detail views for expenses, and the text layout helpers the
//! reports share.

pub mod expense;
pub mod report;

pub use expense::{format_category_totals, format_expense_details, format_expense_table};
