//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the expense manager.

pub mod expense;
pub mod report;

pub use expense::{handle_expense_command, ExpenseCommands, SortKey};
pub use report::{handle_report_command, ReportArgs};

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::expense::RECORD_DATE_FORMAT;
use crate::models::Money;

/// Parse a date given as YYYY-MM-DD or in the configured display format
pub fn parse_date(s: &str, settings: &Settings) -> TrackerResult<NaiveDate> {
    let s = s.trim();
    [RECORD_DATE_FORMAT, settings.display_date_format.as_str()]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .ok_or_else(|| {
            TrackerError::InvalidInput(format!(
                "Invalid date: '{}'. Use YYYY-MM-DD or {}",
                s,
                example_format(&settings.display_date_format)
            ))
        })
}

/// Parse an amount such as "50000" or "12.50"
pub fn parse_amount(s: &str) -> TrackerResult<Money> {
    Money::parse(s).map_err(|e| {
        TrackerError::InvalidInput(format!(
            "Invalid amount: '{}'. Use a number like '50000' or '12.50' ({})",
            s, e
        ))
    })
}

/// Human-readable form of a strftime pattern, e.g. DD/MM/YYYY
fn example_format(format: &str) -> String {
    format
        .replace("%d", "DD")
        .replace("%m", "MM")
        .replace("%Y", "YYYY")
        .replace("%y", "YY")
}
