//! Storage layer for the expense tracker
//!
//! The manager talks to persistence only through [`ExpenseStore`]: load the
//! whole record set once, rewrite it in full after every change.

pub mod expenses;
pub mod file_io;
pub mod memory;

pub use expenses::CsvExpenseStore;
pub use file_io::{export_text, write_atomic};
pub use memory::MemoryStore;

use std::fmt;

use crate::error::TrackerResult;
use crate::models::{Expense, ExpenseId, RecordParseError};

/// A backing store for the full set of expense records
pub trait ExpenseStore {
    /// Read every record
    ///
    /// Never fails: unreadable lines are reported in the result, and a
    /// store that cannot be read at all yields an empty set.
    fn load(&self) -> LoadReport;

    /// Replace the stored set with `expenses`, in the order given
    fn save(&mut self, expenses: &[Expense]) -> TrackerResult<()>;
}

/// Outcome of [`ExpenseStore::load`]
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Records that parsed, in stored order
    pub expenses: Vec<Expense>,
    /// Lines that were skipped
    pub skipped: Vec<SkippedLine>,
    /// Whether the store had to be created empty
    pub created: bool,
}

impl LoadReport {
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// A stored line that could not become a record
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    /// 1-based line number in the file
    pub line: u64,
    pub content: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    Malformed(RecordParseError),
    DuplicateId(ExpenseId),
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(e) => write!(f, "{}", e),
            Self::DuplicateId(id) => write!(f, "duplicate id {}", id),
            Self::Unreadable(e) => write!(f, "unreadable line: {}", e),
        }
    }
}

impl fmt::Display for SkippedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}
