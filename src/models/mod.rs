//! Core data models for the expense tracker
//!
//! The domain is small: an expense record, the amount type it carries, its
//! id, and the reporting periods aggregations are scoped to.

pub mod expense;
pub mod ids;
pub mod money;
pub mod period;

pub use expense::{Expense, ExpenseDraft, ExpenseValidationError, RecordParseError};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
pub use period::Period;
