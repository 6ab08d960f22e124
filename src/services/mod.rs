//! Service layer for the expense tracker
//!
//! The manager owns the record set on top of a storage backend: validation,
//! id assignment, queries, and spending aggregations.

pub mod expense;
pub mod statistics;

pub use expense::{ExpenseManager, ExpenseQuery, SortOrder};
pub use statistics::{CategoryTotal, NO_CATEGORY};
