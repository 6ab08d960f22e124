//! Reports for the expense tracker
//!
//! Period reports (with a plain-text export form) and the dashboard summary.

pub mod period;
pub mod summary;

pub use period::{CategoryBreakdown, PeriodReport};
pub use summary::Summary;
