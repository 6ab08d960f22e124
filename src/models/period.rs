//! Reporting periods
//!
//! A period is always anchored on "today": the day itself, the seven days
//! ending today, or the calendar month containing today.

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Scope of an aggregation or report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

impl Period {
    /// All periods, in display order
    pub fn all() -> [Period; 3] {
        [Self::Daily, Self::Weekly, Self::Monthly]
    }

    /// Inclusive date range this period covers when looking back from `today`
    ///
    /// Monthly runs from the first of the month up to today, not to the end
    /// of the month.
    pub fn range_ending(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Self::Daily => (today, today),
            Self::Weekly => (today - Duration::days(6), today),
            Self::Monthly => (first_of_month(today), today),
        }
    }

    /// Number of days the period total is averaged over
    pub fn day_count(&self, today: NaiveDate) -> u32 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
            Self::Monthly => days_in_month(today),
        }
    }

    /// Lowercase name used in file names and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "today" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            other => Err(format!(
                "unknown period '{}' (expected daily, weekly or monthly)",
                other
            )),
        }
    }
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|next| (next - first_of_month(date)).num_days() as u32)
        .unwrap_or(31)
}
