//! Expense identifier
//!
//! Ids are small integers handed out by the manager in increasing order and
//! never reused. The newtype keeps them from being mixed up with counts or
//! indexes.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of an expense record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpenseId(u32);

impl ExpenseId {
    /// The id given to the first record of an empty store
    pub const FIRST: ExpenseId = ExpenseId(1);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }

    /// The id that follows this one, `None` past `u32::MAX`
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ExpenseId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl FromStr for ExpenseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the "#12" form used in listings
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next() {
        assert_eq!(ExpenseId::FIRST.next(), Some(ExpenseId::new(2)));
        assert_eq!(ExpenseId::new(u32::MAX).next(), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("12".parse::<ExpenseId>().unwrap(), ExpenseId::new(12));
        assert_eq!("#7".parse::<ExpenseId>().unwrap(), ExpenseId::new(7));
        assert_eq!(" 3 ".parse::<ExpenseId>().unwrap(), ExpenseId::new(3));
        assert!("abc".parse::<ExpenseId>().is_err());
        assert!("-1".parse::<ExpenseId>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ExpenseId::new(42).to_string(), "42");
    }
}
