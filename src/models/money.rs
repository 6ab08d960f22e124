//! Money type for representing expense amounts
//!
//! Internally stores amounts in hundredths of the currency unit (i64) so sums
//! and category totals are exact. The unit itself is not fixed; the display
//! symbol comes from settings.
//!
//! Arithmetic saturates at the bounds of `i64` instead of overflowing.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// A monetary amount stored as hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from hundredths
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in hundredths
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// The fractional hundredths (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse an amount written as a plain decimal
    ///
    /// Accepts "50000", "50000.5", "50000.50" and "-12.30" exactly. Anything
    /// else that is still a finite number (e.g. "5.0E7", or more than two
    /// fractional digits) is rounded to the nearest hundredth.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        if let Some(money) = Self::parse_plain(s) {
            return Ok(money);
        }

        let value: f64 = s
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;
        if !value.is_finite() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }
        let cents = (value * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            return Err(MoneyParseError::OutOfRange(s.to_string()));
        }
        Ok(Self(cents as i64))
    }

    /// Exact parse of `[-]digits[.d[d]]`, `None` if the text has any other shape
    fn parse_plain(s: &str) -> Option<Self> {
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (whole, frac) = match body.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (body, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let units: i64 = whole.parse().ok()?;
        let cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().ok()? * 10,
            _ => frac.parse().ok()?,
        };

        let total = units.checked_mul(100)?.checked_add(cents)?;
        Some(Self(if negative { -total } else { total }))
    }

    /// Divide evenly across `days`, rounding to the nearest hundredth
    pub fn per_day(&self, days: u32) -> Self {
        if days == 0 {
            return Self::zero();
        }
        Self((self.0 as f64 / f64::from(days)).round() as i64)
    }

    /// This amount as a percentage of `total` (0 when total is zero)
    pub fn percentage_of(&self, total: Money) -> f64 {
        if total.is_zero() {
            0.0
        } else {
            self.0 as f64 / total.0 as f64 * 100.0
        }
    }

    /// Format with a currency symbol and thousands grouping, e.g. "Rp 50,000.00"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let grouped = group_thousands(self.units().unsigned_abs());
        if symbol.is_empty() {
            format!("{}{}.{:02}", sign, grouped, self.cents_part())
        } else {
            format!("{}{} {}.{:02}", sign, symbol, grouped, self.cents_part())
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Plain decimal form, also used in the record file
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Amount is empty"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::zero().to_string(), "0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_units(50000).to_string(), "50000.00");
    }

    #[test]
    fn test_parse_plain() {
        assert_eq!(Money::parse("50000").unwrap(), Money::from_units(50000));
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse(" 0.05 ").unwrap().cents(), 5);
        assert_eq!(Money::parse("-12.30").unwrap().cents(), -1230);
        assert_eq!(Money::parse("7.").unwrap().cents(), 700);
    }

    #[test]
    fn test_parse_rounds_other_numeric_forms() {
        assert_eq!(Money::parse("5.0E7").unwrap(), Money::from_units(50_000_000));
        assert_eq!(Money::parse("1.005").unwrap().cents(), 100);
        assert_eq!(Money::parse("2.499").unwrap().cents(), 250);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), Err(MoneyParseError::Empty));
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("12,50").is_err());
        assert!(Money::parse("NaN").is_err());
        assert!(Money::parse("inf").is_err());
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(
            Money::from_units(1_250_000).format_with_symbol("Rp"),
            "Rp 1,250,000.00"
        );
        assert_eq!(Money::from_cents(99).format_with_symbol("$"), "$ 0.99");
        assert_eq!(Money::from_units(100).format_with_symbol(""), "100.00");
    }

    #[test]
    fn test_per_day_and_percentage() {
        assert_eq!(Money::from_units(310).per_day(31), Money::from_units(10));
        assert_eq!(Money::from_cents(100).per_day(3).cents(), 33);
        assert_eq!(Money::from_units(5).per_day(0), Money::zero());

        let part = Money::from_units(25);
        assert!((part.percentage_of(Money::from_units(100)) - 25.0).abs() < f64::EPSILON);
        assert_eq!(part.percentage_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let by_ref: Money = amounts.iter().sum();
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
        assert_eq!(by_ref, total);
    }

    #[test]
    fn test_sum_saturates() {
        let big = Money::from_units(50_000_000_000_000_000);
        let total: Money = [big, big].iter().sum();
        assert_eq!(total, Money::from_cents(i64::MAX));

        let mut acc = big;
        acc += big;
        assert_eq!(acc, Money::from_cents(i64::MAX));
        assert_eq!(Money::from_cents(i64::MIN) - big, Money::from_cents(i64::MIN));
    }
}
