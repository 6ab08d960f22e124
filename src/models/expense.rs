//! Expense model
//!
//! An expense is a single spending event. `ExpenseDraft` carries the
//! user-supplied fields; the manager turns a valid draft into an `Expense`
//! by giving it an id.

use chrono::NaiveDate;
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// Field separator of the record file
pub const FIELD_SEPARATOR: char = ',';

/// Date format used in the record file
pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of fields in a full record line
pub const RECORD_FIELDS: usize = 6;

/// Largest amount a single expense may carry (one trillion units)
pub const MAX_AMOUNT: Money = Money::from_units(1_000_000_000_000);

/// The user-editable fields of an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub description: String,
    pub category: String,
    pub amount: Money,
    /// `None` models a form submitted without a date
    pub date: Option<NaiveDate>,
    pub notes: String,
}

impl ExpenseDraft {
    /// Create a draft with empty notes
    pub fn new(
        description: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            category: category.into(),
            amount,
            date: Some(date),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Check the record invariants, returning the first violation
    pub fn validate(&self) -> Result<NaiveDate, ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }
        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > MAX_AMOUNT {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }
        let date = self.date.ok_or(ExpenseValidationError::MissingDate)?;

        for (field, value) in [
            ("description", &self.description),
            ("category", &self.category),
            ("notes", &self.notes),
        ] {
            if value.contains(|c: char| c == '\n' || c == '\r') {
                return Err(ExpenseValidationError::LineBreakInField(field));
            }
        }
        // Notes is the trailing field and may hold separators
        for (field, value) in [("description", &self.description), ("category", &self.category)] {
            if value.contains(FIELD_SEPARATOR) {
                return Err(ExpenseValidationError::SeparatorInField(field));
            }
        }

        Ok(date)
    }

    /// Validate and attach an id
    pub fn into_expense(self, id: ExpenseId) -> Result<Expense, ExpenseValidationError> {
        let date = self.validate()?;
        Ok(Expense {
            id,
            description: self.description,
            category: self.category,
            amount: self.amount,
            date,
            notes: self.notes,
        })
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub category: String,
    pub amount: Money,
    pub date: NaiveDate,
    /// Free text, may be empty
    pub notes: String,
}

impl Expense {
    /// Re-check the invariants of an already built record
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        self.to_draft().validate().map(|_| ())
    }

    /// The editable fields of this record
    pub fn to_draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            description: self.description.clone(),
            category: self.category.clone(),
            amount: self.amount,
            date: Some(self.date),
            notes: self.notes.clone(),
        }
    }

    /// Date rendered with a strftime pattern
    pub fn formatted_date(&self, format: &str) -> String {
        self.date.format(format).to_string()
    }

    /// Case-insensitive match against description, category, or date
    ///
    /// The date is compared both in ISO form and in `display_date_format`.
    pub fn matches_keyword(&self, keyword: &str, display_date_format: &str) -> bool {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        self.description.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
            || self
                .formatted_date(display_date_format)
                .to_lowercase()
                .contains(&needle)
            || self.formatted_date(RECORD_DATE_FORMAT).contains(&needle)
    }

    /// The six fields of a record line, in file order
    pub fn to_fields(&self) -> [String; RECORD_FIELDS] {
        [
            self.id.to_string(),
            self.description.clone(),
            self.category.clone(),
            self.amount.to_string(),
            self.formatted_date(RECORD_DATE_FORMAT),
            self.notes.clone(),
        ]
    }

    /// Build an expense from the fields of one record line
    ///
    /// Five fields means empty notes. Fields past the sixth belong to the
    /// notes, which were split on the separator when the line was read.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, RecordParseError> {
        if fields.len() < RECORD_FIELDS - 1 {
            return Err(RecordParseError::FieldCount(fields.len()));
        }
        let field = |i: usize| fields[i].as_ref();

        let id = field(0)
            .trim()
            .parse::<ExpenseId>()
            .map_err(|_| RecordParseError::InvalidId(field(0).to_string()))?;

        let amount = Money::parse(field(3))
            .map_err(|_| RecordParseError::InvalidAmount(field(3).to_string()))?;

        let date = NaiveDate::parse_from_str(field(4).trim(), RECORD_DATE_FORMAT)
            .map_err(|_| RecordParseError::InvalidDate(field(4).to_string()))?;

        let notes = if fields.len() > RECORD_FIELDS - 1 {
            fields[RECORD_FIELDS - 1..]
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<&str>>()
                .join(&FIELD_SEPARATOR.to_string())
        } else {
            String::new()
        };

        let expense = Self {
            id,
            description: field(1).to_string(),
            category: field(2).to_string(),
            amount,
            date,
            notes,
        };
        expense.validate().map_err(RecordParseError::Invalid)?;
        Ok(expense)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - {}: {} ({})",
            self.id,
            self.formatted_date(RECORD_DATE_FORMAT),
            self.category,
            self.amount,
            self.description
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    EmptyCategory,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    MissingDate,
    LineBreakInField(&'static str),
    SeparatorInField(&'static str),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description must not be empty"),
            Self::EmptyCategory => write!(f, "Category must be chosen"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than 0 (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount must not exceed {} (got {})", MAX_AMOUNT, amount)
            }
            Self::MissingDate => write!(f, "Date must not be empty"),
            Self::LineBreakInField(field) => write!(f, "The {} must fit on one line", field),
            Self::SeparatorInField(field) => {
                write!(f, "The {} must not contain '{}'", field, FIELD_SEPARATOR)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// Why a record line could not be turned into an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordParseError {
    FieldCount(usize),
    InvalidId(String),
    InvalidAmount(String),
    InvalidDate(String),
    Invalid(ExpenseValidationError),
}

impl fmt::Display for RecordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount(n) => write!(
                f,
                "expected {} or {} fields, found {}",
                RECORD_FIELDS - 1,
                RECORD_FIELDS,
                n
            ),
            Self::InvalidId(s) => write!(f, "invalid id '{}'", s),
            Self::InvalidAmount(s) => write!(f, "invalid amount '{}'", s),
            Self::InvalidDate(s) => write!(f, "invalid date '{}'", s),
            Self::Invalid(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RecordParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lunch() -> Expense {
        ExpenseDraft::new("Lunch", "Food", Money::from_units(50000), date(2024, 1, 10))
            .into_expense(ExpenseId::new(1))
            .unwrap()
    }

    #[test]
    fn test_draft_into_expense() {
        let expense = ExpenseDraft::new("Lunch", "Food", Money::from_units(15), date(2024, 1, 10))
            .with_notes("with team")
            .into_expense(ExpenseId::new(3))
            .unwrap();

        assert_eq!(expense.id, ExpenseId::new(3));
        assert_eq!(expense.description, "Lunch");
        assert_eq!(expense.notes, "with team");
    }

    #[test]
    fn test_validation_rules() {
        let base = ExpenseDraft::new("Lunch", "Food", Money::from_units(1), date(2024, 1, 10));

        let mut draft = base.clone();
        draft.description = "   ".into();
        assert_eq!(draft.validate(), Err(ExpenseValidationError::EmptyDescription));

        let mut draft = base.clone();
        draft.category = String::new();
        assert_eq!(draft.validate(), Err(ExpenseValidationError::EmptyCategory));

        let mut draft = base.clone();
        draft.amount = Money::zero();
        assert!(matches!(
            draft.validate(),
            Err(ExpenseValidationError::NonPositiveAmount(_))
        ));

        let mut draft = base.clone();
        draft.amount = Money::from_units(-5);
        assert!(draft.validate().is_err());

        let mut draft = base.clone();
        draft.amount = Money::from_cents(MAX_AMOUNT.cents() + 1);
        assert!(matches!(
            draft.validate(),
            Err(ExpenseValidationError::AmountTooLarge(_))
        ));
        draft.amount = MAX_AMOUNT;
        assert!(draft.validate().is_ok());

        let mut draft = base.clone();
        draft.date = None;
        assert_eq!(draft.validate(), Err(ExpenseValidationError::MissingDate));

        let mut draft = base.clone();
        draft.description = "Lunch, dinner".into();
        assert_eq!(
            draft.validate(),
            Err(ExpenseValidationError::SeparatorInField("description"))
        );

        let mut draft = base.clone();
        draft.notes = "line one\nline two".into();
        assert_eq!(
            draft.validate(),
            Err(ExpenseValidationError::LineBreakInField("notes"))
        );

        let draft = base.with_notes("paid cash, split later");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_to_fields() {
        let fields = lunch().to_fields();
        assert_eq!(fields, ["1", "Lunch", "Food", "50000.00", "2024-01-10", ""]);
    }

    #[test]
    fn test_from_fields_with_five_fields() {
        let expense = Expense::from_fields(&["1", "Lunch", "Food", "50000.0", "2024-01-10"]).unwrap();
        assert_eq!(expense, lunch());
    }

    #[test]
    fn test_from_fields_rejoins_overflow_into_notes() {
        let expense = Expense::from_fields(&[
            "4", "Taxi", "Transport", "12.5", "2024-02-01", "airport", " late night",
        ])
        .unwrap();
        assert_eq!(expense.notes, "airport, late night");
    }

    #[test]
    fn test_from_fields_errors() {
        assert_eq!(
            Expense::from_fields(&["1", "Lunch", "Food"]),
            Err(RecordParseError::FieldCount(3))
        );
        assert!(matches!(
            Expense::from_fields(&["x", "Lunch", "Food", "1", "2024-01-10", ""]),
            Err(RecordParseError::InvalidId(_))
        ));
        assert!(matches!(
            Expense::from_fields(&["1", "Lunch", "Food", "lots", "2024-01-10", ""]),
            Err(RecordParseError::InvalidAmount(_))
        ));
        assert!(matches!(
            Expense::from_fields(&["1", "Lunch", "Food", "1", "10/01/2024", ""]),
            Err(RecordParseError::InvalidDate(_))
        ));
        assert!(matches!(
            Expense::from_fields(&["1", "Big", "Food", "50000000000000000", "2024-01-10", ""]),
            Err(RecordParseError::Invalid(ExpenseValidationError::AmountTooLarge(_)))
        ));
        assert!(matches!(
            Expense::from_fields(&["1", "", "Food", "1", "2024-01-10", ""]),
            Err(RecordParseError::Invalid(ExpenseValidationError::EmptyDescription))
        ));
    }

    #[test]
    fn test_matches_keyword() {
        let expense = lunch();
        assert!(expense.matches_keyword("LUN", "%d/%m/%Y"));
        assert!(expense.matches_keyword("foo", "%d/%m/%Y"));
        assert!(expense.matches_keyword("10/01", "%d/%m/%Y"));
        assert!(expense.matches_keyword("2024-01", "%d/%m/%Y"));
        assert!(expense.matches_keyword("  ", "%d/%m/%Y"));
        assert!(!expense.matches_keyword("transport", "%d/%m/%Y"));
    }

    #[test]
    fn test_matches_keyword_in_named_month() {
        let expense = lunch();
        assert!(expense.matches_keyword("jan", "%d %b %Y"));
        assert!(expense.matches_keyword("JAN 2024", "%d %b %Y"));
        assert!(!expense.matches_keyword("feb", "%d %b %Y"));
    }

    #[test]
    fn test_display() {
        assert_eq!(lunch().to_string(), "[1] 2024-01-10 - Food: 50000.00 (Lunch)");
    }
}
