//! Flat-file expense store
//!
//! One header line followed by one record per line:
//!
//! ```text
//! id,description,category,amount,date,notes
//! 1,Lunch,Food,50000.00,2024-01-10,
//! ```
//!
//! Fields are never quoted or escaped. Notes is the last field, so any
//! separators past the fifth one are read back as part of the notes.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tracing::{debug, error, info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::expense::FIELD_SEPARATOR;
use crate::models::Expense;

use super::file_io::write_atomic;
use super::{ExpenseStore, LoadReport, SkipReason, SkippedLine};

/// Header line of the record file
pub const HEADER: [&str; 6] = ["id", "description", "category", "amount", "date", "notes"];

/// Expense store backed by a delimited text file
#[derive(Debug, Clone)]
pub struct CsvExpenseStore {
    path: PathBuf,
}

impl CsvExpenseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, expenses: &[Expense]) -> TrackerResult<()> {
        write_atomic(&self.path, |out| {
            let mut writer = WriterBuilder::new()
                .delimiter(FIELD_SEPARATOR as u8)
                .quote_style(QuoteStyle::Never)
                .terminator(Terminator::Any(b'\n'))
                .from_writer(out);

            writer.write_record(HEADER)?;
            for expense in expenses {
                writer.write_record(expense.to_fields())?;
            }
            writer
                .flush()
                .map_err(|e| TrackerError::Storage(format!("Failed to write records: {}", e)))
        })
    }

    fn read_all(&self, file: File, report: &mut LoadReport) {
        let mut reader = ReaderBuilder::new()
            .delimiter(FIELD_SEPARATOR as u8)
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .from_reader(BufReader::new(file));

        let mut seen = HashSet::new();

        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(0);
                    let reason = SkipReason::Unreadable(e.to_string());
                    report.skipped.push(skipped(line, String::new(), reason));
                    continue;
                }
            };

            if is_blank(&record) {
                continue;
            }

            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let fields: Vec<&str> = record.iter().collect();

            match Expense::from_fields(&fields) {
                Ok(expense) if !seen.insert(expense.id) => {
                    let reason = SkipReason::DuplicateId(expense.id);
                    report.skipped.push(skipped(line, join(&record), reason));
                }
                Ok(expense) => report.expenses.push(expense),
                Err(e) => {
                    let reason = SkipReason::Malformed(e);
                    report.skipped.push(skipped(line, join(&record), reason));
                }
            }
        }
    }
}

impl ExpenseStore for CsvExpenseStore {
    fn load(&self) -> LoadReport {
        let mut report = LoadReport::default();

        if !self.path.exists() {
            match self.write_all(&[]) {
                Ok(()) => {
                    info!(path = %self.path.display(), "created empty expense file");
                    report.created = true;
                }
                Err(e) => {
                    error!(path = %self.path.display(), error = %e, "cannot create expense file");
                }
            }
            return report;
        }

        match File::open(&self.path) {
            Ok(file) => self.read_all(file, &mut report),
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "cannot read expense file");
                return report;
            }
        }

        for line in &report.skipped {
            warn!(
                path = %self.path.display(),
                line = line.line,
                content = %line.content,
                reason = %line.reason,
                "skipping expense line"
            );
        }
        debug!(
            path = %self.path.display(),
            loaded = report.expenses.len(),
            skipped = report.skipped.len(),
            "loaded expenses"
        );

        report
    }

    fn save(&mut self, expenses: &[Expense]) -> TrackerResult<()> {
        self.write_all(expenses)?;
        debug!(path = %self.path.display(), count = expenses.len(), "rewrote expense file");
        Ok(())
    }
}

fn skipped(line: u64, content: String, reason: SkipReason) -> SkippedLine {
    SkippedLine {
        line,
        content,
        reason,
    }
}

/// A line holding nothing but whitespace
fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(|f| f.trim().is_empty())
}

fn join(record: &StringRecord) -> String {
    record
        .iter()
        .collect::<Vec<_>>()
        .join(&FIELD_SEPARATOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseDraft, ExpenseId, Money, RecordParseError};
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, CsvExpenseStore) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("expenses.csv");
        (temp_dir, CsvExpenseStore::new(path))
    }

    fn expense(
        id: u32,
        description: &str,
        category: &str,
        units: i64,
        day: u32,
        notes: &str,
    ) -> Expense {
        ExpenseDraft::new(
            description,
            category,
            Money::from_units(units),
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        )
        .with_notes(notes)
        .into_expense(ExpenseId::new(id))
        .unwrap()
    }

    #[test]
    fn test_load_missing_creates_file_with_header() {
        let (_temp_dir, store) = create_test_store();

        let report = store.load();

        assert!(report.created);
        assert!(report.expenses.is_empty());
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "id,description,category,amount,date,notes\n"
        );
    }

    #[test]
    fn test_save_writes_header_and_lines_in_order() {
        let (_temp_dir, mut store) = create_test_store();

        store
            .save(&[
                expense(2, "Bus", "Transport", 15000, 10, ""),
                expense(1, "Lunch", "Food", 50000, 10, "canteen"),
            ])
            .unwrap();

        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "id,description,category,amount,date,notes\n\
             2,Bus,Transport,15000.00,2024-01-10,\n\
             1,Lunch,Food,50000.00,2024-01-10,canteen\n"
        );
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let (_temp_dir, mut store) = create_test_store();
        let expenses = vec![
            expense(1, "Lunch", "Food", 50000, 10, ""),
            expense(2, "Bus", "Transport", 15000, 10, "route 7"),
            expense(5, "Dinner", "Food", 70000, 11, "birthday, with family"),
        ];

        store.save(&expenses).unwrap();
        let report = CsvExpenseStore::new(store.path()).load();

        assert!(!report.created);
        assert!(!report.has_skipped());
        assert_eq!(report.expenses, expenses);
    }

    #[test]
    fn test_save_is_full_overwrite() {
        let (_temp_dir, mut store) = create_test_store();
        store
            .save(&[
                expense(1, "Lunch", "Food", 1, 1, ""),
                expense(2, "Bus", "Transport", 1, 1, ""),
            ])
            .unwrap();
        store.save(&[expense(2, "Bus", "Transport", 1, 1, "")]).unwrap();

        let report = store.load();
        assert_eq!(report.expenses.len(), 1);
        assert_eq!(report.expenses[0].id, ExpenseId::new(2));
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let (_temp_dir, store) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            "id,description,category,amount,date,notes\n\
             1,Lunch,Food,50000.0,2024-01-10,\n\
             2,Bus,Transport,lots,2024-01-10,\n\
             3,Dinner,Food,70000.0,2024-01-11,late\n",
        )
        .unwrap();

        let report = store.load();

        assert_eq!(report.expenses.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 3);
        assert!(matches!(
            report.skipped[0].reason,
            SkipReason::Malformed(RecordParseError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_tolerant_parsing() {
        let (_temp_dir, store) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            "id,description,category,amount,date,notes\r\n\
             1,Lunch,Food,50000.0,2024-01-10\r\n\
             \r\n\
             \x20\x20\x20\n\
             2,Bus,Transport\n\
             3,Dinner,Food,70000,not-a-date,\n\
             4,Snack,Food,5.0E3,2024-01-12,\n",
        )
        .unwrap();

        let report = store.load();

        let ids: Vec<u32> = report.expenses.iter().map(|e| e.id.value()).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(report.expenses[0].notes, "");
        assert_eq!(report.expenses[1].amount, Money::from_units(5000));
        assert_eq!(report.skipped.len(), 2);
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let (_temp_dir, store) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            "id,description,category,amount,date,notes\n\
             1,Lunch,Food,1,2024-01-10,\n\
             1,Copy,Food,2,2024-01-10,\n",
        )
        .unwrap();

        let report = store.load();

        assert_eq!(report.expenses.len(), 1);
        assert_eq!(report.expenses[0].description, "Lunch");
        assert_eq!(report.skipped[0].reason, SkipReason::DuplicateId(ExpenseId::new(1)));
    }

    #[test]
    fn test_unwritable_path_fails_save() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("data");
        fs::write(&blocker, "not a directory").unwrap();
        let mut store = CsvExpenseStore::new(blocker.join("expenses.csv"));

        let result = store.save(&[expense(1, "Lunch", "Food", 1, 1, "")]);
        assert!(result.unwrap_err().is_storage());

        // Loading degrades to an empty set instead of failing
        let report = store.load();
        assert!(report.expenses.is_empty());
        assert!(!report.created);
    }
}
