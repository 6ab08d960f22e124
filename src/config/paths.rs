//! Path management for the expense tracker
//!
//! ## Path Resolution Order
//!
//! 1. `--dir` on the command line
//! 2. `EXPENSE_TRACKER_DIR` environment variable (if set)
//! 3. The current working directory
//!
//! The record file always sits at `data/expenses.csv` below the base directory.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the base directory
pub const DIR_ENV_VAR: &str = "EXPENSE_TRACKER_DIR";

/// Manages all paths used by the expense tracker
#[derive(Debug, Clone)]
pub struct TrackerPaths {
    base_dir: PathBuf,
}

impl TrackerPaths {
    /// Resolve the base directory from the environment, falling back to the
    /// current working directory
    pub fn from_env() -> Self {
        let base_dir = std::env::var_os(DIR_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { base_dir }
    }

    /// Create TrackerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding the record file
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// The record file
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.csv")
    }

    /// Where exported reports go when no file name is given
    pub fn reports_dir(&self) -> PathBuf {
        self.base_dir.join("reports")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }
}
