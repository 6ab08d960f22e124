//! User settings for the expense tracker
//!
//! Display preferences and the category picklist. None of these constrain
//! what the manager accepts.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;

/// User settings, stored as `config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown in front of amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for display and keyword search (strftime format)
    #[serde(default = "default_display_date_format")]
    pub display_date_format: String,

    /// Suggested categories offered when recording an expense
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Width of the rules in exported text reports
    #[serde(default = "default_report_width")]
    pub report_width: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "Rp".to_string()
}

fn default_display_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_categories() -> Vec<String> {
    [
        "Food & Drinks",
        "Transport & Fuel",
        "Education & Books",
        "Entertainment & Hobbies",
        "Health",
        "Fashion & Clothing",
        "Technology & Gadgets",
        "Household Needs",
        "Other",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_report_width() -> usize {
    60
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            display_date_format: default_display_date_format(),
            categories: default_categories(),
            report_width: default_report_width(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| TrackerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TrackerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        std::fs::create_dir_all(paths.base_dir())
            .map_err(|e| TrackerError::Io(format!("Failed to create base directory: {}", e)))?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TrackerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TrackerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Whether `category` is one of the suggested categories
    pub fn is_known_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Amount formatted with the configured currency symbol
    pub fn format_money(&self, amount: crate::models::Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Date formatted with the configured display format
    pub fn format_date(&self, date: chrono::NaiveDate) -> String {
        date.format(&self.display_date_format).to_string()
    }
}
