//! Report CLI command
//!
//! Shows a period report and optionally exports its text form.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;

use crate::config::{Settings, TrackerPaths};
use crate::error::TrackerResult;
use crate::models::Period;
use crate::reports::PeriodReport;
use crate::services::ExpenseManager;
use crate::storage::{export_text, ExpenseStore};

/// Arguments of the `report` command
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Period to report on (daily, weekly, monthly)
    #[arg(short, long, default_value = "monthly")]
    pub period: Period,

    /// Export the report as text; without FILE it goes to the reports directory
    #[arg(short, long, value_name = "FILE", num_args = 0..=1, default_missing_value = "")]
    pub export: Option<String>,
}

/// Handle the report command
pub fn handle_report_command<S: ExpenseStore>(
    manager: &ExpenseManager<S>,
    settings: &Settings,
    paths: &TrackerPaths,
    args: ReportArgs,
    today: NaiveDate,
) -> TrackerResult<()> {
    let report = PeriodReport::generate(manager, args.period, today);
    print!("{}", report.format_terminal(settings));

    if let Some(target) = args.export {
        let path = export_path(&report, paths, &target, today);
        export_text(&path, &report.format_text(settings))?;
        println!("\nReport exported to: {}", path.display());
    }

    Ok(())
}

/// Resolve where the exported report goes
fn export_path(
    report: &PeriodReport,
    paths: &TrackerPaths,
    target: &str,
    today: NaiveDate,
) -> PathBuf {
    if target.trim().is_empty() {
        paths.reports_dir().join(report.default_file_name(today))
    } else {
        PathBuf::from(target)
    }
}
