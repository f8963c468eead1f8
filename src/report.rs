use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::domain::DateRange;
use crate::stats::ClassificationResult;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Final numbers for one user and period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    username: String,
    start: NaiveDate,
    end: NaiveDate,
    created_count: usize,
    edited_count: usize,
}

impl Report {
    pub fn new(username: &str, range: &DateRange, result: &ClassificationResult) -> Self {
        Self {
            username: username.to_string(),
            start: range.start_date(),
            end: range.end_date(),
            created_count: result.created_count(),
            edited_count: result.edited_count(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "User: {}\nPeriod: {} to {}\nEdited: {}\nCreated: {}\n",
            self.username,
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT),
            self.edited_count,
            self.created_count
        )
    }

    pub fn file_name(&self) -> String {
        format!(
            "wikidata_stats-{}-{}_to_{}.txt",
            self.username,
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }

    /// Write the rendered report into `dir`, replacing any earlier copy.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        fs::write(&path, self.render())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(action = "write", component = "report", path = ?path, "Report written");
        Ok(path)
    }
}

/// How a saved report is named to the user: the bare file name for the working directory.
fn saved_location(dir: &Path, path: &Path) -> String {
    if dir == Path::new(".") {
        if let Some(name) = path.file_name() {
            return name.to_string_lossy().into_owned();
        }
    }
    path.display().to_string()
}

/// Print the report and save it. A failed save is reported but does not fail the run.
pub fn print_and_save(report: &Report, dir: &Path) {
    println!("\n--- Wikidata Contribution Report ---");
    println!("{}", report.render());

    match report.write_to(dir) {
        Ok(path) => println!("Report successfully saved to '{}'", saved_location(dir, &path)),
        Err(e) => {
            error!(action = "write", component = "report", error = %e, "Report file not written");
            println!("Error: Could not write report to file: {e:#}");
        }
    }
}
