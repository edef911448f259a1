//! Log lines for the cohort run's file-level steps
//!
//! Messages are built by plain functions so their wording can be checked
//! in tests; the `log_*` wrappers only pick the level.

use log::{info, warn};
use std::path::Path;
use std::time::Duration;

fn table_read_message(role: &str, path: &Path, rows: usize, elapsed: Duration) -> String {
    format!(
        "Loaded {rows} rows of the {role} from {} in {elapsed:.2?}",
        path.display()
    )
}

fn table_written_message(path: &Path, subjects: usize) -> String {
    let noun = if subjects == 1 { "subject" } else { "subjects" };
    format!("Wrote cohort of {subjects} {noun} to {}", path.display())
}

fn signal_scan_message(dir: &Path, extension: &str, found: usize) -> String {
    if found == 0 {
        format!("No .{extension} signal files in {}", dir.display())
    } else {
        format!("Found {found} .{extension} signal files in {}", dir.display())
    }
}

/// Log a subject table that has been read
///
/// # Arguments
/// * `role` - What the table is used for, e.g. "CPD subject table"
/// * `path` - Where it was read from
/// * `rows` - Raw rows, before any filtering
/// * `elapsed` - Time spent reading
pub fn log_table_read(role: &str, path: &Path, rows: usize, elapsed: Duration) {
    info!("{}", table_read_message(role, path, rows, elapsed));
}

/// Log the written cohort table
pub fn log_table_written(path: &Path, subjects: usize) {
    info!("{}", table_written_message(path, subjects));
}

/// Log the outcome of a signal file scan
///
/// An empty scan is a warning: nothing will be routed.
pub fn log_signal_scan(dir: &Path, extension: &str, found: usize) {
    let message = signal_scan_message(dir, extension, found);
    if found == 0 {
        warn!("{message}");
    } else {
        info!("{message}");
    }
}
