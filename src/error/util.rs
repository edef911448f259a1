//! Utility functions for error handling
//!
//! Guards that turn filesystem preconditions into descriptive errors
//! before any reading starts.

use std::fs;
use std::path::Path;

use crate::error::{CohortError, Result};

/// Safely open an input file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `role` - What the file is needed for (used in the diagnostic)
///
/// # Returns
/// * `Result<fs::File>` - The opened file or a detailed error
pub fn safe_open_file(path: &Path, role: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(CohortError::missing_input(role, path));
    }

    if !path.is_file() {
        return Err(CohortError::Config(format!(
            "Expected a file for {role}, found something else at {}",
            path.display()
        )));
    }

    fs::File::open(path).map_err(|e| CohortError::io(path, e))
}

/// Check that a directory exists and is readable
pub fn validate_directory(path: &Path, role: &str) -> Result<()> {
    if !path.exists() {
        return Err(CohortError::missing_input(role, path));
    }

    if !path.is_dir() {
        return Err(CohortError::Config(format!(
            "Expected a directory for {role}, found something else at {}",
            path.display()
        )));
    }

    fs::read_dir(path)
        .map(|_| ())
        .map_err(|e| CohortError::io(path, e))
}

/// Create a directory (and parents) if it does not exist yet
pub fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| CohortError::io(path, e))
}
