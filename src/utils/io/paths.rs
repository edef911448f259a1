//! Signal file discovery

use itertools::Itertools;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::util::validate_directory;
use crate::error::{CohortError, Result};
use crate::utils::logging::log_signal_scan;

/// Find all files with the given extension in a directory
///
/// Not recursive. The extension match ignores case. Paths are returned
/// sorted so that downstream output does not depend on directory order.
///
/// # Arguments
/// * `dir` - Directory to search
/// * `extension` - Extension without the leading dot
pub fn find_signal_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    validate_directory(dir, "signal file directory")?;

    let entries = fs::read_dir(dir).map_err(|e| CohortError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CohortError::io(dir, e))?.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    let files = files.into_iter().sorted().collect_vec();

    log_signal_scan(dir, extension, files.len());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_matching_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b_S000002.xml", "a_S000001.XML", "notes.txt"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.xml")).unwrap();

        let files = find_signal_files(dir.path(), "xml").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a_S000001.XML", "b_S000002.xml"]);
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_signal_files(&dir.path().join("absent"), "xml").is_err());
    }
}
