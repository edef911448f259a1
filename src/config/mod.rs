//! Configuration for a cohort build run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::algorithm::routing::IdWindow;
use crate::error::util::safe_open_file;
use crate::error::{CohortError, Result};
use crate::utils::io::CollisionPolicy;

/// Configuration for the cohort builder
///
/// Every field has a default, so a JSON file only needs to name the
/// values that differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CohortConfig {
    /// CDED subject table (CSV)
    pub cded_table: PathBuf,
    /// CPD subject table (CSV)
    pub cpd_table: PathBuf,
    /// Directory holding the raw ECG signal files
    pub signal_dir: PathBuf,
    /// Extension of the signal files, without the dot
    pub signal_extension: String,
    /// Where the merged cohort table is written
    pub output_table: PathBuf,
    /// Destination for files of subjects labeled healthy
    pub healthy_dir: PathBuf,
    /// Destination for files of subjects labeled with neuropathy
    pub neuropathy_dir: PathBuf,
    /// The only CDED visit marker that qualifies a row
    pub cded_qualifying_visit: String,
    /// Position of the subject identifier inside signal file names
    pub id_window: IdWindow,
    /// What to do when a destination file already exists
    pub collision_policy: CollisionPolicy,
    /// Threads used for copying; defaults to the number of CPUs
    pub copy_threads: Option<usize>,
}

impl Default for CohortConfig {
    fn default() -> Self {
        Self {
            cded_table: PathBuf::from("data/cded.csv"),
            cpd_table: PathBuf::from("data/cpd.csv"),
            signal_dir: PathBuf::from("data/ecg"),
            signal_extension: "xml".to_string(),
            output_table: PathBuf::from("output/cohort.csv"),
            healthy_dir: PathBuf::from("output/healthy"),
            neuropathy_dir: PathBuf::from("output/neuropathy"),
            cded_qualifying_visit: "1".to_string(),
            id_window: IdWindow::default(),
            collision_policy: CollisionPolicy::default(),
            copy_threads: None,
        }
    }
}

impl CohortConfig {
    /// Load a configuration from a JSON file and validate it
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = safe_open_file(path, "configuration file")?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a sensible run
    pub fn validate(&self) -> Result<()> {
        if self.id_window.width == 0 {
            return Err(CohortError::Config(
                "id_window.width must be greater than zero".to_string(),
            ));
        }
        if self.healthy_dir == self.neuropathy_dir {
            return Err(CohortError::Config(format!(
                "healthy_dir and neuropathy_dir must differ (both are {})",
                self.healthy_dir.display()
            )));
        }
        if self.cded_qualifying_visit.trim().is_empty() {
            return Err(CohortError::Config(
                "cded_qualifying_visit must not be empty".to_string(),
            ));
        }
        if self.copy_threads == Some(0) {
            return Err(CohortError::Config(
                "copy_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of copy threads to use
    #[must_use]
    pub fn effective_copy_threads(&self) -> usize {
        self.copy_threads.unwrap_or_else(num_cpus::get)
    }
}

impl fmt::Display for CohortConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cohort Configuration:")?;
        writeln!(f, "  CDED Table: {}", self.cded_table.display())?;
        writeln!(f, "  CPD Table: {}", self.cpd_table.display())?;
        writeln!(
            f,
            "  Signal Files: {}/*.{}",
            self.signal_dir.display(),
            self.signal_extension
        )?;
        writeln!(f, "  Output Table: {}", self.output_table.display())?;
        writeln!(f, "  Healthy Dir: {}", self.healthy_dir.display())?;
        writeln!(f, "  Neuropathy Dir: {}", self.neuropathy_dir.display())?;
        writeln!(f, "  CDED Visit: {}", self.cded_qualifying_visit)?;
        writeln!(
            f,
            "  Id Window: {} chars, {} from end of stem",
            self.id_window.width, self.id_window.trailing
        )?;
        writeln!(f, "  Collision Policy: {:?}", self.collision_policy)?;
        if let Some(threads) = self.copy_threads {
            writeln!(f, "  Copy Threads: {threads}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"cded_qualifying_visit": "2", "copy_threads": 2}}"#).unwrap();

        let config = CohortConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.cded_qualifying_visit, "2");
        assert_eq!(config.effective_copy_threads(), 2);
        assert_eq!(config.signal_extension, "xml");
        assert_eq!(config.collision_policy, CollisionPolicy::Fail);
    }

    #[test]
    fn identical_bucket_dirs_are_rejected() {
        let config = CohortConfig {
            neuropathy_dir: PathBuf::from("output/healthy"),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CohortError::Config(_))));
    }

    #[test]
    fn zero_width_window_is_rejected() {
        let config = CohortConfig {
            id_window: IdWindow {
                trailing: 0,
                width: 0,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            CohortConfig::from_json_file(file.path()),
            Err(CohortError::Config(_))
        ));
    }
}
