//! Label-based routing of signal files
//!
//! Signal file names carry the subject identifier in a fixed-width window
//! counted from the end of the file stem. Files whose identifier is not in
//! the cohort are left out of the plan.

use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::models::{Bucket, CohortEntry, FileRoutingDecision, canonical_id};

/// Location of the subject identifier within a file stem
///
/// The identifier is the `width` bytes that end `trailing` bytes before
/// the end of the stem. Offsets count UTF-8 bytes, not characters, so
/// they match character counts only for ASCII names. With the default
/// `{ trailing: 0, width: 7 }`, `ECG_20190312_S001234.xml` yields `S001234`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdWindow {
    /// Bytes between the identifier and the end of the stem
    pub trailing: usize,
    /// Length of the identifier in bytes
    pub width: usize,
}

impl Default for IdWindow {
    fn default() -> Self {
        Self {
            trailing: 0,
            width: 7,
        }
    }
}

impl IdWindow {
    /// Extract the canonical identifier from a file path
    ///
    /// Returns `None` if the stem is too short or not valid UTF-8, or if
    /// the window does not fall on character boundaries.
    #[must_use]
    pub fn extract(&self, path: &Path) -> Option<String> {
        let stem = path.file_stem()?.to_str()?;
        let end = stem.len().checked_sub(self.trailing)?;
        let start = end.checked_sub(self.width)?;
        stem.get(start..end).map(canonical_id)
    }
}

/// Map each file belonging to a cohort subject to its bucket
///
/// # Arguments
/// * `file_paths` - Candidate signal files
/// * `cohort` - The merged cohort
/// * `window` - Where the identifier sits in each file name
///
/// # Returns
/// An ordered mapping from file path to bucket; unmatched files are absent.
#[must_use]
pub fn route_files(
    file_paths: &[PathBuf],
    cohort: &[CohortEntry],
    window: &IdWindow,
) -> BTreeMap<PathBuf, Bucket> {
    let labels: FxHashMap<String, Bucket> = cohort
        .iter()
        .map(|entry| (entry.subject_id.to_uppercase(), entry.bucket()))
        .collect();

    let mut routing = BTreeMap::new();
    let mut unmatched = 0usize;

    for path in file_paths {
        let Some(id) = window.extract(path) else {
            warn!(
                "Cannot extract a subject identifier from {}; skipping",
                path.display()
            );
            unmatched += 1;
            continue;
        };

        match labels.get(&id) {
            Some(bucket) => {
                routing.insert(path.clone(), *bucket);
            }
            None => {
                debug!("{} ({id}) is not in the cohort", path.display());
                unmatched += 1;
            }
        }
    }

    debug!(
        "Routed {} of {} files ({unmatched} outside the cohort)",
        routing.len(),
        file_paths.len()
    );
    routing
}

/// Flatten a routing map into decisions, in path order
#[must_use]
pub fn routing_decisions(routing: &BTreeMap<PathBuf, Bucket>) -> Vec<FileRoutingDecision> {
    routing
        .iter()
        .map(|(source, bucket)| FileRoutingDecision {
            source: source.clone(),
            bucket: *bucket,
        })
        .collect()
}
