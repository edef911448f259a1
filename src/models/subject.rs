//! Subject-level models
//!
//! `SubjectRecord` is the shared shape every dataset is normalized into.
//! `CohortEntry` is one row of the final labeled table.

use serde::Serialize;
use smallvec::SmallVec;
use std::path::PathBuf;

use super::types::{Bucket, DatasetTag, TriState};

/// Symptom indicators for one subject; no dataset records more than three
pub type Indicators = SmallVec<[TriState; 3]>;

/// A subject after vocabulary normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRecord {
    /// Uppercased, trimmed identifier
    pub subject_id: String,
    /// Source dataset
    pub dataset: DatasetTag,
    /// Diabetes status
    pub diabetes: TriState,
    /// Whether an ECG recording is available
    pub ecg_available: TriState,
    /// Visit marker, only recorded by datasets with repeated visits
    pub visit: Option<String>,
    /// Raw symptom indicators in dataset column order
    pub symptoms: Indicators,
}

impl SubjectRecord {
    /// Create a record, canonicalizing the identifier
    #[must_use]
    pub fn new(subject_id: &str, dataset: DatasetTag) -> Self {
        Self {
            subject_id: canonical_id(subject_id),
            dataset,
            diabetes: TriState::Unknown,
            ecg_available: TriState::Unknown,
            visit: None,
            symptoms: Indicators::new(),
        }
    }
}

/// One subject in the merged cohort
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortEntry {
    /// Uppercased identifier, unique within a cohort
    pub subject_id: String,
    /// Dataset the subject was taken from
    pub dataset: DatasetTag,
    /// Derived neuropathy outcome
    pub neuropathy: bool,
}

impl CohortEntry {
    /// Routing bucket for this subject's signal files
    #[must_use]
    pub const fn bucket(&self) -> Bucket {
        Bucket::from_label(self.neuropathy)
    }
}

/// Row layout of the output table
#[derive(Debug, Serialize)]
pub struct CohortRow<'a> {
    /// Subject identifier
    pub patient_id: &'a str,
    /// Lowercase dataset tag
    pub dataset: &'static str,
    /// Neuropathy outcome
    pub neuropathy_outcome: bool,
}

impl<'a> From<&'a CohortEntry> for CohortRow<'a> {
    fn from(entry: &'a CohortEntry) -> Self {
        Self {
            patient_id: &entry.subject_id,
            dataset: entry.dataset.as_str(),
            neuropathy_outcome: entry.neuropathy,
        }
    }
}

/// Where a single signal file should be copied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRoutingDecision {
    /// Path of the source signal file
    pub source: PathBuf,
    /// Destination bucket
    pub bucket: Bucket,
}

/// Canonical form of a subject identifier: trimmed and uppercased
#[must_use]
pub fn canonical_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}
