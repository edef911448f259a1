//! Survey vocabulary normalization
//!
//! Every categorical survey column uses the same small free-text vocabulary.
//! Literals outside it are data-quality issues: they are logged, collected
//! and read as `Unknown`, and the run continues.

use log::{debug, warn};
use std::fmt;

use crate::dataset::RawSubjectRow;
use crate::models::{DatasetTag, SubjectRecord, TriState};

/// Literals read as a definite yes
pub const TRUE_LITERALS: [&str; 3] = ["yes", "YES", "Yes"];
/// Literals read as a definite no
pub const FALSE_LITERALS: [&str; 3] = ["no", "NO", "No"];
/// Literals read as explicitly not recorded
pub const MISSING_LITERALS: [&str; 1] = ["N/A"];

/// Parse a non-empty literal through the fixed vocabulary
///
/// Returns `None` when the literal is not part of the vocabulary.
#[must_use]
pub fn parse_literal(literal: &str) -> Option<TriState> {
    if TRUE_LITERALS.contains(&literal) {
        Some(TriState::True)
    } else if FALSE_LITERALS.contains(&literal) {
        Some(TriState::False)
    } else if MISSING_LITERALS.contains(&literal) {
        Some(TriState::Unknown)
    } else {
        None
    }
}

/// An unrecognized literal found while normalizing a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataQualityIssue {
    /// Dataset the value came from
    pub dataset: DatasetTag,
    /// Subject the value belongs to
    pub subject_id: String,
    /// Column holding the value
    pub column: &'static str,
    /// The literal as found in the table
    pub literal: String,
}

impl fmt::Display for DataQualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} subject {}: unrecognized value '{}' in column {}",
            self.dataset, self.subject_id, self.literal, self.column
        )
    }
}

/// Maps raw cells of one dataset to `TriState`, collecting issues
#[derive(Debug)]
pub struct Normalizer {
    dataset: DatasetTag,
    issues: Vec<DataQualityIssue>,
}

impl Normalizer {
    /// Create a normalizer for the given dataset
    #[must_use]
    pub const fn new(dataset: DatasetTag) -> Self {
        Self {
            dataset,
            issues: Vec::new(),
        }
    }

    /// Normalize a single cell
    ///
    /// Empty or absent cells are `Unknown` without an issue.
    pub fn indicator(
        &mut self,
        subject_id: &str,
        column: &'static str,
        raw: Option<&str>,
    ) -> TriState {
        let Some(literal) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return TriState::Unknown;
        };

        parse_literal(literal).unwrap_or_else(|| {
            let issue = DataQualityIssue {
                dataset: self.dataset,
                subject_id: subject_id.to_string(),
                column,
                literal: literal.to_string(),
            };
            warn!("{issue}; treating as missing");
            self.issues.push(issue);
            TriState::Unknown
        })
    }

    /// Issues collected so far
    #[must_use]
    pub fn issues(&self) -> &[DataQualityIssue] {
        &self.issues
    }

    /// Consume the normalizer, returning its issues
    #[must_use]
    pub fn into_issues(self) -> Vec<DataQualityIssue> {
        self.issues
    }
}

/// A dataset table after normalization
#[derive(Debug, Clone, Default)]
pub struct NormalizedTable {
    /// Normalized records in original row order
    pub records: Vec<SubjectRecord>,
    /// Unrecognized literals encountered
    pub issues: Vec<DataQualityIssue>,
    /// Rows dropped for lacking an identifier
    pub dropped_rows: usize,
}

/// Map every survey column of a raw table through the vocabulary
pub fn normalize_indicators<R: RawSubjectRow>(rows: &[R]) -> NormalizedTable {
    let mut normalizer = Normalizer::new(R::DATASET);
    let mut records = Vec::with_capacity(rows.len());
    let mut dropped_rows = 0;

    for (index, row) in rows.iter().enumerate() {
        match row.subject_id().map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => records.push(row.to_record(id, &mut normalizer)),
            None => {
                warn!("{} row {} has no subject identifier; skipping", R::DATASET, index + 1);
                dropped_rows += 1;
            }
        }
    }

    let issues = normalizer.into_issues();
    debug!(
        "Normalized {} {} rows ({} issues, {} dropped)",
        records.len(),
        R::DATASET,
        issues.len(),
        dropped_rows
    );

    NormalizedTable {
        records,
        issues,
        dropped_rows,
    }
}
