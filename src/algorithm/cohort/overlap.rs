//! Identifier overlap between datasets

use rustc_hash::FxHashSet;
use std::fmt;

/// Counts of distinct identifiers in two datasets and their intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlapReport {
    /// Distinct CDED identifiers
    pub cded_subjects: usize,
    /// Distinct CPD identifiers
    pub cpd_subjects: usize,
    /// Identifiers present in both
    pub shared_subjects: usize,
}

impl fmt::Display for OverlapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CDED {} / CPD {} / shared {}",
            self.cded_subjects, self.cpd_subjects, self.shared_subjects
        )
    }
}

/// Compare the distinct uppercased identifiers of two datasets
pub fn overlap_report<'a, A, B>(cded_ids: A, cpd_ids: B) -> OverlapReport
where
    A: IntoIterator<Item = &'a str>,
    B: IntoIterator<Item = &'a str>,
{
    let cded: FxHashSet<String> = cded_ids.into_iter().map(str::to_uppercase).collect();
    let cpd: FxHashSet<String> = cpd_ids.into_iter().map(str::to_uppercase).collect();

    OverlapReport {
        cded_subjects: cded.len(),
        cpd_subjects: cpd.len(),
        shared_subjects: cded.intersection(&cpd).count(),
    }
}
