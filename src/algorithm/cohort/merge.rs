//! Cross-dataset cohort merge

use log::debug;
use rustc_hash::FxHashSet;

use crate::models::CohortEntry;

/// Concatenate two cohorts, the primary winning identifier conflicts
///
/// Identifiers are compared after uppercasing. The result holds every
/// primary entry followed by the secondary entries whose identifier was not
/// already taken, each side in its original order. An identifier never
/// appears twice in the output, even if an input repeats it.
#[must_use]
pub fn merge_cohorts(primary: Vec<CohortEntry>, secondary: Vec<CohortEntry>) -> Vec<CohortEntry> {
    let mut seen = FxHashSet::default();
    let secondary_len = secondary.len();
    let mut merged = Vec::with_capacity(primary.len() + secondary_len);

    merged.extend(
        primary
            .into_iter()
            .filter(|entry| seen.insert(entry.subject_id.to_uppercase())),
    );
    let primary_kept = merged.len();

    merged.extend(
        secondary
            .into_iter()
            .filter(|entry| seen.insert(entry.subject_id.to_uppercase())),
    );

    debug!(
        "Merged cohort: {primary_kept} primary + {} secondary ({} secondary overlaps removed)",
        merged.len() - primary_kept,
        secondary_len - (merged.len() - primary_kept)
    );
    merged
}
