//! Cohort inclusion criteria
//!
//! A subject enters the cohort when it has diabetes, an ECG recording and a
//! derivable neuropathy label. CDED records several visits per subject, so
//! it additionally requires one specific visit marker.

use itertools::Itertools;
use log::{debug, warn};

use super::label::derive_label;
use crate::models::{CohortEntry, DatasetTag, SubjectRecord};

/// Defines a criterion for filtering subject records
pub trait FilterCriteria<T> {
    /// Determine if an entity meets the filter criteria
    fn meets_criteria(&self, entity: &T) -> bool;
}

/// A filter that can be applied to a subject record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectFilter {
    /// Diabetes status is a definite yes
    Diabetic,
    /// ECG availability is a definite yes
    EcgAvailable,
    /// At least one symptom indicator is present
    LabelKnown,
    /// Visit marker equals the given value
    Visit(String),
    /// Combined filter that requires all criteria to be met
    All(Vec<SubjectFilter>),
}

impl FilterCriteria<SubjectRecord> for SubjectFilter {
    fn meets_criteria(&self, record: &SubjectRecord) -> bool {
        match self {
            Self::Diabetic => record.diabetes.is_true(),
            Self::EcgAvailable => record.ecg_available.is_true(),
            Self::LabelKnown => derive_label(&record.symptoms).is_known(),
            Self::Visit(marker) => record.visit.as_deref().map(str::trim) == Some(marker.trim()),
            Self::All(filters) => filters.iter().all(|f| f.meets_criteria(record)),
        }
    }
}

impl SubjectFilter {
    /// Inclusion criteria for a dataset
    ///
    /// # Arguments
    /// * `dataset` - The dataset the records come from
    /// * `qualifying_visit` - The CDED visit marker that qualifies a row
    #[must_use]
    pub fn inclusion(dataset: DatasetTag, qualifying_visit: &str) -> Self {
        let mut criteria = vec![Self::Diabetic, Self::EcgAvailable, Self::LabelKnown];
        if dataset == DatasetTag::Cded {
            criteria.push(Self::Visit(qualifying_visit.to_string()));
        }
        Self::All(criteria)
    }
}

/// Keep only the subjects that satisfy the dataset's inclusion criteria
///
/// Row order is preserved.
#[must_use]
pub fn filter_cohort(
    records: Vec<SubjectRecord>,
    dataset: DatasetTag,
    qualifying_visit: &str,
) -> Vec<SubjectRecord> {
    let before = records.len();
    let filter = SubjectFilter::inclusion(dataset, qualifying_visit);
    let kept = CohortFilter::filter_records(records, &filter);
    debug!("{dataset}: {} of {before} rows meet inclusion criteria", kept.len());
    kept
}

/// Drop repeated identifiers within one dataset, keeping the first row
#[must_use]
pub fn dedupe_subjects(records: Vec<SubjectRecord>) -> Vec<SubjectRecord> {
    let before = records.len();
    let unique = records
        .into_iter()
        .unique_by(|r| r.subject_id.clone())
        .collect_vec();

    if unique.len() < before {
        warn!(
            "Dropped {} duplicate qualifying rows (first occurrence kept)",
            before - unique.len()
        );
    }
    unique
}

/// Turn filtered records into labeled cohort entries
///
/// Records whose label cannot be derived are skipped; after
/// `filter_cohort` there are none.
#[must_use]
pub fn label_cohort(records: &[SubjectRecord]) -> Vec<CohortEntry> {
    records
        .iter()
        .filter_map(|record| {
            derive_label(&record.symptoms)
                .as_bool()
                .map(|neuropathy| CohortEntry {
                    subject_id: record.subject_id.clone(),
                    dataset: record.dataset,
                    neuropathy,
                })
        })
        .collect()
}

/// Common filter functions for subject tables
pub struct CohortFilter;

impl CohortFilter {
    /// Filter a vector of records using the specified criteria
    pub fn filter_records<F>(records: Vec<SubjectRecord>, filter: &F) -> Vec<SubjectRecord>
    where
        F: FilterCriteria<SubjectRecord>,
    {
        records
            .into_iter()
            .filter(|r| filter.meets_criteria(r))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TriState::{self, False, True, Unknown};
    use smallvec::smallvec;

    fn record(
        id: &str,
        dataset: DatasetTag,
        diabetes: TriState,
        ecg: TriState,
        visit: Option<&str>,
        symptoms: &[TriState],
    ) -> SubjectRecord {
        SubjectRecord {
            subject_id: id.to_string(),
            dataset,
            diabetes,
            ecg_available: ecg,
            visit: visit.map(ToString::to_string),
            symptoms: symptoms.iter().copied().collect(),
        }
    }

    #[test]
    fn cpd_inclusion() {
        let records = vec![
            record("A", DatasetTag::Cpd, True, True, None, &[False, Unknown]),
            record("B", DatasetTag::Cpd, False, True, None, &[True, True]),
            record("C", DatasetTag::Cpd, True, Unknown, None, &[True, True]),
            record("D", DatasetTag::Cpd, True, True, None, &[Unknown, Unknown]),
            record("E", DatasetTag::Cpd, True, True, None, &[Unknown, True]),
        ];

        let kept = filter_cohort(records, DatasetTag::Cpd, "1");
        let ids: Vec<_> = kept.iter().map(|r| r.subject_id.as_str()).collect();
        assert_eq!(ids, ["A", "E"]);
    }

    #[test]
    fn cded_requires_qualifying_visit() {
        let records = vec![
            record("A", DatasetTag::Cded, True, True, Some("0"), &[True]),
            record("A", DatasetTag::Cded, True, True, Some("1"), &[False]),
            record("B", DatasetTag::Cded, True, True, None, &[True]),
            record("C", DatasetTag::Cded, True, True, Some(" 1 "), &[True]),
        ];

        let kept = filter_cohort(records, DatasetTag::Cded, "1");
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].subject_id, "A");
        assert_eq!(kept[0].symptoms.as_slice(), &[False]);
        assert_eq!(kept[1].subject_id, "C");
    }

    #[test]
    fn dedupe_keeps_first() {
        let records = vec![
            record("A", DatasetTag::Cpd, True, True, None, &[True]),
            record("B", DatasetTag::Cpd, True, True, None, &[False]),
            record("A", DatasetTag::Cpd, True, True, None, &[False]),
        ];
        let unique = dedupe_subjects(records);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].symptoms.as_slice(), &[True]);
    }

    #[test]
    fn labels_follow_symptoms() {
        let records = vec![
            SubjectRecord {
                symptoms: smallvec![False, Unknown],
                ..record("A", DatasetTag::Cpd, True, True, None, &[])
            },
            record("B", DatasetTag::Cpd, True, True, None, &[Unknown, True]),
            record("C", DatasetTag::Cpd, True, True, None, &[Unknown]),
        ];
        let entries = label_cohort(&records);
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].neuropathy);
        assert!(entries[1].neuropathy);
    }
}
