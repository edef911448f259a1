//! CPD subject table

use serde::Deserialize;
use smallvec::smallvec;

use super::RawSubjectRow;
use crate::algorithm::cohort::Normalizer;
use crate::models::{DatasetTag, SubjectRecord};

/// Raw CPD row as exported; one row per patient
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CpdRow {
    #[serde(rename = "PATIENT_ID")]
    pub patient_id: Option<String>,
    #[serde(rename = "DIABETES")]
    pub diabetes: Option<String>,
    #[serde(rename = "ECG")]
    pub ecg: Option<String>,
    #[serde(rename = "NEUROPATHY_SYMPTOMS")]
    pub neuropathy_symptoms: Option<String>,
    #[serde(rename = "FOOT_ULCER")]
    pub foot_ulcer: Option<String>,
}

impl RawSubjectRow for CpdRow {
    const DATASET: DatasetTag = DatasetTag::Cpd;
    const COLUMNS: &'static [&'static str] = &[
        "PATIENT_ID",
        "DIABETES",
        "ECG",
        "NEUROPATHY_SYMPTOMS",
        "FOOT_ULCER",
    ];

    fn subject_id(&self) -> Option<&str> {
        self.patient_id.as_deref()
    }

    fn to_record(&self, subject_id: &str, normalizer: &mut Normalizer) -> SubjectRecord {
        let mut record = SubjectRecord::new(subject_id, Self::DATASET);
        let id = record.subject_id.as_str();

        record.diabetes = normalizer.indicator(id, "DIABETES", self.diabetes.as_deref());
        record.ecg_available = normalizer.indicator(id, "ECG", self.ecg.as_deref());
        record.symptoms = smallvec![
            normalizer.indicator(id, "NEUROPATHY_SYMPTOMS", self.neuropathy_symptoms.as_deref()),
            normalizer.indicator(id, "FOOT_ULCER", self.foot_ulcer.as_deref()),
        ];
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::cohort::{filter_cohort, normalize_indicators};
    use crate::dataset::load_table;
    use crate::error::CohortError;
    use crate::models::TriState;

    #[test]
    fn missing_symptom_column_reads_as_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpd.csv");
        std::fs::write(
            &path,
            "PATIENT_ID,DIABETES,ECG,NEUROPATHY_SYMPTOMS\n\
             p01,yes,yes,sometimes\n\
             ,yes,yes,yes\n",
        )
        .unwrap();

        let rows: Vec<CpdRow> = load_table(&path).unwrap();
        let table = normalize_indicators(&rows);

        assert_eq!(table.records.len(), 1);
        assert_eq!(table.dropped_rows, 1);
        assert_eq!(table.issues.len(), 1);
        assert_eq!(table.issues[0].column, "NEUROPATHY_SYMPTOMS");
        assert_eq!(
            table.records[0].symptoms.as_slice(),
            &[TriState::Unknown, TriState::Unknown]
        );
    }

    #[test]
    fn missing_identifier_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpd.csv");
        std::fs::write(&path, "ID,DIABETES\np01,yes\n").unwrap();

        let err = load_table::<CpdRow>(&path).unwrap_err();
        assert!(matches!(
            err,
            CohortError::MissingColumn { ref column, .. } if column == "PATIENT_ID"
        ));
    }

    #[test]
    fn short_row_is_excluded_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpd.csv");
        std::fs::write(
            &path,
            "PATIENT_ID,DIABETES,ECG,NEUROPATHY_SYMPTOMS,FOOT_ULCER\n\
             p1,yes,yes,no,yes\n\
             p2,yes,yes\n\
             p3,yes,yes,N/A,no\n",
        )
        .unwrap();

        let rows: Vec<CpdRow> = load_table(&path).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].neuropathy_symptoms, None);

        let table = normalize_indicators(&rows);
        let kept = filter_cohort(table.records, DatasetTag::Cpd, "1");
        let ids: Vec<_> = kept.iter().map(|r| r.subject_id.as_str()).collect();
        assert_eq!(ids, ["P1", "P3"]);
    }
}
