//! CDED subject table
//!
//! One row per subject visit. Three symptom questions are recorded:
//! numbness, tingling and foot pain.

use serde::Deserialize;
use smallvec::smallvec;

use super::RawSubjectRow;
use crate::algorithm::cohort::Normalizer;
use crate::models::{DatasetTag, SubjectRecord};

/// Raw CDED row as exported
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CdedRow {
    /// Subject identifier
    #[serde(rename = "SUBJECT_ID")]
    pub subject_id: Option<String>,
    /// Visit marker
    #[serde(rename = "VISIT")]
    pub visit: Option<String>,
    /// Diabetes status
    #[serde(rename = "DIABETES")]
    pub diabetes: Option<String>,
    /// ECG recording available
    #[serde(rename = "ECG")]
    pub ecg: Option<String>,
    /// Numbness in the feet
    #[serde(rename = "NUMBNESS")]
    pub numbness: Option<String>,
    /// Tingling in the feet
    #[serde(rename = "TINGLING")]
    pub tingling: Option<String>,
    /// Foot pain
    #[serde(rename = "FOOT_PAIN")]
    pub foot_pain: Option<String>,
}

impl RawSubjectRow for CdedRow {
    const DATASET: DatasetTag = DatasetTag::Cded;
    const COLUMNS: &'static [&'static str] = &[
        "SUBJECT_ID",
        "VISIT",
        "DIABETES",
        "ECG",
        "NUMBNESS",
        "TINGLING",
        "FOOT_PAIN",
    ];

    fn subject_id(&self) -> Option<&str> {
        self.subject_id.as_deref()
    }

    fn to_record(&self, subject_id: &str, normalizer: &mut Normalizer) -> SubjectRecord {
        let mut record = SubjectRecord::new(subject_id, Self::DATASET);
        let id = record.subject_id.as_str();

        record.diabetes = normalizer.indicator(id, "DIABETES", self.diabetes.as_deref());
        record.ecg_available = normalizer.indicator(id, "ECG", self.ecg.as_deref());
        record.symptoms = smallvec![
            normalizer.indicator(id, "NUMBNESS", self.numbness.as_deref()),
            normalizer.indicator(id, "TINGLING", self.tingling.as_deref()),
            normalizer.indicator(id, "FOOT_PAIN", self.foot_pain.as_deref()),
        ];
        record.visit = self
            .visit
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ToString::to_string);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::load_table;
    use crate::models::TriState;

    #[test]
    fn loads_and_normalizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cded.csv");
        std::fs::write(
            &path,
            "SUBJECT_ID,VISIT,DIABETES,ECG,NUMBNESS,TINGLING,FOOT_PAIN,SITE\n\
             c001,1,Yes,YES,no,N/A,,north\n\
             c001,2,Yes,YES,yes,yes,yes,north\n",
        )
        .unwrap();

        let rows: Vec<CdedRow> = load_table(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].foot_pain, None);

        let mut normalizer = Normalizer::new(DatasetTag::Cded);
        let record = rows[0].to_record("c001", &mut normalizer);
        assert_eq!(record.subject_id, "C001");
        assert_eq!(record.visit.as_deref(), Some("1"));
        assert_eq!(record.diabetes, TriState::True);
        assert_eq!(
            record.symptoms.as_slice(),
            &[TriState::False, TriState::Unknown, TriState::Unknown]
        );
        assert!(normalizer.issues().is_empty());
    }
}
