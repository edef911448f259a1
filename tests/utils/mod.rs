use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use cohort_builder::CohortConfig;

/// Qualifying CDED subjects in the study fixture
pub const CDED_QUALIFYING: usize = 22;
/// Qualifying CDED subjects labeled with neuropathy
pub const CDED_POSITIVE: usize = 7;
/// Qualifying CPD subjects that are also in CDED
pub const CPD_OVERLAP: usize = 7;
/// Qualifying CPD subjects not in CDED
pub const CPD_UNIQUE: usize = 38;
/// Unique CPD subjects labeled with neuropathy
pub const CPD_POSITIVE: usize = 17;
/// Signal files that belong to no cohort subject
pub const EXTRANEOUS_FILES: [&str; 3] = ["ECG_S000050.xml", "ECG_Z123456.xml", "notes.xml"];

/// Identifier of the n-th CDED subject (1-based)
pub fn cded_id(n: usize) -> String {
    format!("S{n:06}")
}

/// Identifier of the n-th CPD-only subject (1-based)
pub fn cpd_id(n: usize) -> String {
    format!("P{n:06}")
}

fn cded_table() -> String {
    let mut csv = String::from("SUBJECT_ID,VISIT,DIABETES,ECG,NUMBNESS,TINGLING,FOOT_PAIN\n");
    for n in 1..=CDED_QUALIFYING {
        let symptoms = match (n <= CDED_POSITIVE, n % 2 == 0) {
            (true, true) => "no,N/A,yes",
            (true, false) => "yes,no,no",
            (false, true) => "no,no,no",
            (false, false) => "N/A,No,N/A",
        };
        // Later visits must not affect the label.
        let _ = writeln!(csv, "{},1,Yes,YES,{symptoms}", cded_id(n));
        let _ = writeln!(csv, "{},2,Yes,YES,yes,yes,yes", cded_id(n));
    }
    // Rows that fail inclusion.
    csv.push_str("S000050,1,No,YES,yes,yes,yes\n");
    csv.push_str("S000051,1,Yes,N/A,yes,yes,yes\n");
    csv.push_str("S000052,1,Yes,YES,N/A,N/A,N/A\n");
    csv.push_str("S000053,0,Yes,YES,yes,yes,yes\n");
    csv.push_str("S000054,1,unclear,YES,yes,yes,yes\n");
    csv.push_str("S000055,1,Yes,YES,,,\n");
    csv
}

fn cpd_table() -> String {
    let mut csv = String::from("PATIENT_ID,DIABETES,ECG,NEUROPATHY_SYMPTOMS,FOOT_ULCER\n");
    // Overlapping subjects, written lowercase; CDED takes precedence.
    for n in (CDED_QUALIFYING - CPD_OVERLAP + 1)..=CDED_QUALIFYING {
        let _ = writeln!(csv, "{},yes,yes,yes,yes", cded_id(n).to_lowercase());
    }
    for n in 1..=CPD_UNIQUE {
        let symptoms = match (n <= CPD_POSITIVE, n % 2 == 0) {
            (true, true) => "N/A,yes",
            (true, false) => "yes,no",
            (false, true) => "no,N/A",
            (false, false) => "No,No",
        };
        let _ = writeln!(csv, "{},yes,YES,{symptoms}", cpd_id(n));
    }
    csv.push_str("P000090,yes,no,yes,yes\n");
    csv.push_str("P000091,yes,yes,N/A,N/A\n");
    csv.push_str("P000092,N/A,yes,yes,yes\n");
    csv
}

/// Cohort subject identifiers in the expected output order
pub fn expected_ids() -> Vec<String> {
    (1..=CDED_QUALIFYING)
        .map(cded_id)
        .chain((1..=CPD_UNIQUE).map(cpd_id))
        .collect()
}

/// Write the study fixture under `root` and return a matching configuration
pub fn write_study_fixture(root: &Path) -> CohortConfig {
    let data = root.join("data");
    let ecg = data.join("ecg");
    fs::create_dir_all(&ecg).unwrap();

    fs::write(data.join("cded.csv"), cded_table()).unwrap();
    fs::write(data.join("cpd.csv"), cpd_table()).unwrap();

    for id in expected_ids() {
        fs::write(ecg.join(format!("ECG_{id}.xml")), format!("<ecg id=\"{id}\"/>")).unwrap();
    }
    for name in EXTRANEOUS_FILES {
        fs::write(ecg.join(name), "<ecg/>").unwrap();
    }
    // Ignored because of its extension.
    fs::write(ecg.join("ECG_S000001.txt"), "not a signal").unwrap();

    CohortConfig {
        cded_table: data.join("cded.csv"),
        cpd_table: data.join("cpd.csv"),
        signal_dir: ecg,
        output_table: root.join("output").join("cohort.csv"),
        healthy_dir: root.join("output").join("healthy"),
        neuropathy_dir: root.join("output").join("neuropathy"),
        copy_threads: Some(4),
        ..Default::default()
    }
}

/// Path of a subject's signal file inside the fixture
pub fn signal_file(config: &CohortConfig, id: &str) -> PathBuf {
    config.signal_dir.join(format!("ECG_{id}.xml"))
}
