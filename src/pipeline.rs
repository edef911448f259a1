//! End-to-end cohort pipeline
//!
//! `build_cohort` is the pure core: normalize, filter, dedupe, label and
//! merge. `run` wraps it with the I/O edges in a fixed order: load both
//! tables, build, write the table, route and copy the signal files.

use log::info;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use crate::algorithm::cohort::{
    CohortStatistics, CohortStats, DataQualityIssue, NormalizedTable, OverlapReport,
    dedupe_subjects, filter_cohort, label_cohort, merge_cohorts, normalize_indicators,
    overlap_report,
};
use crate::algorithm::routing::{route_files, routing_decisions};
use crate::config::CohortConfig;
use crate::dataset::{CdedRow, CpdRow, load_table};
use crate::error::Result;
use crate::models::{Bucket, CohortEntry, DatasetTag, SubjectRecord};
use crate::utils::io::{
    BucketDirs, CopySummary, copy_routed_files, find_signal_files, write_cohort_table,
};

/// Everything `build_cohort` produces
#[derive(Debug, Clone, Default)]
pub struct CohortOutcome {
    /// Merged cohort, CDED first then CPD
    pub cohort: Vec<CohortEntry>,
    /// Qualifying CDED subjects
    pub cded_included: usize,
    /// Qualifying CPD subjects before overlap removal
    pub cpd_included: usize,
    /// CPD subjects dropped because CDED already has them
    pub cpd_overlap_removed: usize,
    /// Identifier overlap over all normalized rows
    pub input_overlap: OverlapReport,
    /// Identifier overlap between the qualifying subjects
    pub cohort_overlap: OverlapReport,
    /// Unrecognized literals from both tables
    pub issues: Vec<DataQualityIssue>,
}

/// Summary of a full run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Cohort construction result
    pub outcome: CohortOutcome,
    /// Label statistics of the merged cohort
    pub stats: CohortStats,
    /// Routed files and their buckets
    pub routing: BTreeMap<PathBuf, Bucket>,
    /// Signal files that were not routed
    pub unrouted_files: usize,
    /// Copy results
    pub copy: CopySummary,
}

fn ids(records: &[SubjectRecord]) -> impl Iterator<Item = &str> {
    records.iter().map(|r| r.subject_id.as_str())
}

fn qualifying(
    table: NormalizedTable,
    dataset: DatasetTag,
    qualifying_visit: &str,
) -> Vec<SubjectRecord> {
    dedupe_subjects(filter_cohort(table.records, dataset, qualifying_visit))
}

/// Build the labeled cohort from the two raw tables
///
/// # Arguments
/// * `cded_rows` - Raw CDED rows
/// * `cpd_rows` - Raw CPD rows
/// * `qualifying_visit` - The CDED visit marker that qualifies a row
#[must_use]
pub fn build_cohort(
    cded_rows: &[CdedRow],
    cpd_rows: &[CpdRow],
    qualifying_visit: &str,
) -> CohortOutcome {
    let mut cded = normalize_indicators(cded_rows);
    let mut cpd = normalize_indicators(cpd_rows);

    let input_overlap = overlap_report(ids(&cded.records), ids(&cpd.records));
    let mut issues = std::mem::take(&mut cded.issues);
    issues.append(&mut cpd.issues);

    let cded = qualifying(cded, DatasetTag::Cded, qualifying_visit);
    let cpd = qualifying(cpd, DatasetTag::Cpd, qualifying_visit);
    let cohort_overlap = overlap_report(ids(&cded), ids(&cpd));

    let primary = label_cohort(&cded);
    let secondary = label_cohort(&cpd);
    let (cded_included, cpd_included) = (primary.len(), secondary.len());

    let cohort = merge_cohorts(primary, secondary);
    let cpd_overlap_removed = cded_included + cpd_included - cohort.len();

    CohortOutcome {
        cohort,
        cded_included,
        cpd_included,
        cpd_overlap_removed,
        input_overlap,
        cohort_overlap,
        issues,
    }
}

/// Run the whole pipeline described by a configuration
pub fn run(config: &CohortConfig) -> Result<RunSummary> {
    let start = Instant::now();
    config.validate()?;

    let cded_rows: Vec<CdedRow> = load_table(&config.cded_table)?;
    let cpd_rows: Vec<CpdRow> = load_table(&config.cpd_table)?;

    let outcome = build_cohort(&cded_rows, &cpd_rows, &config.cded_qualifying_visit);
    info!("Subjects in both input tables: {}", outcome.input_overlap);
    info!(
        "Qualifying: {} CDED, {} CPD ({} CPD removed as already in CDED)",
        outcome.cded_included, outcome.cpd_included, outcome.cpd_overlap_removed
    );
    if !outcome.issues.is_empty() {
        info!("{} unrecognized survey values were read as missing", outcome.issues.len());
    }

    write_cohort_table(&config.output_table, &outcome.cohort)?;

    let files = find_signal_files(&config.signal_dir, &config.signal_extension)?;
    let routing = route_files(&files, &outcome.cohort, &config.id_window);
    let unrouted_files = files.len() - routing.len();
    info!("Routed {} signal files, {unrouted_files} outside the cohort", routing.len());

    let dirs = BucketDirs {
        healthy: config.healthy_dir.clone(),
        neuropathy: config.neuropathy_dir.clone(),
    };
    let copy = copy_routed_files(
        &routing_decisions(&routing),
        &dirs,
        config.collision_policy,
        config.effective_copy_threads(),
    )?;

    let stats = CohortStatistics::calculate(&outcome.cohort);
    info!(
        "{}",
        CohortStatistics::generate_summary(&stats, Some(&outcome.cohort_overlap))
    );
    info!("Cohort build finished in {:?}", start.elapsed());

    Ok(RunSummary {
        outcome,
        stats,
        routing,
        unrouted_files,
        copy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cded(id: &str, visit: &str, symptoms: [&str; 3]) -> CdedRow {
        CdedRow {
            subject_id: Some(id.to_string()),
            visit: Some(visit.to_string()),
            diabetes: Some("Yes".to_string()),
            ecg: Some("YES".to_string()),
            numbness: Some(symptoms[0].to_string()),
            tingling: Some(symptoms[1].to_string()),
            foot_pain: Some(symptoms[2].to_string()),
        }
    }

    fn cpd(id: &str, symptoms: [&str; 2]) -> CpdRow {
        CpdRow {
            patient_id: Some(id.to_string()),
            diabetes: Some("yes".to_string()),
            ecg: Some("yes".to_string()),
            neuropathy_symptoms: Some(symptoms[0].to_string()),
            foot_ulcer: Some(symptoms[1].to_string()),
        }
    }

    #[test]
    fn cded_wins_overlap_and_keeps_order() {
        let cded_rows = vec![
            cded("s1", "1", ["no", "no", "N/A"]),
            cded("s1", "2", ["yes", "yes", "yes"]),
            cded("s2", "1", ["N/A", "yes", "no"]),
        ];
        let cpd_rows = vec![
            cpd("S2", ["no", "no"]),
            cpd("P9", ["maybe", "No"]),
            cpd("P8", ["N/A", "N/A"]),
        ];

        let outcome = build_cohort(&cded_rows, &cpd_rows, "1");
        let ids: Vec<_> = outcome.cohort.iter().map(|e| e.subject_id.as_str()).collect();
        assert_eq!(ids, ["S1", "S2", "P9"]);
        assert!(!outcome.cohort[0].neuropathy);
        assert!(outcome.cohort[1].neuropathy);
        assert_eq!(outcome.cohort[1].dataset, DatasetTag::Cded);
        assert_eq!(outcome.cded_included, 2);
        assert_eq!(outcome.cpd_included, 2);
        assert_eq!(outcome.cpd_overlap_removed, 1);
        assert_eq!(outcome.input_overlap.shared_subjects, 1);
        assert_eq!(outcome.issues.len(), 1);
    }
}
