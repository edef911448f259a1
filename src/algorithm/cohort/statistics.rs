//! Cohort statistics and summaries

use std::collections::BTreeMap;
use std::fmt::Write;

use super::overlap::OverlapReport;
use crate::models::{CohortEntry, DatasetTag};

/// Label counts for one dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelCounts {
    /// Subjects labeled with neuropathy
    pub neuropathy: usize,
    /// Subjects labeled healthy
    pub healthy: usize,
}

impl LabelCounts {
    /// Total subjects
    #[must_use]
    pub const fn total(&self) -> usize {
        self.neuropathy + self.healthy
    }
}

/// Basic statistics of a merged cohort
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CohortStats {
    /// Counts for the whole cohort
    pub overall: LabelCounts,
    /// Counts per dataset
    pub by_dataset: BTreeMap<DatasetTag, LabelCounts>,
}

/// Functions for cohort statistics and summaries
pub struct CohortStatistics;

impl CohortStatistics {
    /// Count labels overall and per dataset
    #[must_use]
    pub fn calculate(cohort: &[CohortEntry]) -> CohortStats {
        let mut stats = CohortStats::default();
        for entry in cohort {
            let per_dataset = stats.by_dataset.entry(entry.dataset).or_default();
            if entry.neuropathy {
                stats.overall.neuropathy += 1;
                per_dataset.neuropathy += 1;
            } else {
                stats.overall.healthy += 1;
                per_dataset.healthy += 1;
            }
        }
        stats
    }

    /// Render a human-readable summary of the cohort
    #[must_use]
    pub fn generate_summary(stats: &CohortStats, overlap: Option<&OverlapReport>) -> String {
        let mut summary = String::new();
        let _ = writeln!(summary, "Cohort Summary:");
        let _ = writeln!(summary, "  Total Subjects: {}", stats.overall.total());
        let _ = writeln!(
            summary,
            "  Neuropathy: {} ({:.1}%)",
            stats.overall.neuropathy,
            percentage(stats.overall.neuropathy, stats.overall.total())
        );
        let _ = writeln!(summary, "  Healthy: {}", stats.overall.healthy);

        for (dataset, counts) in &stats.by_dataset {
            let _ = writeln!(
                summary,
                "  {dataset}: {} subjects, {} neuropathy, {} healthy",
                counts.total(),
                counts.neuropathy,
                counts.healthy
            );
        }

        if let Some(overlap) = overlap {
            let _ = writeln!(summary, "  Qualifying overlap: {overlap}");
        }

        summary
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
