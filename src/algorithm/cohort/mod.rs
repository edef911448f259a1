//! Cohort construction
//!
//! Normalization, label derivation, inclusion filtering and the
//! cross-dataset merge. Everything here is a pure function over
//! in-memory tables.

pub mod filters;
pub mod label;
pub mod merge;
pub mod normalize;
pub mod overlap;
pub mod statistics;

pub use filters::{
    CohortFilter, FilterCriteria, SubjectFilter, dedupe_subjects, filter_cohort, label_cohort,
};
pub use label::derive_label;
pub use merge::merge_cohorts;
pub use normalize::{DataQualityIssue, NormalizedTable, Normalizer, normalize_indicators};
pub use overlap::{OverlapReport, overlap_report};
pub use statistics::{CohortStatistics, CohortStats, LabelCounts};
