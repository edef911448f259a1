//! A library for building a labeled neuropathy cohort from clinical study
//! exports and routing the subjects' ECG signal files by label.

pub mod algorithm;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod utils;

// Re-export the most common types for easier use
pub use config::CohortConfig;
pub use error::{CohortError, Result};
pub use models::{Bucket, CohortEntry, DatasetTag, FileRoutingDecision, SubjectRecord, TriState};

// Cohort operations
pub use algorithm::cohort::{derive_label, filter_cohort, merge_cohorts, normalize_indicators};
pub use algorithm::routing::{IdWindow, route_files};

// Pipeline entry points
pub use pipeline::{CohortOutcome, RunSummary, build_cohort, run};
