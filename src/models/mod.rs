//! Domain models for cohort construction

pub mod subject;
pub mod types;

pub use subject::{
    CohortEntry, CohortRow, FileRoutingDecision, Indicators, SubjectRecord, canonical_id,
};
pub use types::{Bucket, DatasetTag, TriState};
