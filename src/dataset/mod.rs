//! Source dataset tables
//!
//! Each study exports its own table layout. Every layout has a typed raw
//! row struct deserialized straight from Arrow record batches with
//! `serde_arrow`, and knows how to normalize itself into a `SubjectRecord`.

pub mod cded;
pub mod cpd;
pub mod reader;

use arrow::datatypes::Schema;
use log::warn;
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::algorithm::cohort::Normalizer;
use crate::error::{CohortError, Result};
use crate::models::{DatasetTag, SubjectRecord};

pub use cded::CdedRow;
pub use cpd::CpdRow;
pub use reader::read_csv_table;

/// A row of a dataset-specific subject table
pub trait RawSubjectRow: DeserializeOwned {
    /// Dataset the layout belongs to
    const DATASET: DatasetTag;

    /// Columns the layout reads, identifier first
    const COLUMNS: &'static [&'static str];

    /// Raw identifier cell
    fn subject_id(&self) -> Option<&str>;

    /// Normalize the row into the shared record shape
    fn to_record(&self, subject_id: &str, normalizer: &mut Normalizer) -> SubjectRecord;
}

/// Check a table's columns against a layout
///
/// A missing identifier column is fatal. Any other missing column is
/// logged; its values read as missing for every row.
pub fn check_columns<R: RawSubjectRow>(schema: &Schema) -> Result<()> {
    let id_column = R::DATASET.id_column();
    if schema.index_of(id_column).is_err() {
        return Err(CohortError::MissingColumn {
            dataset: R::DATASET.to_string(),
            column: id_column.to_string(),
        });
    }

    for column in R::COLUMNS.iter().filter(|c| schema.index_of(c).is_err()) {
        warn!(
            "{} table has no {column} column; every row will read it as missing",
            R::DATASET
        );
    }
    Ok(())
}

/// Load a dataset table into typed raw rows
pub fn load_table<R: RawSubjectRow>(path: &Path) -> Result<Vec<R>> {
    let role = format!("{} subject table", R::DATASET);
    let (schema, batches) = read_csv_table(path, &role)?;
    check_columns::<R>(&schema)?;

    let mut rows = Vec::new();
    for batch in &batches {
        rows.extend(serde_arrow::from_record_batch::<Vec<R>>(batch)?);
    }
    Ok(rows)
}
