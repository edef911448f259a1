//! Writing the merged cohort table

use arrow::csv::WriterBuilder;
use arrow::datatypes::{DataType, Field, FieldRef};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use crate::error::util::ensure_directory;
use crate::error::{CohortError, Result};
use crate::models::{CohortEntry, CohortRow};
use crate::utils::logging::log_table_written;

/// Fields of the output table, in column order
#[must_use]
pub fn cohort_fields() -> Vec<FieldRef> {
    vec![
        Arc::new(Field::new("patient_id", DataType::Utf8, false)),
        Arc::new(Field::new("dataset", DataType::Utf8, false)),
        Arc::new(Field::new("neuropathy_outcome", DataType::Boolean, false)),
    ]
}

/// Write the cohort as CSV with a header row
///
/// The output depends only on the entries and their order, so unchanged
/// input yields a byte-identical file.
pub fn write_cohort_table(path: &Path, cohort: &[CohortEntry]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }

    let rows: Vec<CohortRow<'_>> = cohort.iter().map(CohortRow::from).collect();
    let batch = serde_arrow::to_record_batch(&cohort_fields(), &rows)?;

    let file = File::create(path).map_err(|e| CohortError::io(path, e))?;
    let mut writer = WriterBuilder::new()
        .with_header(true)
        .build(BufWriter::new(file));
    writer.write(&batch)?;
    writer
        .into_inner()
        .flush()
        .map_err(|e| CohortError::io(path, e))?;

    log_table_written(path, cohort.len());
    Ok(())
}
