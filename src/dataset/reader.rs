//! CSV table loading through Arrow

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use log::debug;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::error::util::safe_open_file;
use crate::error::{CohortError, Result};
use crate::utils::logging::log_table_read;

/// Default batch size for CSV reading
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// Read a CSV file with a header row into record batches
///
/// Column names come from the header and every column is read as nullable
/// text, so identifiers such as `007` keep their leading zeros. Empty cells
/// and cells missing from short rows become nulls.
///
/// # Arguments
/// * `path` - Path to the CSV file
/// * `role` - What the table is used for, named in the error if it is missing
pub fn read_csv_table(path: &Path, role: &str) -> Result<(Arc<Schema>, Vec<RecordBatch>)> {
    let start = Instant::now();
    debug!("Reading {role} from {}", path.display());

    let mut file = safe_open_file(path, role)?;
    let (header, _) = Format::default()
        .with_header(true)
        .infer_schema(&mut file, Some(0))?;
    file.rewind().map_err(|e| CohortError::io(path, e))?;

    let schema = Arc::new(text_schema(&header));
    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .with_truncated_rows(true)
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .build(file)?;

    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;

    let rows = batches.iter().map(RecordBatch::num_rows).sum();
    log_table_read(role, path, rows, start.elapsed());
    Ok((schema, batches))
}

/// The same column names, all typed as nullable UTF-8
fn text_schema(header: &Schema) -> Schema {
    Schema::new(
        header
            .fields()
            .iter()
            .map(|f| Field::new(f.name(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    )
}
