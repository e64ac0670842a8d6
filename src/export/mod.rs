//! Turns record sequences into downloadable CSV files.

pub mod csv_export;
pub mod error;
pub mod sink;

use crate::export::csv_export::{export_filename, serialize};
use crate::export::error::ExportError;
use crate::export::sink::DownloadSink;
use crate::types::dataset_kind::DatasetKind;
use crate::types::date_range::DateRange;
use crate::types::samples::Record;

/// Serializes `records` and hands the file to `sink` under its standard name.
/// Returns the filename that was delivered.
pub fn export<R: Record, S: DownloadSink + ?Sized>(
    records: &[R],
    kind: DatasetKind,
    range: &DateRange,
    sink: &S,
) -> Result<String, ExportError> {
    let body = serialize(records, kind)?;
    let filename = export_filename(kind, range);
    sink.deliver(&filename, body.as_bytes())?;
    Ok(filename)
}
