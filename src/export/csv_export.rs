//! CSV serialization of record sequences.

use crate::export::error::ExportError;
use crate::types::dataset_kind::DatasetKind;
use crate::types::date_range::{format_timestamp, DateRange};
use crate::types::samples::{FieldValue, Record};
use log::warn;

/// Timestamp layout of exported rows, in UTC.
pub const EXPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serializes `records` as CSV: a header row of field names, then one row per
/// record in input order.
///
/// `kind` must name the dataset `R` belongs to, otherwise
/// [`ExportError::KindMismatch`] is returned before anything is written.
/// An empty input produces only the header row.
///
/// # Examples
///
/// ```
/// use envdash::{serialize, DatasetKind, Record, WaterQualitySample};
///
/// let mut sample = WaterQualitySample::with_timestamp("2024-01-01T08:00:00.000Z");
/// sample.ph = 7.1;
/// sample.conductivity = 450.0;
/// sample.turbidity = 3.25;
///
/// let csv = serialize(&[sample], DatasetKind::Water).unwrap();
/// assert_eq!(csv, "timestamp,ph,conductivity,turbidity\n2024-01-01 08:00:00,7.1,450,3.25\n");
/// ```
pub fn serialize<R: Record>(records: &[R], kind: DatasetKind) -> Result<String, ExportError> {
    if kind != R::KIND {
        return Err(ExportError::KindMismatch {
            expected: kind,
            found: R::KIND,
        });
    }

    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(R::FIELDS)?;
    for record in records {
        writer.write_record(record.values().iter().map(export_cell))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(std::io::Error::new(e.error().kind(), e.to_string())))?;
    Ok(String::from_utf8(bytes)?)
}

fn export_cell(value: &FieldValue<'_>) -> String {
    match value {
        FieldValue::Text(raw) => format_timestamp(raw, EXPORT_TIME_FORMAT).unwrap_or_else(|| {
            warn!("Exporting unparseable timestamp '{}' as-is", raw);
            raw.to_string()
        }),
        FieldValue::Number(number) => number.to_string(),
    }
}

/// The download name for `kind` over `range`, e.g.
/// `air-quality-data-2024-01-01-to-2024-01-31.csv`.
pub fn export_filename(kind: DatasetKind, range: &DateRange) -> String {
    format!(
        "{}-quality-data-{}-to-{}.csv",
        kind,
        range.start.format("%Y-%m-%d"),
        range.end.format("%Y-%m-%d")
    )
}
