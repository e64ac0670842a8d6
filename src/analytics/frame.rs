use crate::analytics::error::AnalyticsError;
use crate::types::samples::Record;
use polars::prelude::*;

/// Builds a `DataFrame` with one column per field of `R`: `timestamp` as
/// strings, every measurement as `f64`.
pub fn records_to_frame<R: Record>(records: &[R]) -> Result<DataFrame, AnalyticsError> {
    let mut columns = Vec::with_capacity(R::FIELDS.len());

    let timestamps: Vec<&str> = records.iter().map(|r| r.timestamp()).collect();
    columns.push(Column::new("timestamp".into(), timestamps));

    for name in R::numeric_fields() {
        let values: Vec<f64> = records
            .iter()
            .map(|r| r.field(name).and_then(|v| v.as_number()).unwrap_or_default())
            .collect();
        columns.push(Column::new((*name).into(), values));
    }

    Ok(DataFrame::new(columns)?)
}

/// Reads row 0 of a single-row statistics frame.
pub(crate) fn scalar(df: &DataFrame, name: &str) -> Result<f64, AnalyticsError> {
    df.column(name)?
        .f64()?
        .get(0)
        .ok_or_else(|| AnalyticsError::MissingStatistic(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::samples::{AirQualitySample, WaterQualitySample};

    #[test]
    fn frame_has_a_column_per_field() {
        let mut sample = AirQualitySample::with_timestamp("2024-01-01T00:00:00Z");
        sample.no2 = 31.5;
        let df = records_to_frame(&[sample.clone(), sample]).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), AirQualitySample::FIELDS.len());
        assert_eq!(df.column("no2").unwrap().f64().unwrap().get(1), Some(31.5));
        assert_eq!(
            df.column("timestamp").unwrap().str().unwrap().get(0),
            Some("2024-01-01T00:00:00Z")
        );
    }

    #[test]
    fn empty_input_gives_empty_frame() {
        let df = records_to_frame::<WaterQualitySample>(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 4);
    }
}
