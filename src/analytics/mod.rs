//! Summary statistics for the dashboard's overview panel.

pub mod error;
pub mod frame;

use crate::analytics::error::AnalyticsError;
use crate::analytics::frame::{records_to_frame, scalar};
use crate::types::samples::{AirQualitySample, WaterQualitySample};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirSummary {
    pub average_aqi: f64,
    pub average_pm25: f64,
    pub max_aqi: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterSummary {
    pub average_ph: f64,
    pub average_turbidity: f64,
}

/// Averages AQI and PM2.5 and finds the peak AQI. `None` for an empty slice.
pub fn air_summary(records: &[AirQualitySample]) -> Result<Option<AirSummary>, AnalyticsError> {
    if records.is_empty() {
        return Ok(None);
    }
    let stats = records_to_frame(records)?
        .lazy()
        .select([
            col("aqi").mean().alias("average_aqi"),
            col("pm25").mean().alias("average_pm25"),
            col("aqi").max().alias("max_aqi"),
        ])
        .collect()?;

    Ok(Some(AirSummary {
        average_aqi: scalar(&stats, "average_aqi")?,
        average_pm25: scalar(&stats, "average_pm25")?,
        max_aqi: scalar(&stats, "max_aqi")?,
    }))
}

/// Averages pH and turbidity. `None` for an empty slice.
pub fn water_summary(
    records: &[WaterQualitySample],
) -> Result<Option<WaterSummary>, AnalyticsError> {
    if records.is_empty() {
        return Ok(None);
    }
    let stats = records_to_frame(records)?
        .lazy()
        .select([
            col("ph").mean().alias("average_ph"),
            col("turbidity").mean().alias("average_turbidity"),
        ])
        .collect()?;

    Ok(Some(WaterSummary {
        average_ph: scalar(&stats, "average_ph")?,
        average_turbidity: scalar(&stats, "average_turbidity")?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::samples::Record;

    fn air(aqi: f64, pm25: f64) -> AirQualitySample {
        let mut sample = AirQualitySample::with_timestamp("2024-01-01T00:00:00Z");
        sample.aqi = aqi;
        sample.pm25 = pm25;
        sample
    }

    #[test]
    fn air_summary_averages_and_peaks() {
        let summary = air_summary(&[air(10.0, 4.0), air(30.0, 8.0), air(20.0, 6.0)])
            .unwrap()
            .unwrap();
        assert!((summary.average_aqi - 20.0).abs() < 1e-9);
        assert!((summary.average_pm25 - 6.0).abs() < 1e-9);
        assert_eq!(summary.max_aqi, 30.0);
    }

    #[test]
    fn water_summary_averages() {
        let samples = vec![
            WaterQualitySample {
                timestamp: "a".into(),
                ph: 7.0,
                conductivity: 400.0,
                turbidity: 3.0,
            },
            WaterQualitySample {
                timestamp: "b".into(),
                ph: 7.4,
                conductivity: 480.0,
                turbidity: 4.0,
            },
        ];
        let summary = water_summary(&samples).unwrap().unwrap();
        assert!((summary.average_ph - 7.2).abs() < 1e-9);
        assert!((summary.average_turbidity - 3.5).abs() < 1e-9);
    }

    #[test]
    fn empty_inputs_have_no_summary() {
        assert_eq!(air_summary(&[]).unwrap(), None);
        assert_eq!(water_summary(&[]).unwrap(), None);
    }
}
