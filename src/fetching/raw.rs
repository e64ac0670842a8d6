//! Wire shapes of the upstream air-quality services and the parsing step that
//! turns them into validated values.

use log::warn;
use serde::Deserialize;
use std::collections::HashMap;

/// One scalar observation as delivered by a parameter-oriented source.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMeasurement {
    pub timestamp: String,
    /// Name of the measured quantity, e.g. `"pm25"`. Matched case-insensitively.
    pub parameter: String,
    pub value: f64,
}

impl RawMeasurement {
    pub fn new(timestamp: impl Into<String>, parameter: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            parameter: parameter.into(),
            value,
        }
    }
}

// --- Measurement-list API ---

#[derive(Debug, Deserialize)]
struct MeasurementsResponse {
    // Entries are kept as raw JSON so a single odd entry does not sink the batch.
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct MeasurementEntry {
    date: MeasurementDate,
    parameter: String,
    value: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MeasurementDate {
    Stamped { utc: String },
    Plain(String),
}

impl From<MeasurementEntry> for RawMeasurement {
    fn from(entry: MeasurementEntry) -> Self {
        let timestamp = match entry.date {
            MeasurementDate::Stamped { utc } => utc,
            MeasurementDate::Plain(text) => text,
        };
        RawMeasurement {
            timestamp,
            parameter: entry.parameter,
            value: entry.value,
        }
    }
}

/// Parses a measurement-list response body.
///
/// A missing `results` array is an empty batch. Entries lacking a date,
/// parameter or numeric value are skipped with a warning; a body that is not a
/// JSON object at all is an error.
pub fn parse_measurements(body: &[u8]) -> Result<Vec<RawMeasurement>, serde_json::Error> {
    let response: MeasurementsResponse = serde_json::from_slice(body)?;
    let total = response.results.len();
    let measurements: Vec<RawMeasurement> = response
        .results
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<MeasurementEntry>(entry) {
            Ok(entry) => Some(entry.into()),
            Err(e) => {
                warn!("Skipping malformed measurement entry: {}", e);
                None
            }
        })
        .collect();
    if measurements.len() < total {
        warn!(
            "Kept {} of {} measurement entries",
            measurements.len(),
            total
        );
    }
    Ok(measurements)
}

// --- Current-conditions feed ---

#[derive(Debug, Deserialize)]
struct FeedResponse {
    status: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct FeedData {
    aqi: f64,
    #[serde(default)]
    iaqi: HashMap<String, FeedReading>,
}

#[derive(Debug, Deserialize)]
struct FeedReading {
    v: f64,
}

/// A parsed current-conditions reading: the composite index plus individual
/// pollutant readings keyed by parameter name.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    pub aqi: f64,
    pub readings: Vec<(String, f64)>,
}

/// Outcome of parsing a feed body.
#[derive(Debug)]
pub enum FeedParse {
    Reading(FeedSnapshot),
    /// The service answered with a non-`ok` status.
    Rejected(String),
}

/// Parses a current-conditions feed body.
pub fn parse_feed(body: &[u8]) -> Result<FeedParse, serde_json::Error> {
    let response: FeedResponse = serde_json::from_slice(body)?;
    if response.status != "ok" {
        return Ok(FeedParse::Rejected(response.status));
    }
    let data: FeedData = serde_json::from_value(response.data)?;
    let mut readings: Vec<(String, f64)> = data
        .iaqi
        .into_iter()
        .map(|(name, reading)| (name, reading.v))
        .collect();
    readings.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(FeedParse::Reading(FeedSnapshot {
        aqi: data.aqi,
        readings,
    }))
}
