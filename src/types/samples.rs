//! Defines the typed air- and water-quality samples and the [`Record`] trait that
//! lets the table engine, exporter and analytics address their fields by name.

use crate::types::dataset_kind::DatasetKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field value borrowed from a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// The ISO-8601 timestamp string, as received.
    Text(&'a str),
    /// A measurement.
    Number(f64),
}

impl FieldValue<'_> {
    /// Returns the numeric value, or `None` for text fields.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            FieldValue::Text(_) => None,
        }
    }
}

/// Renders the natural string form of the value: text verbatim, numbers with
/// the shortest decimal representation (`20` for `20.0`, `7.23` for `7.23`).
impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(value) => write!(f, "{}", value),
        }
    }
}

/// A dense, timestamp-keyed sample whose fields can be read and written by name.
///
/// `FIELDS` is the fixed export order and always starts with `"timestamp"`;
/// every other entry names a numeric field. Name lookups are case-insensitive.
pub trait Record: Clone + Send + Sync + 'static {
    /// The dataset this record type belongs to.
    const KIND: DatasetKind;
    /// Field names in export order, led by `timestamp`.
    const FIELDS: &'static [&'static str];
    /// Human readable column labels, parallel to `FIELDS`.
    const HEADERS: &'static [&'static str];

    /// Creates a record for `timestamp` with every numeric field set to zero.
    fn with_timestamp(timestamp: impl Into<String>) -> Self;

    fn timestamp(&self) -> &str;

    /// Looks up a field by name. Returns `None` for names the record does not declare.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Overwrites the numeric field called `name`.
    ///
    /// Returns `false` (and leaves the record untouched) when `name` is not a
    /// numeric field of this record.
    fn set_number(&mut self, name: &str, value: f64) -> bool;

    /// The numeric field names, i.e. `FIELDS` without the leading timestamp.
    fn numeric_fields() -> &'static [&'static str] {
        &Self::FIELDS[1..]
    }

    /// All field values in `FIELDS` order.
    fn values(&self) -> Vec<FieldValue<'_>> {
        Self::FIELDS
            .iter()
            .filter_map(|name| self.field(name))
            .collect()
    }
}

/// One air-quality observation. Pollutant concentrations as delivered by the
/// upstream source; `aqi` is the composite Air Quality Index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySample {
    pub timestamp: String,
    pub aqi: f64,
    pub co: f64,
    pub no: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm25: f64,
    pub pm10: f64,
    pub nh3: f64,
}

impl Record for AirQualitySample {
    const KIND: DatasetKind = DatasetKind::Air;
    const FIELDS: &'static [&'static str] = &[
        "timestamp", "aqi", "co", "no", "no2", "o3", "so2", "pm25", "pm10", "nh3",
    ];
    const HEADERS: &'static [&'static str] = &[
        "Timestamp", "AQI", "CO", "NO", "NO2", "O3", "SO2", "PM2.5", "PM10", "NH3",
    ];

    fn with_timestamp(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            ..Default::default()
        }
    }

    fn timestamp(&self) -> &str {
        &self.timestamp
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name.to_ascii_lowercase().as_str() {
            "timestamp" => return Some(FieldValue::Text(&self.timestamp)),
            "aqi" => self.aqi,
            "co" => self.co,
            "no" => self.no,
            "no2" => self.no2,
            "o3" => self.o3,
            "so2" => self.so2,
            "pm25" => self.pm25,
            "pm10" => self.pm10,
            "nh3" => self.nh3,
            _ => return None,
        };
        Some(FieldValue::Number(value))
    }

    fn set_number(&mut self, name: &str, value: f64) -> bool {
        let slot = match name.to_ascii_lowercase().as_str() {
            "aqi" => &mut self.aqi,
            "co" => &mut self.co,
            "no" => &mut self.no,
            "no2" => &mut self.no2,
            "o3" => &mut self.o3,
            "so2" => &mut self.so2,
            "pm25" => &mut self.pm25,
            "pm10" => &mut self.pm10,
            "nh3" => &mut self.nh3,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// One water-quality observation.
///
/// No live source exists for these; they come from
/// [`crate::WaterSimulator`] unless the caller plugs in another source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterQualitySample {
    pub timestamp: String,
    /// pH on the 0-14 scale, typically 6.5-8.
    pub ph: f64,
    /// Electrical conductivity in µS/cm.
    pub conductivity: f64,
    /// Turbidity in NTU.
    pub turbidity: f64,
}

impl Record for WaterQualitySample {
    const KIND: DatasetKind = DatasetKind::Water;
    const FIELDS: &'static [&'static str] = &["timestamp", "ph", "conductivity", "turbidity"];
    const HEADERS: &'static [&'static str] = &["Timestamp", "pH", "Conductivity", "Turbidity"];

    fn with_timestamp(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            ..Default::default()
        }
    }

    fn timestamp(&self) -> &str {
        &self.timestamp
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value = match name.to_ascii_lowercase().as_str() {
            "timestamp" => return Some(FieldValue::Text(&self.timestamp)),
            "ph" => self.ph,
            "conductivity" => self.conductivity,
            "turbidity" => self.turbidity,
            _ => return None,
        };
        Some(FieldValue::Number(value))
    }

    fn set_number(&mut self, name: &str, value: f64) -> bool {
        let slot = match name.to_ascii_lowercase().as_str() {
            "ph" => &mut self.ph,
            "conductivity" => &mut self.conductivity,
            "turbidity" => &mut self.turbidity,
            _ => return false,
        };
        *slot = value;
        true
    }
}
