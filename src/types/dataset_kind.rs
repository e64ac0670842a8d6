//! Defines the kinds of dataset the dashboard works with.

use crate::export::error::ExportError;
use crate::types::samples::{AirQualitySample, Record, WaterQualitySample};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which time series a record sequence belongs to.
///
/// Used to pick the export schema and filename, and as part of the query cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// Air-quality measurements fetched from an upstream service.
    Air,
    /// Water-quality samples (simulated unless another source is plugged in).
    Water,
}

impl DatasetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Air => "air",
            DatasetKind::Water => "water",
        }
    }

    /// The fixed field list of this kind, in export order.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::Air => AirQualitySample::FIELDS,
            DatasetKind::Water => WaterQualitySample::FIELDS,
        }
    }

    /// A tab label for the dataset.
    pub fn label(&self) -> &'static str {
        match self {
            DatasetKind::Air => "Air Quality Data",
            DatasetKind::Water => "Water Quality Data",
        }
    }
}

/// Allows formatting a `DatasetKind` with its lowercase name.
///
/// # Examples
///
/// ```
/// use envdash::DatasetKind;
///
/// assert_eq!(DatasetKind::Air.to_string(), "air");
/// assert_eq!(format!("{}", DatasetKind::Water), "water");
/// ```
impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "air" => Ok(DatasetKind::Air),
            "water" => Ok(DatasetKind::Water),
            _ => Err(ExportError::UnknownKind(s.to_string())),
        }
    }
}
