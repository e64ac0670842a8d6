use crate::types::samples::{FieldValue, Record};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The single active sort of a table view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    pub fn ascending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Descending)
    }

    /// The sort that results from clicking the `key` column header.
    ///
    /// Unsorted, or sorted by another column, becomes ascending on `key`;
    /// ascending flips to descending; descending clears the sort. Column names
    /// compare case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use envdash::SortSpec;
    ///
    /// let first = SortSpec::cycle(None, "aqi");
    /// assert_eq!(first, Some(SortSpec::ascending("aqi")));
    /// let second = SortSpec::cycle(first.as_ref(), "aqi");
    /// assert_eq!(second, Some(SortSpec::descending("aqi")));
    /// assert_eq!(SortSpec::cycle(second.as_ref(), "aqi"), None);
    /// ```
    pub fn cycle(current: Option<&SortSpec>, key: &str) -> Option<SortSpec> {
        match current {
            Some(spec) if spec.key.eq_ignore_ascii_case(key) => match spec.direction {
                SortDirection::Ascending => Some(SortSpec::descending(key)),
                SortDirection::Descending => None,
            },
            _ => Some(SortSpec::ascending(key)),
        }
    }

    /// Whether records of type `R` have a field called `key`.
    pub fn applies_to<R: Record>(&self) -> bool {
        R::FIELDS
            .iter()
            .any(|name| name.eq_ignore_ascii_case(&self.key))
    }

    /// Orders two records by `key`: numerically for measurements, lexically for
    /// the ISO-8601 timestamp. Reversed when descending.
    pub fn compare<R: Record>(&self, a: &R, b: &R) -> Ordering {
        let ordering = match (a.field(&self.key), b.field(&self.key)) {
            (Some(FieldValue::Number(x)), Some(FieldValue::Number(y))) => {
                OrderedFloat(x).cmp(&OrderedFloat(y))
            }
            (Some(FieldValue::Text(x)), Some(FieldValue::Text(y))) => x.cmp(y),
            _ => Ordering::Equal,
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::samples::AirQualitySample;

    fn air(ts: &str, aqi: f64) -> AirQualitySample {
        let mut sample = AirQualitySample::with_timestamp(ts);
        sample.aqi = aqi;
        sample
    }

    #[test]
    fn compares_numbers_numerically() {
        let spec = SortSpec::ascending("aqi");
        assert_eq!(spec.compare(&air("a", 9.0), &air("b", 10.0)), Ordering::Less);
        let spec = SortSpec::descending("aqi");
        assert_eq!(spec.compare(&air("a", 9.0), &air("b", 10.0)), Ordering::Greater);
    }

    #[test]
    fn compares_timestamps_lexically() {
        let spec = SortSpec::ascending("timestamp");
        let earlier = air("2024-01-01T09:00:00Z", 0.0);
        let later = air("2024-01-01T10:00:00Z", 0.0);
        assert_eq!(spec.compare(&earlier, &later), Ordering::Less);
    }

    #[test]
    fn key_matching_is_case_insensitive() {
        assert!(SortSpec::ascending("PM25").applies_to::<AirQualitySample>());
        assert!(!SortSpec::ascending("ph").applies_to::<AirQualitySample>());
    }

    #[test]
    fn cycle_ignores_key_case() {
        let first = SortSpec::cycle(None, "AQI");
        let second = SortSpec::cycle(first.as_ref(), "aqi");
        assert_eq!(second, Some(SortSpec::descending("aqi")));
        assert_eq!(SortSpec::cycle(second.as_ref(), "Aqi"), None);
    }

    #[test]
    fn clicking_another_column_restarts_ascending() {
        let current = SortSpec::descending("aqi");
        assert_eq!(
            SortSpec::cycle(Some(&current), "pm10"),
            Some(SortSpec::ascending("pm10"))
        );
    }
}
