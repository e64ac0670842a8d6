use crate::types::samples::{FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An inclusive numeric range; a missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeFilter {
    /// NaN bounds are dropped.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min: min.filter(|v| !v.is_nan()),
            max: max.filter(|v| !v.is_nan()),
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    pub fn at_least(min: f64) -> Self {
        Self::new(Some(min), None)
    }

    pub fn at_most(max: f64) -> Self {
        Self::new(None, Some(max))
    }

    /// Builds a range from user-typed bounds. Blank or non-numeric text leaves
    /// that side unbounded.
    ///
    /// # Examples
    ///
    /// ```
    /// use envdash::RangeFilter;
    ///
    /// assert_eq!(RangeFilter::parse("15", " 25 "), RangeFilter::between(15.0, 25.0));
    /// assert_eq!(RangeFilter::parse("abc", "25"), RangeFilter::at_most(25.0));
    /// assert!(RangeFilter::parse("", "NaN").is_unbounded());
    /// ```
    pub fn parse(min: &str, max: &str) -> Self {
        Self::new(parse_bound(min), parse_bound(max))
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

fn parse_bound(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Per-field numeric range constraints, combined with logical AND.
///
/// Field names are matched case-insensitively. Constraints on fields a record
/// does not declare, or on its timestamp, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, RangeFilter>")]
pub struct FilterSet {
    #[serde(flatten)]
    ranges: HashMap<String, RangeFilter>,
}

impl From<HashMap<String, RangeFilter>> for FilterSet {
    fn from(ranges: HashMap<String, RangeFilter>) -> Self {
        let mut filters = FilterSet::new();
        for (field, range) in ranges {
            filters.set(&field, range);
        }
        filters
    }
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, field: &str, range: RangeFilter) -> Self {
        self.set(field, range);
        self
    }

    /// Sets or replaces the constraint on `field`. An unbounded range removes it.
    pub fn set(&mut self, field: &str, range: RangeFilter) {
        let key = field.to_ascii_lowercase();
        if range.is_unbounded() {
            self.ranges.remove(&key);
        } else {
            self.ranges.insert(key, range);
        }
    }

    pub fn remove(&mut self, field: &str) {
        self.ranges.remove(&field.to_ascii_lowercase());
    }

    pub fn get(&self, field: &str) -> Option<&RangeFilter> {
        self.ranges.get(&field.to_ascii_lowercase())
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.ranges
            .iter()
            .all(|(field, range)| match record.field(field) {
                Some(FieldValue::Number(value)) => range.contains(value),
                _ => true,
            })
    }
}
