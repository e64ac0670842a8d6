//! Pivots parameter-per-entry measurements into dense per-timestamp records.

use crate::fetching::raw::RawMeasurement;
use crate::types::samples::{AirQualitySample, Record};
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Groups raw air measurements by timestamp into dense [`AirQualitySample`]s.
///
/// See [`normalize_into`] for the grouping rules.
pub fn normalize<I>(raw: I) -> Vec<AirQualitySample>
where
    I: IntoIterator<Item = RawMeasurement>,
{
    normalize_into(raw)
}

/// Groups raw measurements by exact timestamp string into dense records of type `R`.
///
/// Each distinct timestamp yields one record, seeded with zeros, in the order the
/// timestamp was first seen. Every entry then overwrites the field named by its
/// parameter, so repeated parameters for a timestamp keep the last value.
/// Parameters the record does not declare are ignored.
pub fn normalize_into<R, I>(raw: I) -> Vec<R>
where
    R: Record,
    I: IntoIterator<Item = RawMeasurement>,
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut records: Vec<R> = Vec::new();

    for measurement in raw {
        let slot = match slots.entry(measurement.timestamp) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                records.push(R::with_timestamp(entry.key().clone()));
                *entry.insert(records.len() - 1)
            }
        };
        if !records[slot].set_number(&measurement.parameter, measurement.value) {
            debug!(
                "Ignoring unknown {} parameter '{}'",
                R::KIND,
                measurement.parameter
            );
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::samples::{FieldValue, WaterQualitySample};
    use std::collections::HashSet;

    fn m(ts: &str, parameter: &str, value: f64) -> RawMeasurement {
        RawMeasurement::new(ts, parameter, value)
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(normalize(Vec::new()).is_empty());
    }

    #[test]
    fn one_record_per_distinct_timestamp_in_first_seen_order() {
        let raw = vec![
            m("2024-01-01T02:00:00Z", "pm25", 40.0),
            m("2024-01-01T01:00:00Z", "pm25", 35.0),
            m("2024-01-01T02:00:00Z", "no2", 18.0),
            m("2024-01-01T03:00:00Z", "o3", 60.0),
            m("2024-01-01T01:00:00Z", "co", 0.3),
        ];
        let distinct: HashSet<&str> = raw.iter().map(|r| r.timestamp.as_str()).collect();
        let records = normalize(raw.clone());

        assert_eq!(records.len(), distinct.len());
        let order: Vec<&str> = records.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "2024-01-01T02:00:00Z",
                "2024-01-01T01:00:00Z",
                "2024-01-01T03:00:00Z"
            ]
        );
        assert_eq!(records[0].pm25, 40.0);
        assert_eq!(records[0].no2, 18.0);
        assert_eq!(records[1].pm25, 35.0);
        assert_eq!(records[1].co, 0.3);
    }

    #[test]
    fn unsupplied_fields_are_zero() {
        let records = normalize(vec![m("t1", "pm10", 80.0)]);
        for name in AirQualitySample::numeric_fields() {
            let expected = if *name == "pm10" { 80.0 } else { 0.0 };
            assert_eq!(records[0].field(name), Some(FieldValue::Number(expected)));
        }
    }

    #[test]
    fn duplicate_parameter_last_write_wins() {
        let records = normalize(vec![
            m("t1", "pm25", 10.0),
            m("t1", "so2", 2.0),
            m("t1", "pm25", 12.0),
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pm25, 12.0);
        assert_eq!(records[0].so2, 2.0);
    }

    #[test]
    fn parameter_names_are_case_insensitive_and_unknown_ones_ignored() {
        let records = normalize(vec![m("t1", "PM25", 9.0), m("t1", "bc", 3.0)]);
        assert_eq!(records[0].pm25, 9.0);
        let total: f64 = AirQualitySample::numeric_fields()
            .iter()
            .filter_map(|name| records[0].field(name).and_then(|v| v.as_number()))
            .sum();
        assert_eq!(total, 9.0);
    }

    #[test]
    fn unknown_only_timestamp_still_yields_a_zero_record() {
        let records = normalize(vec![m("t1", "um100", 1.0)]);
        assert_eq!(records, vec![AirQualitySample::with_timestamp("t1")]);
    }

    #[test]
    fn generic_normalization_works_for_water_records() {
        let records: Vec<WaterQualitySample> =
            normalize_into(vec![m("d1", "pH", 7.1), m("d1", "turbidity", 4.0)]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ph, 7.1);
        assert_eq!(records[0].conductivity, 0.0);
        assert_eq!(records[0].turbidity, 4.0);
    }
}
