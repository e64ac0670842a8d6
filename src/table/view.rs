//! Derives the displayed table from a record sequence: free-text search,
//! numeric range filters and a single-key sort.

use crate::table::filter::FilterSet;
use crate::table::sort::SortSpec;
use crate::types::samples::Record;
use serde::{Deserialize, Serialize};

/// Whether any field of `record`, in its natural string form, contains
/// `term` ignoring case. An empty term matches every record.
pub fn matches_search<R: Record>(record: &R, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    record
        .values()
        .iter()
        .any(|value| value.to_string().to_lowercase().contains(&needle))
}

/// Returns the records that match `search_term` and `filters`, ordered by `sort`.
///
/// The input is left untouched. Without a sort, or with a sort key the record
/// type does not have, input order is kept. The sort is stable, so records with
/// equal keys keep their relative input order in both directions.
///
/// # Examples
///
/// ```
/// use envdash::{view, AirQualitySample, FilterSet, RangeFilter, Record, SortSpec};
///
/// let records: Vec<AirQualitySample> = [10.0, 30.0, 20.0]
///     .iter()
///     .enumerate()
///     .map(|(i, aqi)| {
///         let mut s = AirQualitySample::with_timestamp(format!("2024-01-0{}T00:00:00Z", i + 1));
///         s.aqi = *aqi;
///         s
///     })
///     .collect();
///
/// let sorted = view(&records, "", &FilterSet::new(), Some(&SortSpec::ascending("aqi")));
/// let aqi: Vec<f64> = sorted.iter().map(|s| s.aqi).collect();
/// assert_eq!(aqi, vec![10.0, 20.0, 30.0]);
///
/// let filters = FilterSet::new().with("aqi", RangeFilter::between(15.0, 25.0));
/// let filtered = view(&records, "", &filters, None);
/// assert_eq!(filtered.len(), 1);
/// assert_eq!(filtered[0].aqi, 20.0);
/// ```
pub fn view<R: Record>(
    records: &[R],
    search_term: &str,
    filters: &FilterSet,
    sort: Option<&SortSpec>,
) -> Vec<R> {
    let mut rows: Vec<R> = records
        .iter()
        .filter(|record| matches_search(*record, search_term) && filters.matches(*record))
        .cloned()
        .collect();

    if let Some(spec) = sort.filter(|spec| spec.applies_to::<R>()) {
        rows.sort_by(|a, b| spec.compare(a, b));
    }
    rows
}

/// The search, filter and sort state of one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableQuery {
    pub search: String,
    pub filters: FilterSet,
    pub sort: Option<SortSpec>,
}

impl TableQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Advances the sort as a click on the `key` column header would.
    pub fn toggle_sort(&mut self, key: &str) {
        self.sort = SortSpec::cycle(self.sort.as_ref(), key);
    }

    pub fn apply<R: Record>(&self, records: &[R]) -> Vec<R> {
        view(records, &self.search, &self.filters, self.sort.as_ref())
    }
}
