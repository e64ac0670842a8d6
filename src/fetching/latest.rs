//! Last-request-wins bookkeeping for callers that re-query when the date range
//! changes before an earlier fetch has resolved.

use crate::types::date_range::DateRange;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};

/// Issued by [`LatestRequest::begin`]; identifies one in-flight query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    /// The range the query was started for.
    pub range: DateRange,
}

/// Tracks which query is the most recent one.
///
/// Start every query with [`begin`](Self::begin) and pass its result through
/// [`settle`](Self::settle); results of superseded queries are dropped.
///
/// # Examples
///
/// ```
/// use envdash::{DateRange, LatestRequest};
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
/// let latest = LatestRequest::new();
/// let january = latest.begin(DateRange::new(d(1), d(31)));
/// let first_week = latest.begin(DateRange::new(d(1), d(8)));
///
/// assert_eq!(latest.settle(&january, "late january data"), None);
/// assert_eq!(latest.settle(&first_week, "week data"), Some("week data"));
/// ```
#[derive(Debug, Default)]
pub struct LatestRequest {
    generation: AtomicU64,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a query for `range`, superseding every earlier ticket.
    pub fn begin(&self, range: DateRange) -> RequestTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket { generation, range }
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Hands back `value` if `ticket` is still the latest query, `None` otherwise.
    pub fn settle<T>(&self, ticket: &RequestTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            debug!("Discarding stale result for {}", ticket.range);
            None
        }
    }
}
