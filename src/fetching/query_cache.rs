use crate::fetching::error::FetchError;
use crate::fetching::source::fail_soft;
use crate::types::dataset_kind::DatasetKind;
use crate::types::date_range::DateRange;
use crate::types::samples::Record;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::collections::{hash_map::Entry, HashMap, VecDeque};
use std::future::Future;
use tokio::sync::Mutex;

/// Cache key: the dataset and the exact query window.
pub type QueryKey = (DatasetKind, DateTime<Utc>, DateTime<Utc>);

/// Number of batches a [`QueryCache`] keeps per dataset unless told otherwise.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Remembers successful fetches of one dataset per date range.
///
/// Failed fetches are not stored, so a later query for the same range tries again.
/// At most `capacity` batches are kept; inserting past that evicts the oldest.
pub struct QueryCache<R: Record> {
    capacity: usize,
    state: Mutex<CacheState<R>>,
}

struct CacheState<R> {
    entries: HashMap<QueryKey, Vec<R>>,
    // Insertion order, oldest first.
    order: VecDeque<QueryKey>,
}

impl<R: Record> Default for QueryCache<R> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl<R: Record> QueryCache<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache holding at most `capacity` batches (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn key(range: &DateRange) -> QueryKey {
        (R::KIND, range.start, range.end)
    }

    /// Returns the cached batch for `range`, or runs `fetch` and caches its result.
    ///
    /// A failing `fetch` yields an empty batch, like
    /// [`crate::SampleSource::fetch_samples`], and leaves the cache unchanged.
    pub async fn get_or_fetch<F, Fut>(&self, source: &str, range: &DateRange, fetch: F) -> Vec<R>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<R>, FetchError>>,
    {
        let key = Self::key(range);

        // --- Fast path: already cached ---
        {
            let state = self.state.lock().await;
            if let Some(cached) = state.entries.get(&key) {
                info!("Cache hit for {} data over {}", R::KIND, range);
                return cached.clone();
            }
        } // Lock released before fetching

        // --- Slow path: fetch outside the lock ---
        let fetched = match fetch().await {
            Ok(samples) => samples,
            Err(e) => return fail_soft(source, range, Err(e)),
        };

        let mut state = self.state.lock().await;
        let CacheState { entries, order } = &mut *state;
        let batch = match entries.entry(key) {
            // Another caller filled this key while we were fetching; keep theirs.
            Entry::Occupied(entry) => return entry.get().clone(),
            Entry::Vacant(entry) => {
                order.push_back(key);
                entry.insert(fetched.clone());
                fetched
            }
        };
        while entries.len() > self.capacity {
            let Some(oldest) = order.pop_front() else {
                break;
            };
            entries.remove(&oldest);
            debug!("Evicted cached {} data for {}..{}", oldest.0, oldest.1, oldest.2);
        }
        batch
    }

    pub async fn contains(&self, range: &DateRange) -> bool {
        self.state.lock().await.entries.contains_key(&Self::key(range))
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.entries.is_empty()
    }

    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
        state.order.clear();
    }
}
