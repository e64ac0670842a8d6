use crate::fetching::error::FetchError;
use crate::types::date_range::DateRange;
use crate::types::samples::Record;
use async_trait::async_trait;
use log::warn;
use reqwest::Response;

/// A strategy that produces samples of one dataset for a date range.
///
/// Implementors provide [`try_fetch`](Self::try_fetch); callers normally use
/// [`fetch_samples`](Self::fetch_samples), which never fails: transport errors,
/// non-success statuses and malformed payloads all come back as an empty vector.
#[async_trait]
pub trait SampleSource: Send + Sync {
    type Sample: Record;

    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Whether the samples are synthesized rather than measured, so front ends
    /// can label them.
    fn is_simulated(&self) -> bool {
        false
    }

    async fn try_fetch(&self, range: &DateRange) -> Result<Vec<Self::Sample>, FetchError>;

    async fn fetch_samples(&self, range: &DateRange) -> Vec<Self::Sample> {
        fail_soft(self.name(), range, self.try_fetch(range).await)
    }
}

/// Replaces a fetch error with an empty result, logging it.
pub(crate) fn fail_soft<T>(
    source: &str,
    range: &DateRange,
    result: Result<Vec<T>, FetchError>,
) -> Vec<T> {
    match result {
        Ok(samples) => samples,
        Err(e) => {
            warn!(
                "{} fetch for {} failed, returning no data: {}",
                source, range, e
            );
            Vec::new()
        }
    }
}

/// Turns a non-success HTTP status into a [`FetchError`].
pub(crate) fn ensure_success(response: Response, url: &str) -> Result<Response, FetchError> {
    match response.error_for_status() {
        Ok(resp) => Ok(resp),
        Err(e) => {
            warn!("HTTP error for {}: {:?}", url, e);
            Err(match e.status() {
                Some(status) => FetchError::HttpStatus {
                    url: url.to_string(),
                    status,
                    source: e,
                },
                None => FetchError::NetworkRequest(url.to_string(), e),
            })
        }
    }
}
