use thiserror::Error;

/// Why an upstream fetch produced no data.
///
/// These never reach callers of [`crate::SampleSource::fetch_samples`]; they are
/// logged and replaced by an empty result there. [`crate::SampleSource::try_fetch`]
/// exposes them for diagnostics.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse JSON payload from {0}")]
    JsonParse(String, #[source] serde_json::Error),

    // The transport succeeded but the payload reports a failure.
    #[error("Service at {url} reported status '{status}'")]
    ServiceStatus { url: String, status: String },
}
