//! Upstream source configuration, injected into every fetcher at construction.

use crate::fetching::error::FetchError;
use bon::Builder;
use reqwest::Client;
use std::time::Duration;

/// Base URL of the OpenAQ v2 measurements API.
pub const DEFAULT_MEASUREMENTS_URL: &str = "https://api.openaq.org/v2";
/// Base URL of the city "current conditions" feed.
pub const DEFAULT_FEED_URL: &str = "https://api.waqi.info";
/// Environment variable read by [`SourceConfig::from_env`] for the measurements API key.
pub const API_KEY_ENV: &str = "OPENAQ_API_KEY";
/// Environment variable read by [`SourceConfig::from_env`] for the feed token.
pub const FEED_TOKEN_ENV: &str = "WAQI_TOKEN";

/// Where and for which city the air-quality sources fetch their data.
///
/// # Examples
///
/// ```
/// use envdash::SourceConfig;
///
/// let config = SourceConfig::builder()
///     .city("Alexandria")
///     .limit(500)
///     .build();
/// assert_eq!(config.country, "EG");
/// assert_eq!(config.limit, 500);
/// assert!(config.api_key.is_none());
/// ```
#[derive(Debug, Clone, Builder)]
pub struct SourceConfig {
    /// Base URL of the measurement-list API.
    #[builder(into, default = DEFAULT_MEASUREMENTS_URL.to_string())]
    pub base_url: String,
    /// Base URL of the current-conditions feed.
    #[builder(into, default = DEFAULT_FEED_URL.to_string())]
    pub feed_url: String,
    #[builder(into, default = "Cairo".to_string())]
    pub city: String,
    /// ISO 3166 alpha-2 country code.
    #[builder(into, default = "EG".to_string())]
    pub country: String,
    /// Page size requested from the measurement-list API.
    #[builder(default = 1000)]
    pub limit: u32,
    /// Sent as `X-API-Key` to the measurement-list API when set.
    #[builder(into)]
    pub api_key: Option<String>,
    /// Sent as the `token` query parameter to the feed. Falls back to `"demo"`.
    #[builder(into)]
    pub feed_token: Option<String>,
    #[builder(default = Duration::from_secs(30))]
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SourceConfig {
    /// Default configuration with credentials taken from [`API_KEY_ENV`] and
    /// [`FEED_TOKEN_ENV`] when those are set.
    pub fn from_env() -> Self {
        Self::builder()
            .maybe_api_key(std::env::var(API_KEY_ENV).ok())
            .maybe_feed_token(std::env::var(FEED_TOKEN_ENV).ok())
            .build()
    }

    pub(crate) fn build_client(&self) -> Result<Client, FetchError> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(FetchError::ClientBuild)
    }
}
