//! Air-quality source backed by a measurement-list API (OpenAQ v2 style).

use crate::fetching::error::FetchError;
use crate::fetching::normalize::normalize;
use crate::fetching::raw::{parse_measurements, RawMeasurement};
use crate::fetching::source::{ensure_success, SampleSource};
use crate::types::config::SourceConfig;
use crate::types::date_range::DateRange;
use crate::types::samples::AirQualitySample;
use async_trait::async_trait;
use log::info;
use reqwest::Client;

/// Fetches per-parameter measurements for the configured city and date window
/// and normalizes them into one [`AirQualitySample`] per timestamp.
pub struct MeasurementsSource {
    config: SourceConfig,
    client: Client,
}

impl MeasurementsSource {
    pub fn new(config: SourceConfig) -> Result<Self, FetchError> {
        let client = config.build_client()?;
        Ok(Self { config, client })
    }

    /// Uses an existing HTTP client instead of building one from `config`.
    pub fn with_client(config: SourceConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/measurements",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Downloads the raw, not yet normalized, measurements for `range`.
    pub async fn fetch_raw(&self, range: &DateRange) -> Result<Vec<RawMeasurement>, FetchError> {
        let url = self.endpoint();
        let limit = self.config.limit.to_string();
        let date_from = range.start_iso();
        let date_to = range.end_iso();
        info!(
            "Requesting measurements for {}, {} over {}",
            self.config.city, self.config.country, range
        );

        let mut request = self.client.get(&url).query(&[
            ("city", self.config.city.as_str()),
            ("country", self.config.country.as_str()),
            ("limit", limit.as_str()),
            ("date_from", date_from.as_str()),
            ("date_to", date_to.as_str()),
        ]);
        if let Some(key) = &self.config.api_key {
            request = request.header("X-API-Key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;
        let response = ensure_success(response, &url)?;
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;

        let measurements = parse_measurements(&body).map_err(|e| FetchError::JsonParse(url, e))?;
        info!("Received {} raw measurements", measurements.len());
        Ok(measurements)
    }
}

#[async_trait]
impl SampleSource for MeasurementsSource {
    type Sample = AirQualitySample;

    fn name(&self) -> &'static str {
        "measurements"
    }

    async fn try_fetch(&self, range: &DateRange) -> Result<Vec<AirQualitySample>, FetchError> {
        Ok(normalize(self.fetch_raw(range).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetching::test_server::{closed_url, serve_once};
    use chrono::NaiveDate;

    fn january() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
    }

    fn source_for(base_url: String) -> MeasurementsSource {
        MeasurementsSource::new(SourceConfig::builder().base_url(base_url).build()).unwrap()
    }

    const BODY: &str = r#"{"results": [
        {"parameter": "pm25", "value": 41.5, "date": {"utc": "2024-01-01T00:00:00Z"}},
        {"parameter": "no2", "value": 18.0, "date": {"utc": "2024-01-01T00:00:00Z"}},
        {"parameter": "pm25", "value": 37.0, "date": {"utc": "2024-01-01T01:00:00Z"}}
    ]}"#;

    #[tokio::test]
    async fn fetches_and_normalizes_measurements() {
        let (base_url, request) = serve_once(200, BODY).await;
        let samples = source_for(base_url).fetch_samples(&january()).await;

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].timestamp, "2024-01-01T00:00:00Z");
        assert_eq!(samples[0].pm25, 41.5);
        assert_eq!(samples[0].no2, 18.0);
        assert_eq!(samples[1].pm25, 37.0);
        assert_eq!(samples[1].no2, 0.0);

        let request_line = request.await.unwrap();
        assert!(request_line.starts_with("GET /measurements?"), "{request_line}");
        assert!(request_line.contains("city=Cairo"));
        assert!(request_line.contains("country=EG"));
        assert!(request_line.contains("limit=1000"));
        assert!(request_line.contains("date_from=2024-01-01T00%3A00%3A00.000Z"));
        assert!(request_line.contains("date_to=2024-01-31T00%3A00%3A00.000Z"));
    }

    #[tokio::test]
    async fn server_error_is_an_empty_result() {
        let (base_url, _request) = serve_once(503, r#"{"detail": "maintenance"}"#).await;
        let source = source_for(base_url);
        assert!(source.fetch_samples(&january()).await.is_empty());
    }

    #[tokio::test]
    async fn server_error_is_typed_for_diagnostics() {
        let (base_url, _request) = serve_once(500, "{}").await;
        let err = source_for(base_url).try_fetch(&january()).await.unwrap_err();
        assert!(
            matches!(err, FetchError::HttpStatus { status, .. } if status.as_u16() == 500),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn malformed_payload_is_a_parse_error() {
        let (base_url, _request) = serve_once(200, "<html>oops</html>").await;
        let err = source_for(base_url).try_fetch(&january()).await;
        assert!(matches!(err, Err(FetchError::JsonParse(..))));
    }

    #[tokio::test]
    async fn malformed_payload_is_an_empty_result() {
        let (base_url, _request) = serve_once(200, r#""service unavailable""#).await;
        assert!(source_for(base_url).fetch_samples(&january()).await.is_empty());
    }

    #[tokio::test]
    async fn unreachable_host_is_an_empty_result() {
        let source = source_for(closed_url().await);
        assert!(source.fetch_samples(&january()).await.is_empty());
    }
}
