//! Alternate air-quality source: a city "current conditions" feed whose single
//! reading seeds a random-walk history over the requested range.

use crate::fetching::error::FetchError;
use crate::fetching::raw::{parse_feed, FeedParse};
use crate::fetching::source::{ensure_success, SampleSource};
use crate::fetching::water_sim::range_rng;
use crate::types::config::SourceConfig;
use crate::types::date_range::{iso_timestamp, DateRange};
use crate::types::samples::{AirQualitySample, Record};
use async_trait::async_trait;
use log::{debug, info};
use rand::Rng;
use reqwest::Client;

const DEMO_TOKEN: &str = "demo";
const WALK_STEP: f64 = 0.1;

pub struct CurrentFeedSource {
    config: SourceConfig,
    client: Client,
    seed: Option<u64>,
}

impl CurrentFeedSource {
    pub fn new(config: SourceConfig) -> Result<Self, FetchError> {
        let client = config.build_client()?;
        Ok(Self {
            config,
            client,
            seed: None,
        })
    }

    /// Makes the synthesized history reproducible for a given baseline and range.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/feed/{}/",
            self.config.feed_url.trim_end_matches('/'),
            self.config.city.to_lowercase()
        )
    }

    /// Fetches the current reading as an untimestamped sample.
    pub async fn fetch_baseline(&self) -> Result<AirQualitySample, FetchError> {
        let url = self.endpoint();
        let token = self.config.feed_token.as_deref().unwrap_or(DEMO_TOKEN);
        info!("Requesting current conditions from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("token", token)])
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;
        let response = ensure_success(response, &url)?;
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;

        let snapshot = match parse_feed(&body).map_err(|e| FetchError::JsonParse(url.clone(), e))? {
            FeedParse::Reading(snapshot) => snapshot,
            FeedParse::Rejected(status) => return Err(FetchError::ServiceStatus { url, status }),
        };

        let mut baseline = AirQualitySample::with_timestamp("");
        baseline.aqi = snapshot.aqi;
        for (parameter, value) in snapshot.readings {
            if !baseline.set_number(&parameter, value) {
                debug!("Feed reading '{}' has no air-quality field", parameter);
            }
        }
        Ok(baseline)
    }
}

/// Builds one sample per day of `range`, starting at `baseline` and moving
/// every field by a random factor in `[0.9, 1.1]` per step. Values never go
/// below zero.
pub fn random_walk(
    baseline: &AirQualitySample,
    range: &DateRange,
    rng: &mut impl Rng,
) -> Vec<AirQualitySample> {
    let mut current = baseline.clone();
    let mut history = Vec::with_capacity(range.day_count());
    for (step, day) in range.days().enumerate() {
        if step > 0 {
            for name in AirQualitySample::numeric_fields() {
                let value = current
                    .field(name)
                    .and_then(|v| v.as_number())
                    .unwrap_or_default();
                let factor = 1.0 + rng.gen_range(-WALK_STEP..=WALK_STEP);
                current.set_number(name, (value * factor).max(0.0));
            }
        }
        current.timestamp = iso_timestamp(&day);
        history.push(current.clone());
    }
    history
}

#[async_trait]
impl SampleSource for CurrentFeedSource {
    type Sample = AirQualitySample;

    fn name(&self) -> &'static str {
        "current-feed"
    }

    // Only the first day is a real reading; the rest is extrapolated.
    fn is_simulated(&self) -> bool {
        true
    }

    async fn try_fetch(&self, range: &DateRange) -> Result<Vec<AirQualitySample>, FetchError> {
        let baseline = self.fetch_baseline().await?;
        let mut rng = range_rng(self.seed, range);
        Ok(random_walk(&baseline, range, &mut rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetching::test_server::serve_once;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn week() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 8).unwrap(),
        )
    }

    fn source_for(feed_url: String) -> CurrentFeedSource {
        CurrentFeedSource::new(SourceConfig::builder().feed_url(feed_url).build())
            .unwrap()
            .seeded(3)
    }

    const FEED: &str = r#"{"status": "ok", "data": {"aqi": 120,
        "iaqi": {"pm25": {"v": 120}, "pm10": {"v": 80}, "no2": {"v": 14.2}, "h": {"v": 40}}}}"#;

    #[tokio::test]
    async fn walks_from_the_current_reading() {
        let (feed_url, request) = serve_once(200, FEED).await;
        let samples = source_for(feed_url).fetch_samples(&week()).await;

        assert_eq!(samples.len(), 7);
        assert_eq!(samples[0].timestamp, "2024-06-01T00:00:00.000Z");
        assert_eq!(samples[0].aqi, 120.0);
        assert_eq!(samples[0].pm25, 120.0);
        assert_eq!(samples[0].pm10, 80.0);
        assert_eq!(samples[0].no2, 14.2);
        assert_eq!(samples[0].so2, 0.0);

        let request_line = request.await.unwrap();
        assert!(request_line.starts_with("GET /feed/cairo/?token=demo"), "{request_line}");
    }

    #[tokio::test]
    async fn rejected_feed_is_an_empty_result() {
        let (feed_url, _request) =
            serve_once(200, r#"{"status": "error", "data": "Invalid key"}"#).await;
        let source = source_for(feed_url);
        assert!(source.fetch_samples(&week()).await.is_empty());
    }

    #[tokio::test]
    async fn rejected_feed_reports_service_status() {
        let (feed_url, _request) =
            serve_once(200, r#"{"status": "error", "data": "Invalid key"}"#).await;
        let err = source_for(feed_url).try_fetch(&week()).await.unwrap_err();
        assert!(matches!(err, FetchError::ServiceStatus { ref status, .. } if status == "error"));
    }

    #[test]
    fn random_walk_stays_bounded_and_non_negative() {
        let mut baseline = AirQualitySample::with_timestamp("");
        baseline.aqi = 100.0;
        baseline.o3 = 50.0;
        let mut rng = StdRng::seed_from_u64(11);
        let history = random_walk(&baseline, &week(), &mut rng);

        assert_eq!(history.len(), 7);
        for pair in history.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
            let ratio = pair[1].aqi / pair[0].aqi;
            assert!((0.9 - 1e-9..=1.1 + 1e-9).contains(&ratio), "ratio {ratio}");
            assert!(pair[1].o3 >= 0.0);
            assert_eq!(pair[1].co, 0.0);
        }
    }
}
