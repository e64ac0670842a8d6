//! The main entry point: one client that serves both dashboard datasets.

use crate::error::EnvDashError;
use crate::fetching::measurements::MeasurementsSource;
use crate::fetching::query_cache::{QueryCache, DEFAULT_CACHE_CAPACITY};
use crate::fetching::source::SampleSource;
use crate::fetching::water_sim::WaterSimulator;
use crate::types::config::SourceConfig;
use crate::types::dataset_kind::DatasetKind;
use crate::types::date_range::{DateRange, IntoUtcDateTime};
use crate::types::samples::{AirQualitySample, Record, WaterQualitySample};
use bon::bon;

/// A boxed air-quality strategy.
pub type AirSource = Box<dyn SampleSource<Sample = AirQualitySample>>;
/// A boxed water-quality strategy.
pub type WaterSource = Box<dyn SampleSource<Sample = WaterQualitySample>>;

/// Serves air- and water-quality samples for date ranges.
///
/// Every fetch is fail-soft: an unreachable or misbehaving upstream yields an
/// empty vector, never an error. With caching enabled, successful results are
/// kept per dataset and exact date range until [`clear_cache`](Self::clear_cache)
/// or until `cache_capacity` newer ranges of the same dataset push them out.
///
/// # Examples
///
/// ```rust
/// # use envdash::{EnvMonitor, EnvDashError, SourceConfig};
/// # use chrono::NaiveDate;
/// # #[tokio::main]
/// # async fn main() -> Result<(), EnvDashError> {
/// let monitor = EnvMonitor::new(SourceConfig::default())?;
/// let water = monitor
///     .get_water_quality(
///         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
///     )
///     .await;
/// assert_eq!(water.len(), 7);
/// # Ok(())
/// # }
/// ```
pub struct EnvMonitor {
    air: AirSource,
    water: WaterSource,
    air_cache: Option<QueryCache<AirQualitySample>>,
    water_cache: Option<QueryCache<WaterQualitySample>>,
}

#[bon]
impl EnvMonitor {
    /// The default setup: live measurements for the configured city, simulated
    /// water data, caching on.
    ///
    /// # Errors
    ///
    /// Returns [`EnvDashError::Fetch`] if the HTTP client cannot be built.
    pub fn new(config: SourceConfig) -> Result<Self, EnvDashError> {
        let air = MeasurementsSource::new(config)?;
        Ok(Self::from_sources()
            .air(Box::new(air))
            .water(Box::new(WaterSimulator::new()))
            .caching(true)
            .call())
    }

    /// Assembles a monitor from explicit strategies.
    ///
    /// ```rust
    /// # use envdash::{CurrentFeedSource, EnvMonitor, SourceConfig, WaterSimulator};
    /// # fn main() -> Result<(), envdash::EnvDashError> {
    /// let monitor = EnvMonitor::from_sources()
    ///     .air(Box::new(CurrentFeedSource::new(SourceConfig::default())?))
    ///     .water(Box::new(WaterSimulator::with_seed(42)))
    ///     .call();
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn from_sources(
        air: AirSource,
        water: WaterSource,
        #[builder(default)] caching: bool,
        #[builder(default = DEFAULT_CACHE_CAPACITY)] cache_capacity: usize,
    ) -> Self {
        Self {
            air,
            water,
            air_cache: caching.then(|| QueryCache::with_capacity(cache_capacity)),
            water_cache: caching.then(|| QueryCache::with_capacity(cache_capacity)),
        }
    }

    /// Air-quality samples for `[start, end)`.
    pub async fn get_air_quality(
        &self,
        start: impl IntoUtcDateTime,
        end: impl IntoUtcDateTime,
    ) -> Vec<AirQualitySample> {
        self.air_quality_for(&DateRange::new(start, end)).await
    }

    /// Water-quality samples for `[start, end)`.
    pub async fn get_water_quality(
        &self,
        start: impl IntoUtcDateTime,
        end: impl IntoUtcDateTime,
    ) -> Vec<WaterQualitySample> {
        self.water_quality_for(&DateRange::new(start, end)).await
    }

    pub async fn air_quality_for(&self, range: &DateRange) -> Vec<AirQualitySample> {
        fetch_through(self.air.as_ref(), self.air_cache.as_ref(), range).await
    }

    pub async fn water_quality_for(&self, range: &DateRange) -> Vec<WaterQualitySample> {
        fetch_through(self.water.as_ref(), self.water_cache.as_ref(), range).await
    }

    /// Whether the dataset's samples are synthesized.
    pub fn is_simulated(&self, kind: DatasetKind) -> bool {
        match kind {
            DatasetKind::Air => self.air.is_simulated(),
            DatasetKind::Water => self.water.is_simulated(),
        }
    }

    pub fn is_caching(&self) -> bool {
        self.air_cache.is_some()
    }

    /// Drops every cached batch of both datasets.
    pub async fn clear_cache(&self) {
        if let Some(cache) = &self.air_cache {
            cache.clear().await;
        }
        if let Some(cache) = &self.water_cache {
            cache.clear().await;
        }
    }
}

async fn fetch_through<R, S>(source: &S, cache: Option<&QueryCache<R>>, range: &DateRange) -> Vec<R>
where
    R: Record,
    S: SampleSource<Sample = R> + ?Sized,
{
    match cache {
        Some(cache) => {
            cache
                .get_or_fetch(source.name(), range, || source.try_fetch(range))
                .await
        }
        None => source.fetch_samples(range).await,
    }
}
