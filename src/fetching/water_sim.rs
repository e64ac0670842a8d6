//! Placeholder water-quality generator. There is no live water source; this
//! produces plausible daily values around fixed baselines.

use crate::fetching::error::FetchError;
use crate::fetching::source::SampleSource;
use crate::types::date_range::{iso_timestamp, DateRange};
use crate::types::samples::WaterQualitySample;
use async_trait::async_trait;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PH_BASELINE: f64 = 7.0;
const PH_JITTER: f64 = 0.4;
const CONDUCTIVITY_MIN: f64 = 400.0;
const CONDUCTIVITY_SPAN: f64 = 100.0;
const TURBIDITY_MIN: f64 = 3.0;
const TURBIDITY_SPAN: f64 = 2.0;

/// Synthesizes one [`WaterQualitySample`] per day of the requested range.
///
/// - `ph` in `[6.6, 7.4)`
/// - `conductivity` in `[400, 500)` µS/cm
/// - `turbidity` in `[3, 5)` NTU
///
/// The number of samples and their timestamps depend only on the range. Values
/// are random; with a seed they are reproducible for the same range.
///
/// # Examples
///
/// ```
/// use envdash::{DateRange, WaterSimulator};
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
/// );
/// let samples = WaterSimulator::with_seed(7).simulate(&range);
/// assert_eq!(samples.len(), 3);
/// assert_eq!(samples[0].timestamp, "2024-03-01T00:00:00.000Z");
/// ```
#[derive(Debug, Clone, Default)]
pub struct WaterSimulator {
    seed: Option<u64>,
}

impl WaterSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    pub fn simulate(&self, range: &DateRange) -> Vec<WaterQualitySample> {
        let mut rng = range_rng(self.seed, range);
        let samples: Vec<WaterQualitySample> = range
            .days()
            .map(|day| WaterQualitySample {
                timestamp: iso_timestamp(&day),
                ph: PH_BASELINE + rng.gen_range(-PH_JITTER..PH_JITTER),
                conductivity: CONDUCTIVITY_MIN + rng.gen_range(0.0..CONDUCTIVITY_SPAN),
                turbidity: TURBIDITY_MIN + rng.gen_range(0.0..TURBIDITY_SPAN),
            })
            .collect();
        info!("Simulated {} water samples for {}", samples.len(), range);
        samples
    }
}

#[async_trait]
impl SampleSource for WaterSimulator {
    type Sample = WaterQualitySample;

    fn name(&self) -> &'static str {
        "water-simulator"
    }

    fn is_simulated(&self) -> bool {
        true
    }

    async fn try_fetch(&self, range: &DateRange) -> Result<Vec<WaterQualitySample>, FetchError> {
        Ok(self.simulate(range))
    }
}

/// A generator for one range: seeded from `seed` and the range start when a
/// seed is given, from OS entropy otherwise.
pub(crate) fn range_rng(seed: Option<u64>, range: &DateRange) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ range.start.timestamp() as u64),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range(days: u32) -> DateRange {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        DateRange::new(start, start + chrono::Days::new(days as u64))
    }

    #[tokio::test]
    async fn five_days_give_five_daily_samples_within_bounds() {
        let samples = WaterSimulator::new().fetch_samples(&range(5)).await;
        assert_eq!(samples.len(), 5);

        for pair in samples.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
        let dates: Vec<&str> = samples.iter().map(|s| &s.timestamp[..10]).collect();
        assert_eq!(
            dates,
            vec!["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"]
        );
        for sample in &samples {
            assert!((6.6..7.4).contains(&sample.ph), "ph {}", sample.ph);
            assert!(
                (400.0..500.0).contains(&sample.conductivity),
                "conductivity {}",
                sample.conductivity
            );
            assert!(
                (3.0..5.0).contains(&sample.turbidity),
                "turbidity {}",
                sample.turbidity
            );
        }
    }

    #[test]
    fn empty_or_inverted_range_gives_nothing() {
        assert!(WaterSimulator::new().simulate(&range(0)).is_empty());
        let r = range(3);
        let inverted = DateRange::new(r.end, r.start);
        assert!(WaterSimulator::new().simulate(&inverted).is_empty());
    }

    #[test]
    fn seeded_simulation_is_reproducible() {
        let a = WaterSimulator::with_seed(42).simulate(&range(10));
        let b = WaterSimulator::with_seed(42).simulate(&range(10));
        assert_eq!(a, b);
    }

    #[test]
    fn simulator_is_labelled_as_simulated() {
        assert!(WaterSimulator::new().is_simulated());
    }
}
