//! Fetches a week of Cairo air quality, prints a filtered table and writes both
//! datasets as CSV into `./exports`.

use chrono::{Duration, Utc};
use envdash::{
    air_summary, display_row, export, headers, water_summary, AirQualitySample, DatasetKind,
    DateRange, DirectorySink, EnvDashError, EnvMonitor, FilterSet, LatestRequest, RangeFilter,
    SortSpec, SourceConfig, TableQuery,
};

#[tokio::main]
async fn main() -> Result<(), EnvDashError> {
    env_logger::init();

    let monitor = EnvMonitor::new(SourceConfig::from_env())?;
    let end = Utc::now();
    let range = DateRange::new(end - Duration::days(7), end);

    let latest = LatestRequest::new();
    let ticket = latest.begin(range);
    let air = monitor.air_quality_for(&range).await;
    let Some(air) = latest.settle(&ticket, air) else {
        return Ok(());
    };
    let water = monitor.water_quality_for(&range).await;

    println!("--- {} ({} rows) ---", DatasetKind::Air.label(), air.len());
    let query = TableQuery::new()
        .with_filters(FilterSet::new().with("aqi", RangeFilter::at_least(50.0)))
        .with_sort(SortSpec::descending("aqi"));
    println!("{}", headers::<AirQualitySample>().join(" | "));
    for row in query.apply(&air).iter().take(10) {
        println!("{}", display_row(row).join(" | "));
    }

    if let Some(summary) = air_summary(&air)? {
        println!(
            "Average AQI {:.1}, average PM2.5 {:.1}, peak AQI {:.0}",
            summary.average_aqi, summary.average_pm25, summary.max_aqi
        );
    }
    if let Some(summary) = water_summary(&water)? {
        println!(
            "Average pH {:.2}, average turbidity {:.2} NTU (simulated)",
            summary.average_ph, summary.average_turbidity
        );
    }

    let sink = DirectorySink::new("exports");
    let air_file = export(&air, DatasetKind::Air, &range, &sink)?;
    let water_file = export(&water, DatasetKind::Water, &range, &sink)?;
    println!("Wrote {} and {}", air_file, water_file);

    Ok(())
}
