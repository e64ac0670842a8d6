//! Prints a month of simulated water-quality samples, sorted by turbidity.

use chrono::NaiveDate;
use envdash::{
    display_row, headers, serialize, view, DatasetKind, DateRange, EnvDashError, FilterSet,
    SampleSource, SortSpec, WaterQualitySample, WaterSimulator,
};

#[tokio::main]
async fn main() -> Result<(), EnvDashError> {
    env_logger::init();

    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
    );
    let samples = WaterSimulator::with_seed(2024).fetch_samples(&range).await;

    let sorted = view(
        &samples,
        "",
        &FilterSet::new(),
        Some(&SortSpec::descending("turbidity")),
    );
    println!("{}", headers::<WaterQualitySample>().join(" | "));
    for row in &sorted {
        println!("{}", display_row(row).join(" | "));
    }

    let csv = serialize(&samples, DatasetKind::Water)?;
    println!("\n{} bytes of CSV", csv.len());
    Ok(())
}
