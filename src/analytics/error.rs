use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Polars operation failed")]
    Polars(#[from] PolarsError),

    #[error("Statistic '{0}' could not be computed")]
    MissingStatistic(String),
}
