use crate::analytics::error::AnalyticsError;
use crate::export::error::ExportError;
use crate::fetching::error::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvDashError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}
