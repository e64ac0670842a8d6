mod analytics;
mod error;
mod export;
mod fetching;
mod monitor;
mod table;
mod types;

pub use error::EnvDashError;
pub use monitor::*;

pub use types::config::*;
pub use types::dataset_kind::DatasetKind;
pub use types::date_range::*;
pub use types::samples::*;

pub use fetching::current_feed::*;
pub use fetching::latest::*;
pub use fetching::measurements::*;
pub use fetching::normalize::*;
pub use fetching::query_cache::*;
pub use fetching::raw::*;
pub use fetching::source::SampleSource;
pub use fetching::water_sim::*;

pub use table::display::*;
pub use table::filter::*;
pub use table::sort::*;
pub use table::view::*;

pub use export::csv_export::*;
pub use export::export;
pub use export::sink::*;

pub use analytics::frame::records_to_frame;
pub use analytics::{air_summary, water_summary, AirSummary, WaterSummary};

pub use analytics::error::AnalyticsError;
pub use export::error::ExportError;
pub use fetching::error::FetchError;
