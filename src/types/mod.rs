pub mod config;
pub mod dataset_kind;
pub mod date_range;
pub mod samples;
